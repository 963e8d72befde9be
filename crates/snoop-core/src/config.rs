//! Configuration types for snoop.
//!
//! [`Config::load`] reads `~/.config/snoop/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::filter::FilterSpec;
use crate::observer::OutputFormat;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
format = "text"

[[rules]]
name   = "friend"
prefix = "Oh Yes!"
filter = { kind = "contains", keyword = "friend" }

[[rules]]
name   = "long"
prefix = "So long"
filter = { kind = "longer_than", length = 60 }
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/snoop/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// One `[[rules]]` entry: an observer prefix paired with a filter strategy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    pub prefix: String,
    pub filter: FilterSpec,
}

impl RuleConfig {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, filter: FilterSpec) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            filter,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/snoop/config.toml`. Creates the file with
    /// defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();

        if !path.exists() {
            write_defaults(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit config file. A file that sets `rules` replaces the
    /// built-in rule list rather than appending to it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?;
        let mut loaded: Config = cfg.try_deserialize()?;
        if loaded.rules.is_empty() {
            loaded.rules = Self::defaults().rules;
        }
        Ok(loaded)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Replace the keyword of every `contains` rule.
    pub fn override_keyword(&mut self, keyword: &str) {
        for rule in &mut self.rules {
            if let FilterSpec::Contains { keyword: k, .. } = &mut rule.filter {
                *k = keyword.to_string();
            }
        }
    }

    /// Replace the threshold of every `longer_than` rule.
    pub fn override_min_length(&mut self, length: usize) {
        for rule in &mut self.rules {
            if let FilterSpec::LongerThan { length: l } = &mut rule.filter {
                *l = length;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn write_defaults(path: &Path) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG.trim_start()).map_err(io_err)
}

fn config_path() -> PathBuf {
    config_path_from(std::env::var("XDG_CONFIG_HOME").ok(), std::env::var("HOME").ok())
}

/// `$XDG_CONFIG_HOME/snoop/config.toml`, else `$HOME/.config/snoop/config.toml`.
/// Empty values count as unset.
fn config_path_from(xdg_config_home: Option<String>, home: Option<String>) -> PathBuf {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
    non_empty(xdg_config_home)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(non_empty(home).unwrap_or_else(|| ".".to_string())).join(".config")
        })
        .join("snoop")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
