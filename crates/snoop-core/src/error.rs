//! Error types shared across snoop crates.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a query source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be opened (missing file, permission denied, …).
    #[error("cannot open query source {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading an already-open source failed mid-stream. `line` is the
    /// 1-based number of the line that could not be read.
    #[error("read failed on {} at line {line}: {source}", path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            SourceError::Unavailable { path, .. } | SourceError::Read { path, .. } => path,
        }
    }
}

/// Failure of a single observer invocation, captured by the registry's
/// recovery boundary.
#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("observer {observer:?} failed on query {query:?}: {source:#}")]
    Failed {
        observer: String,
        query: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("observer {observer:?} panicked on query {query:?}: {message}")]
    Panicked {
        observer: String,
        query: String,
        message: String,
    },
}

impl ObserverError {
    /// Name of the registration whose observer failed.
    pub fn observer(&self) -> &str {
        match self {
            ObserverError::Failed { observer, .. } | ObserverError::Panicked { observer, .. } => {
                observer
            }
        }
    }
}

/// Invalid configuration that cannot be turned into registrations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rule {rule:?}: invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
    #[error("rule {rule:?}: keyword must not be empty")]
    EmptyKeyword { rule: String },
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("cannot write default config to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
