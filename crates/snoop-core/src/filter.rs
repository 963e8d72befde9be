//! Filters: predicate strategies deciding whether a [`Query`] is interesting.
//!
//! Any `Fn(&Query) -> bool` is a [`Filter`]. The named strategies here back
//! the `[[rules]]` entries of the config file; they hold no mutable state and
//! are safe to share across registrations.

use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::Query;

/// A pure predicate over a query.
pub trait Filter {
    fn is_interesting(&self, query: &Query) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&Query) -> bool,
{
    fn is_interesting(&self, query: &Query) -> bool {
        self(query)
    }
}

// ---------------------------------------------------------------------------
// Built-in strategies
// ---------------------------------------------------------------------------

/// Substring match against a fixed keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contains {
    keyword: String,
    case_sensitive: bool,
}

impl Contains {
    /// Case-insensitive match.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            case_sensitive: true,
        }
    }
}

impl Filter for Contains {
    fn is_interesting(&self, query: &Query) -> bool {
        if self.case_sensitive {
            query.as_str().contains(&self.keyword)
        } else {
            query.as_str().to_lowercase().contains(&self.keyword)
        }
    }
}

/// Accepts queries strictly longer than `length` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongerThan {
    length: usize,
}

impl LongerThan {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Filter for LongerThan {
    fn is_interesting(&self, query: &Query) -> bool {
        query.char_len() > self.length
    }
}

/// Accepts queries matched anywhere by a regular expression.
#[derive(Debug, Clone)]
pub struct Matches {
    pattern: Regex,
}

impl Matches {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Filter for Matches {
    fn is_interesting(&self, query: &Query) -> bool {
        self.pattern.is_match(query.as_str())
    }
}

// ---------------------------------------------------------------------------
// Config representation
// ---------------------------------------------------------------------------

/// `filter` table of a `[[rules]]` entry.
///
/// ```toml
/// filter = { kind = "contains", keyword = "friend" }
/// filter = { kind = "longer_than", length = 60 }
/// filter = { kind = "matches", pattern = "^how (do|to)" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    Contains {
        keyword: String,
        #[serde(default)]
        case_sensitive: bool,
    },
    LongerThan {
        length: usize,
    },
    Matches {
        pattern: String,
    },
}

impl FilterSpec {
    /// Build the strategy described by this spec. `rule` names the owning rule
    /// in error messages.
    pub fn build(&self, rule: &str) -> Result<Box<dyn Filter>, ConfigError> {
        match self {
            FilterSpec::Contains { keyword, .. } if keyword.is_empty() => {
                Err(ConfigError::EmptyKeyword {
                    rule: rule.to_string(),
                })
            }
            FilterSpec::Contains {
                keyword,
                case_sensitive: true,
            } => Ok(Box::new(Contains::case_sensitive(keyword.as_str()))),
            FilterSpec::Contains { keyword, .. } => Ok(Box::new(Contains::new(keyword.as_str()))),
            FilterSpec::LongerThan { length } => Ok(Box::new(LongerThan::new(*length))),
            FilterSpec::Matches { pattern } => Matches::new(pattern)
                .map(|m| Box::new(m) as Box<dyn Filter>)
                .map_err(|source| ConfigError::InvalidPattern {
                    rule: rule.to_string(),
                    source,
                }),
        }
    }
}
