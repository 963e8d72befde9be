//! Core types for snoop-core.
//!
//! A [`Query`] is one line of input text treated as a search query. It has no
//! identity beyond its string value: two queries with the same text are equal,
//! and duplicates in the input are dispatched independently.

use std::fmt;

/// A single line read from a query source, without its line terminator.
///
/// Leading and trailing whitespace is preserved verbatim. Queries are
/// immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Query(String);

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The query text exactly as it appeared in the source.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in Unicode scalar values, the unit used by length-based filters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Self(text)
    }
}
