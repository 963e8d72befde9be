//! Stdin query source, selected on the command line with `-`.
//!
//! Standard input cannot be rewound: a second call to
//! [`QuerySource::produce_queries`] only sees whatever is still unread.

use std::path::Path;

use snoop_core::SourceError;

use crate::{Queries, QuerySource};

#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl QuerySource for StdinSource {
    fn produce_queries(&self) -> Result<Queries, SourceError> {
        Ok(Queries::new(Box::new(std::io::stdin().lock()), "-"))
    }

    fn describe(&self) -> &Path {
        Path::new("-")
    }
}
