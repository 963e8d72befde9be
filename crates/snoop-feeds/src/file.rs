//! File query source.
//!
//! Every call to [`QuerySource::produce_queries`] reopens the file and starts
//! from the first line, so one `FileSource` can back any number of passes.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use snoop_core::SourceError;

use crate::{Queries, QuerySource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuerySource for FileSource {
    fn produce_queries(&self) -> Result<Queries, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Unavailable {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "opened query source");
        Ok(Queries::new(Box::new(BufReader::new(file)), &self.path))
    }

    fn describe(&self) -> &Path {
        &self.path
    }
}
