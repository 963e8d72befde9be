//! snoop-feeds: query source adapters for snoop.
//!
//! Each source opens a line-oriented text origin and yields its lines as
//! [`Query`] values through a [`Queries`] iterator. The iterator owns the
//! underlying handle, so the handle is released whenever the iterator is
//! dropped: on exhaustion, after an error, or when the caller stops early.

pub mod file;
pub mod stdin;

use std::io::{BufRead, ErrorKind};
use std::path::{Path, PathBuf};

use snoop_core::{Query, SourceError};

pub use file::FileSource;
pub use stdin::StdinSource;

/// A line-oriented origin that can be turned into a sequence of queries.
pub trait QuerySource {
    /// Open the origin from its beginning and return a lazy, finite iterator
    /// over its lines. Opening failures surface here as
    /// [`SourceError::Unavailable`].
    fn produce_queries(&self) -> Result<Queries, SourceError>;

    /// Human-readable name of the origin, used in diagnostics.
    fn describe(&self) -> &Path;
}

/// Lazy sequence of queries read from an open source.
///
/// A line ends at `\n`, `\r` or `\r\n`. Yields one `Err(SourceError::Read)`
/// on a mid-stream failure and is fused afterwards.
pub struct Queries {
    reader: Option<Box<dyn BufRead>>,
    path: PathBuf,
    line: usize,
    buf: Vec<u8>,
    /// The previous line ended at `\r`; a `\n` at the start of the next read
    /// belongs to that terminator.
    skip_lf: bool,
}

impl Queries {
    pub fn new(reader: Box<dyn BufRead>, path: impl Into<PathBuf>) -> Self {
        Self {
            reader: Some(reader),
            path: path.into(),
            line: 0,
            buf: Vec::new(),
            skip_lf: false,
        }
    }

    /// Number of lines yielded so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    fn close(&mut self) {
        if self.reader.take().is_some() {
            tracing::debug!(path = %self.path.display(), lines = self.line, "closed query source");
        }
    }
}

impl Iterator for Queries {
    type Item = Result<Query, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        self.buf.clear();

        match read_line(reader.as_mut(), &mut self.buf, &mut self.skip_lf) {
            Ok(false) => {
                self.close();
                None
            }
            Ok(true) => {
                self.line += 1;
                Some(Ok(Query::new(String::from_utf8_lossy(&self.buf).into_owned())))
            }
            Err(source) => {
                let err = SourceError::Read {
                    path: self.path.clone(),
                    line: self.line + 1,
                    source,
                };
                self.close();
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Queries {}

/// Read one line into `buf` without its terminator. Returns `Ok(false)` at
/// end of input when no bytes were read.
fn read_line(
    reader: &mut dyn BufRead,
    buf: &mut Vec<u8>,
    skip_lf: &mut bool,
) -> std::io::Result<bool> {
    let mut read_any = false;
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if available.is_empty() {
            return Ok(read_any);
        }
        if std::mem::take(skip_lf) && available[0] == b'\n' {
            reader.consume(1);
            continue;
        }
        read_any = true;

        let end = available.iter().position(|&b| b == b'\n' || b == b'\r');
        let (used, ended_at) = match end {
            Some(i) => {
                buf.extend_from_slice(&available[..i]);
                (i + 1, Some(available[i]))
            }
            None => {
                buf.extend_from_slice(available);
                (available.len(), None)
            }
        };
        reader.consume(used);

        if let Some(terminator) = ended_at {
            *skip_lf = terminator == b'\r';
            return Ok(true);
        }
    }
}
