//! Observers: callbacks notified with a [`Query`] their filter accepted.
//!
//! Any `Fn(&Query) -> anyhow::Result<()>` is an [`Observer`]. [`PrefixObserver`]
//! is the stock implementation: it writes one line per notification to an
//! explicit [`Sink`] rather than to ambient global output.

use std::io::Write;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::types::Query;

/// A side-effecting callback invoked with each interesting query.
///
/// Returning an error does not stop dispatch; the registry records it and
/// moves on to the next registration.
pub trait Observer {
    fn on_query(&self, query: &Query) -> anyhow::Result<()>;
}

impl<F> Observer for F
where
    F: Fn(&Query) -> anyhow::Result<()>,
{
    fn on_query(&self, query: &Query) -> anyhow::Result<()> {
        self(query)
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Shared, line-oriented output handle given to observers at construction.
///
/// Cloning a sink shares the underlying writer, so several observers can
/// interleave lines on one stream in notification order.
#[derive(Clone)]
pub struct Sink {
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl Sink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Write `line` followed by a newline and flush.
    pub fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self
            .inner
            .lock()
            .map_err(|_| std::io::Error::other("output sink lock poisoned"))?;
        writeln!(writer, "{line}")?;
        writer.flush()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// PrefixObserver
// ---------------------------------------------------------------------------

/// Line format written by [`PrefixObserver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<prefix> <query>`
    #[default]
    Text,
    /// One JSON object per line.
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            other => Err(format!("unknown output format: {other} (expected text or jsonl)")),
        }
    }
}

#[derive(Serialize)]
struct Notification<'a> {
    observer: &'a str,
    prefix: &'a str,
    query: &'a str,
}

/// Writes `"<prefix> <query>"` (or its jsonl equivalent) to a sink.
#[derive(Debug, Clone)]
pub struct PrefixObserver {
    name: String,
    prefix: String,
    format: OutputFormat,
    sink: Sink,
}

impl PrefixObserver {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, sink: Sink) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            format: OutputFormat::Text,
            sink,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Render the line this observer writes for `query`.
    pub fn render(&self, query: &Query) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Text => Ok(format!("{} {}", self.prefix, query)),
            OutputFormat::Jsonl => Ok(serde_json::to_string(&Notification {
                observer: &self.name,
                prefix: &self.prefix,
                query: query.as_str(),
            })?),
        }
    }
}

impl Observer for PrefixObserver {
    fn on_query(&self, query: &Query) -> anyhow::Result<()> {
        let line = self.render(query)?;
        self.sink.write_line(&line)?;
        Ok(())
    }
}
