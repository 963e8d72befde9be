//! Search model: one query source plus the registry its queries flow into.
//!
//! [`SearchModel::pretend_to_search`] performs a single pass: every query is
//! dispatched as soon as it is read, strictly in line order, and nothing is
//! read ahead of the query being dispatched. A source failure ends the pass;
//! notifications delivered before it stand.

use snoop_core::{Filter, Observer, Registry, SourceError};
use snoop_feeds::QuerySource;
use thiserror::Error;

/// Counts for one pass over a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Queries read and dispatched.
    pub queries: usize,
    /// Filter acceptances across all queries.
    pub matched: usize,
    /// Observer invocations that completed successfully.
    pub notified: usize,
    /// Observer invocations that returned an error or panicked.
    pub observer_failures: usize,
}

impl PassSummary {
    pub fn is_clean(&self) -> bool {
        self.observer_failures == 0
    }
}

impl std::fmt::Display for PassSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} queries, {} matched, {} notified, {} observer failures",
            self.queries, self.matched, self.notified, self.observer_failures
        )
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    /// The source failed to open or failed mid-stream. `summary` covers the
    /// queries already dispatched.
    #[error("search aborted after {} queries: {source}", summary.queries)]
    Source {
        summary: PassSummary,
        #[source]
        source: SourceError,
    },
}

impl SearchError {
    pub fn summary(&self) -> &PassSummary {
        match self {
            SearchError::Source { summary, .. } => summary,
        }
    }
}

pub struct SearchModel<S> {
    source: S,
    registry: Registry,
}

impl<S: QuerySource> SearchModel<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            registry: Registry::new(),
        }
    }

    /// Register `observer` to be notified of every query `filter` accepts.
    pub fn add_query_observer<O, F>(&mut self, observer: O, filter: F) -> &mut Self
    where
        O: Observer + 'static,
        F: Filter + 'static,
    {
        self.registry.register(observer, filter);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Read the source once from the top, dispatching each query in order.
    pub fn pretend_to_search(&self) -> Result<PassSummary, SearchError> {
        let mut summary = PassSummary::default();
        let path = self.source.describe().display().to_string();
        tracing::debug!(source = %path, observers = self.registry.len(), "search pass started");

        let queries = self
            .source
            .produce_queries()
            .map_err(|source| SearchError::Source { summary, source })?;

        for query in queries {
            let query = query.map_err(|source| SearchError::Source { summary, source })?;
            let outcome = self.registry.dispatch(&query);
            summary.queries += 1;
            summary.matched += outcome.matched;
            summary.notified += outcome.notified;
            summary.observer_failures += outcome.failures.len();
        }

        tracing::debug!(source = %path, %summary, "search pass finished");
        Ok(summary)
    }
}
