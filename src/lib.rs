//! snoop: watch a file of search queries and tell interested observers.
//!
//! A [`SearchModel`] reads one query per line from a
//! [`QuerySource`](snoop_feeds::QuerySource) and pushes each query through a
//! [`Registry`](snoop_core::Registry) of (observer, filter) registrations.
//! [`Snooper`] turns the configured rules into those registrations.
//!
//! ```text
//! FileSource ──► SearchModel ──► Registry ──► PrefixObserver ──► Sink
//! ```

pub mod model;
pub mod snooper;

pub use model::{PassSummary, SearchError, SearchModel};
pub use snooper::Snooper;
