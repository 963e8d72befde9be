//! snoop-core: shared building blocks for snoop.
//!
//! This crate holds the Observer + Strategy pairing at the heart of snoop:
//! [`Query`] values flow into a [`Registry`], which evaluates each
//! registration's [`Filter`] in order and notifies the paired [`Observer`].
//!
//! ```text
//! QuerySource ──► Registry ──► Filter? ──► Observer ──► Sink
//! ```
//!
//! Everything runs synchronously on the calling thread.

pub mod config;
pub mod error;
pub mod filter;
pub mod observer;
pub mod registry;
pub mod types;

pub use error::{ConfigError, ObserverError, SourceError};
pub use filter::{Contains, Filter, FilterSpec, LongerThan, Matches};
pub use observer::{Observer, OutputFormat, PrefixObserver, Sink};
pub use registry::{Dispatch, Registration, Registry};
pub use types::Query;
