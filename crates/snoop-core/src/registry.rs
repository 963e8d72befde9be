//! Notification registry: ordered (observer, filter) registrations and the
//! per-query fan-out over them.
//!
//! Registrations are append-only: there is no deregistration and no
//! deduplication. [`Registry::dispatch`] takes `&self`; it never mutates
//! registration state.
//!
//! Each observer call runs inside a recovery boundary. An error or panic from
//! one observer becomes an [`ObserverError`] in the returned [`Dispatch`] and
//! the remaining registrations for that query still run.

use std::panic::{self, AssertUnwindSafe};

use crate::error::ObserverError;
use crate::filter::Filter;
use crate::observer::Observer;
use crate::types::Query;

/// One (observer, filter) pair, with a name used in diagnostics.
pub struct Registration {
    name: String,
    observer: Box<dyn Observer>,
    filter: Box<dyn Filter>,
}

impl Registration {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of dispatching a single query.
#[derive(Debug, Default)]
pub struct Dispatch {
    /// Registrations whose filter accepted the query.
    pub matched: usize,
    /// Observers that completed without error.
    pub notified: usize,
    pub failures: Vec<ObserverError>,
}

impl Dispatch {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    registrations: Vec<Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration named after its position (`#0`, `#1`, …).
    pub fn register<O, F>(&mut self, observer: O, filter: F) -> &mut Self
    where
        O: Observer + 'static,
        F: Filter + 'static,
    {
        let name = format!("#{}", self.registrations.len());
        self.register_boxed(name, Box::new(observer), Box::new(filter))
    }

    pub fn register_named<O, F>(
        &mut self,
        name: impl Into<String>,
        observer: O,
        filter: F,
    ) -> &mut Self
    where
        O: Observer + 'static,
        F: Filter + 'static,
    {
        self.register_boxed(name.into(), Box::new(observer), Box::new(filter))
    }

    pub fn register_boxed(
        &mut self,
        name: String,
        observer: Box<dyn Observer>,
        filter: Box<dyn Filter>,
    ) -> &mut Self {
        tracing::debug!(
            observer = %name,
            position = self.registrations.len(),
            "registered observer"
        );
        self.registrations.push(Registration {
            name,
            observer,
            filter,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Registrations in insertion order.
    pub fn registrations(&self) -> impl Iterator<Item = &Registration> {
        self.registrations.iter()
    }

    /// Evaluate every filter once, in registration order, and synchronously
    /// notify each observer whose filter accepts `query` before moving on.
    pub fn dispatch(&self, query: &Query) -> Dispatch {
        let mut outcome = Dispatch::default();

        for registration in &self.registrations {
            if !registration.filter.is_interesting(query) {
                continue;
            }
            outcome.matched += 1;

            match notify(registration, query) {
                Ok(()) => outcome.notified += 1,
                Err(err) => {
                    tracing::warn!(observer = %registration.name, error = %err, "observer failed");
                    outcome.failures.push(err);
                }
            }
        }

        tracing::trace!(
            query = %query,
            matched = outcome.matched,
            notified = outcome.notified,
            "dispatched query"
        );
        outcome
    }
}

fn notify(registration: &Registration, query: &Query) -> Result<(), ObserverError> {
    match panic::catch_unwind(AssertUnwindSafe(|| registration.observer.on_query(query))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(ObserverError::Failed {
            observer: registration.name.clone(),
            query: query.to_string(),
            source,
        }),
        Err(payload) => Err(ObserverError::Panicked {
            observer: registration.name.clone(),
            query: query.to_string(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
