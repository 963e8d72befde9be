//! Test builders: recording observers, counting filters, and in-memory sinks.
//!
//! These are designed for readability in test assertions, not for production
//! use. They panic on poisoned locks rather than returning `Result`.

use snoop_core::{Query, Sink};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// One observed event: `(tag, query text)`.
pub type Event = (String, String);

/// Shared journal of everything observers and filters did, in call order.
///
/// # Example
///
/// ```rust
/// let rec = Recorder::new();
/// registry.register(rec.observer("friend"), rec.filter("friend", |q| q.as_str().contains("friend")));
/// registry.dispatch(&Query::new("hello friend"));
/// assert_eq!(rec.notifications(), vec![("friend".into(), "hello friend".into())]);
/// ```
#[derive(Clone, Default)]
pub struct Recorder {
    notifications: Rc<RefCell<Vec<Event>>>,
    filter_calls: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that records `(tag, query)` and succeeds.
    pub fn observer(&self, tag: &str) -> impl Fn(&Query) -> anyhow::Result<()> + Clone {
        let log = Rc::clone(&self.notifications);
        let tag = tag.to_string();
        move |q: &Query| {
            log.borrow_mut().push((tag.clone(), q.to_string()));
            Ok(())
        }
    }

    /// An observer that records `(tag, query)` and then fails.
    pub fn failing_observer(&self, tag: &str) -> impl Fn(&Query) -> anyhow::Result<()> + Clone {
        let log = Rc::clone(&self.notifications);
        let tag = tag.to_string();
        move |q: &Query| {
            log.borrow_mut().push((tag.clone(), q.to_string()));
            anyhow::bail!("{tag} refused {q}")
        }
    }

    /// Wrap `pred` so every evaluation is journaled under `tag`.
    pub fn filter<P>(&self, tag: &str, pred: P) -> impl Fn(&Query) -> bool
    where
        P: Fn(&Query) -> bool,
    {
        let log = Rc::clone(&self.filter_calls);
        let tag = tag.to_string();
        move |q: &Query| {
            log.borrow_mut().push((tag.clone(), q.to_string()));
            pred(q)
        }
    }

    pub fn notifications(&self) -> Vec<Event> {
        self.notifications.borrow().clone()
    }

    pub fn filter_calls(&self) -> Vec<Event> {
        self.filter_calls.borrow().clone()
    }

    /// Queries delivered to the observer tagged `tag`, in order.
    pub fn seen_by(&self, tag: &str) -> Vec<String> {
        self.notifications
            .borrow()
            .iter()
            .filter(|(t, _)| t == tag)
            .map(|(_, q)| q.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SharedBuffer
// ---------------------------------------------------------------------------

/// A `Write` target whose contents can be read back after observers wrote to it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`Sink`] writing into this buffer.
    pub fn sink(&self) -> Sink {
        Sink::new(self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("sink output is UTF-8")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A writer that always fails, for exercising observer failure paths.
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
