//! Domain-specific assertion macros for snoop harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* observer saw *which* query.

/// Assert that the observer tagged `$tag` saw exactly `$expected`, in order.
///
/// ```rust
/// assert_seen!(recorder, "friend", ["my friend is here"]);
/// ```
#[macro_export]
macro_rules! assert_seen {
    ($recorder:expr, $tag:expr, [$($q:expr),* $(,)?]) => {{
        let expected: Vec<String> = vec![$(String::from($q)),*];
        let actual = $recorder.seen_by($tag);
        if actual != expected {
            panic!(
                "assert_seen! failed for observer {:?}:\n  expected: {:?}\n  actual:   {:?}\n  all notifications: {:?}",
                $tag,
                expected,
                actual,
                $recorder.notifications()
            );
        }
    }};
}

/// Assert that no observer was notified at all.
#[macro_export]
macro_rules! assert_silent {
    ($recorder:expr) => {{
        let all = $recorder.notifications();
        if !all.is_empty() {
            panic!("assert_silent! failed: {} notifications: {:?}", all.len(), all);
        }
    }};
}

/// Assert a summary's counters as `queries / matched / notified / failures`.
#[macro_export]
macro_rules! assert_summary {
    ($summary:expr, queries: $q:expr, matched: $m:expr, notified: $n:expr, failures: $f:expr) => {{
        let s: &snoop::PassSummary = &$summary;
        pretty_assertions::assert_eq!(
            (s.queries, s.matched, s.notified, s.observer_failures),
            ($q, $m, $n, $f),
            "summary mismatch (queries, matched, notified, failures): {}",
            s
        );
    }};
}
