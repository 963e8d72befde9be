//! Static query corpora and fixture-file helpers used across harnesses.

use std::io::Write;
use std::path::PathBuf;

/// The reference scenario: one line for each built-in rule and one for neither.
///
/// Line 3 is 61 characters, one over the default threshold.
pub fn corpus_scenario() -> Vec<String> {
    vec![
        "my friend is here".to_string(),
        "a normal short query".to_string(),
        "x".repeat(61),
    ]
}

/// Lines that exercise whitespace and empty-line preservation.
pub const CORPUS_WHITESPACE: &[&str] = &[
    "  leading spaces",
    "trailing spaces  ",
    "",
    "\tTabbed Friend\t",
    "",
];

/// A mixed corpus of plausible search queries.
pub const CORPUS_MIXED: &[&str] = &[
    "how to make friends as an adult",
    "weather tomorrow",
    "FRIENDSHIP bracelet patterns",
    "what is the airspeed velocity of an unladen swallow, african or european?",
    "rust borrow checker",
    "boyfriend gift ideas",
    "",
    "cheap flights",
];

/// Generate `n` synthetic queries; every 10th mentions a friend and every 7th
/// is longer than 60 characters.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let mut q = format!("query number {i}");
            if i % 10 == 0 {
                q.push_str(" with a friend");
            }
            if i % 7 == 0 {
                q.push_str(&" padding".repeat(8));
            }
            q
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixture files
// ---------------------------------------------------------------------------

/// A query file on disk. The file lives as long as this value.
pub struct QueryFile {
    pub file: tempfile::NamedTempFile,
}

impl QueryFile {
    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

/// Write `lines` joined with `\n`, with a trailing newline if non-empty.
pub fn query_file<S: AsRef<str>>(lines: &[S]) -> QueryFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp query file");
    for line in lines {
        writeln!(file, "{}", line.as_ref()).expect("write query line");
    }
    file.flush().expect("flush query file");
    QueryFile { file }
}

/// Write raw bytes exactly as given.
pub fn query_file_raw(bytes: &[u8]) -> QueryFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp query file");
    file.write_all(bytes).expect("write query bytes");
    file.flush().expect("flush query file");
    QueryFile { file }
}

/// A path inside a fresh temp dir that does not exist.
pub fn missing_path() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("no-such-queries.txt");
    (dir, path)
}
