//! Flat-file ledger of already-posted photo ids.
//!
//! One id per line, UTF-8, append-only. The file is re-read at the start
//! of every run; there is no cross-run in-memory cache.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full set of recorded ids. A missing or unreadable file reads as
    /// the empty set.
    pub fn snapshot(&self) -> HashSet<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents
                .lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %e, "Ledger unreadable, treating as empty");
                }
                HashSet::new()
            }
        }
    }

    /// Append one id. Write failures are logged, not propagated; the post
    /// already happened by the time this is called.
    pub fn record(&self, id: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", id));

        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, id, "Failed to record posted id");
        }
    }
}
