//! Diagnostic Collection
//!
//! Per-file, ordered, non-deduplicated rule violation messages.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// One reported rule violation, scoped to a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file_path: String,
    pub message: String,
}

/// Diagnostics for every file of a run, keyed by file path.
///
/// Each file's entry is written only by the worker that owns that file, so a
/// single lock over the whole map is enough.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    files: Mutex<BTreeMap<String, Vec<Diagnostic>>>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Vec<Diagnostic>>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one message; the file entry is created on first use
    pub fn push(&self, file_path: &str, message: impl Into<String>) {
        self.lock()
            .entry(file_path.to_string())
            .or_default()
            .push(Diagnostic {
                file_path: file_path.to_string(),
                message: message.into(),
            });
    }

    /// Append messages in order. An empty batch creates no entry.
    pub fn extend<I, S>(&self, file_path: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut messages = messages.into_iter().peekable();
        if messages.peek().is_none() {
            return;
        }
        let mut files = self.lock();
        let entry = files.entry(file_path.to_string()).or_default();
        entry.extend(messages.map(|message| Diagnostic {
            file_path: file_path.to_string(),
            message: message.into(),
        }));
    }

    /// Diagnostics recorded for one file, in evaluation order
    pub fn for_file(&self, file_path: &str) -> Vec<Diagnostic> {
        self.lock().get(file_path).cloned().unwrap_or_default()
    }

    pub fn file_count(&self) -> usize {
        self.lock().len()
    }

    pub fn total(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current entries, sorted by path
    pub fn snapshot(&self) -> BTreeMap<String, Vec<Diagnostic>> {
        self.lock().clone()
    }
}
