//! Shared fixtures for integration tests.

#![allow(dead_code)]

use mediadex::engine::{IndexSummary, Indexer};
use mediadex::duplicates::DuplicateGroup;
use mediadex::reporter::{IndexReporter, NullReporter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Index `root` into a store in `root` and return the results.
pub fn run(root: &Path) -> (Vec<DuplicateGroup>, IndexSummary) {
    let indexer = Indexer::open(root, Arc::new(NullReporter)).unwrap();
    let result = indexer.run(root).unwrap();
    indexer.close().unwrap();
    result
}

/// Number of entries in the store under `root`.
pub fn entry_count(root: &Path) -> usize {
    let indexer = Indexer::open(root, Arc::new(NullReporter)).unwrap();
    indexer.store().len().unwrap()
}

/// A fresh scratch directory to use as both store and walk root.
pub fn scratch() -> TempDir {
    TempDir::new().unwrap()
}

/// Event recorded by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Progress(usize),
    New(String),
    Moved(String, String),
    Duplicate(String, String),
    FileError(PathBuf, String),
    Complete(usize, usize),
}

/// Reporter that keeps every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl IndexReporter for RecordingReporter {
    fn on_progress(&self, processed: usize) {
        self.push(Event::Progress(processed));
    }

    fn on_new(&self, path: &str) {
        self.push(Event::New(path.to_string()));
    }

    fn on_moved(&self, from: &str, to: &str) {
        self.push(Event::Moved(from.to_string(), to.to_string()));
    }

    fn on_duplicate(&self, existing: &str, current: &str) {
        self.push(Event::Duplicate(existing.to_string(), current.to_string()));
    }

    fn on_file_error(&self, path: &Path, error: &dyn std::error::Error) {
        self.push(Event::FileError(path.to_path_buf(), error.to_string()));
    }

    fn on_complete(&self, processed: usize, groups: usize) {
        self.push(Event::Complete(processed, groups));
    }
}
