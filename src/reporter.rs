//! Event reporting for indexing runs.
//!
//! The engine does not log on its own behalf. It is handed an
//! [`IndexReporter`] at construction and tells it what happened to each
//! file. [`LogReporter`] forwards events to the `log` facade; tests pass a
//! recording implementation or [`NullReporter`].
//!
//! # Example
//!
//! ```no_run
//! use mediadex::engine::Indexer;
//! use mediadex::reporter::LogReporter;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let indexer = Indexer::open(Path::new("."), Arc::new(LogReporter::new()))?;
//! # Ok::<(), mediadex::engine::EngineError>(())
//! ```

use std::path::Path;

/// Receiver for indexing events.
///
/// All methods except [`on_file_error`](IndexReporter::on_file_error) have
/// empty defaults so implementations only override what they need.
pub trait IndexReporter: Send + Sync {
    /// Called every `progress_interval` processed files.
    ///
    /// # Arguments
    ///
    /// * `processed` - Number of supported files processed so far
    fn on_progress(&self, _processed: usize) {}

    /// A file was hashed and indexed for the first time.
    fn on_new(&self, _path: &str) {}

    /// Indexed content whose old path is gone was found at a new path.
    fn on_moved(&self, _from: &str, _to: &str) {}

    /// Content already indexed under another existing path was found again.
    fn on_duplicate(&self, _existing: &str, _current: &str) {}

    /// Processing of one file failed; the walk continues.
    fn on_file_error(&self, path: &Path, error: &dyn std::error::Error);

    /// The walk finished.
    fn on_complete(&self, _processed: usize, _groups: usize) {}
}

/// Reporter that forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl LogReporter {
    /// Create a new log-backed reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl IndexReporter for LogReporter {
    fn on_progress(&self, processed: usize) {
        log::info!("Processed {} files", processed);
    }

    fn on_new(&self, path: &str) {
        log::debug!("Indexed new file {}", path);
    }

    fn on_moved(&self, from: &str, to: &str) {
        log::debug!("File moved: {} -> {}", from, to);
    }

    fn on_duplicate(&self, existing: &str, current: &str) {
        log::info!("Duplicate: {} and {}", existing, current);
    }

    fn on_file_error(&self, path: &Path, error: &dyn std::error::Error) {
        log::warn!("Skipping {}: {}", path.display(), error);
    }

    fn on_complete(&self, processed: usize, groups: usize) {
        log::info!(
            "Indexing complete: {} files processed, {} duplicate group(s)",
            processed,
            groups
        );
    }
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl IndexReporter for NullReporter {
    fn on_file_error(&self, _path: &Path, _error: &dyn std::error::Error) {}
}
