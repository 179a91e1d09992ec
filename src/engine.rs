//! Walk engine: keeps the index in step with a directory tree.
//!
//! # Overview
//!
//! For every supported file under the walk root the engine decides, in
//! order:
//!
//! 1. **Already known** - the normalized path is in the index. The file is
//!    assumed unchanged and is not hashed again.
//! 2. **Hash** - compute the content digest.
//! 3. **Reverse lookup** by digest:
//!    - no entry: a **new** file, inserted;
//!    - the entry is this path: **consistent**, nothing to do;
//!    - the entry's path no longer exists under the index root: the file
//!      was **moved**, the entry is repointed;
//!    - the entry's path still exists: a **duplicate**, recorded in the
//!      [`DuplicateTracker`].
//!
//! Failures on a single file are reported and the walk moves on. Only
//! failing to open the store or resolve a root aborts a run.
//!
//! # Example
//!
//! ```no_run
//! use mediadex::engine::update_index;
//! use std::path::Path;
//!
//! let groups = update_index(Path::new("/photos"), Path::new("/photos/incoming"))?;
//! for group in &groups {
//!     println!("{} <-> {}", group.original_folder, group.new_folder);
//! }
//! # Ok::<(), mediadex::engine::EngineError>(())
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, DuplicateTracker};
use crate::index::{HashIndex, IndexError};
use crate::reporter::{IndexReporter, LogReporter};
use crate::scanner::path_utils::{display_key, fold_case, relative_to, PathResolver};
use crate::scanner::{
    Digest, FileVisit, HashError, Hasher, MediaKind, ScanError, Walker, WalkerConfig,
};

/// Default number of files between progress events.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Errors that abort an indexing run.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// A root directory could not be resolved to an absolute path.
    #[error("Cannot resolve {path}: {source}")]
    ResolveRoot {
        /// The path as given
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The store could not be opened or initialised.
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Errors confined to a single file. Reported, never propagated.
#[derive(thiserror::Error, Debug)]
pub enum FileError {
    /// The traversal could not read this entry.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// A store read or write for this file failed.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// The file has no path relative to the index root.
    #[error("Cannot express {0} relative to the index root")]
    OutsideRoot(PathBuf),
}

/// What the engine did with one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Path already indexed; not hashed.
    Unchanged,
    /// First sighting of this content; inserted.
    New(Digest),
    /// Digest already mapped to this very path.
    Consistent,
    /// Entry repointed from the old (vanished) path.
    Moved {
        /// Index key the entry used to have
        from: String,
    },
    /// Same content exists at another live path.
    Duplicate {
        /// On-disk display path of the existing copy
        existing: String,
    },
}

/// Tuning for an [`Indexer`].
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Emit a progress event every this many files (0 disables).
    pub progress_interval: usize,
    /// Traversal options.
    pub walker: WalkerConfig,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            walker: WalkerConfig::default(),
        }
    }
}

impl IndexerConfig {
    /// Set the progress interval.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Enable or disable symlink following.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.walker = self.walker.with_follow_symlinks(follow);
        self
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    /// Supported files visited
    pub visited: usize,
    /// Files skipped because their path was already indexed
    pub unchanged: usize,
    /// Files inserted
    pub new_files: usize,
    /// Entries repointed to a new path
    pub moved: usize,
    /// Files whose digest already pointed at them
    pub consistent: usize,
    /// Duplicate pairs recorded
    pub duplicates: usize,
    /// Files that failed and were skipped
    pub errors: usize,
    /// Wall time of the walk
    #[serde(skip)]
    pub duration: Duration,
}

impl IndexSummary {
    fn count(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::New(_) => self.new_files += 1,
            FileOutcome::Consistent => self.consistent += 1,
            FileOutcome::Moved { .. } => self.moved += 1,
            FileOutcome::Duplicate { .. } => self.duplicates += 1,
        }
    }
}

/// The indexing engine, bound to one store for its lifetime.
pub struct Indexer {
    store: HashIndex,
    store_root: PathBuf,
    hasher: Hasher,
    reporter: Arc<dyn IndexReporter>,
    config: IndexerConfig,
    resolver: RefCell<PathResolver>,
}

impl std::fmt::Debug for Indexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("store", &self.store)
            .field("store_root", &self.store_root)
            .field("reporter", &"<reporter>")
            .field("config", &self.config)
            .finish()
    }
}

impl Indexer {
    /// Open the store in `store_root` and resolve the root to an absolute
    /// path. The directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the store cannot be opened or the root
    /// cannot be resolved.
    pub fn open(store_root: &Path, reporter: Arc<dyn IndexReporter>) -> Result<Self, EngineError> {
        let store = HashIndex::open(store_root)?;
        let store_root = resolve_root(store_root)?;
        log::debug!("Index root resolved to {}", store_root.display());

        Ok(Self {
            store,
            store_root,
            hasher: Hasher::new(),
            reporter,
            config: IndexerConfig::default(),
            resolver: RefCell::new(PathResolver::new()),
        })
    }

    /// Replace the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: IndexerConfig) -> Self {
        self.config = config;
        self
    }

    /// Absolute index root. Paths in results are relative to it.
    #[must_use]
    pub fn store_root(&self) -> &Path {
        &self.store_root
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &HashIndex {
        &self.store
    }

    /// Index key for an arbitrary path (relative or absolute, existing or
    /// not).
    ///
    /// # Errors
    ///
    /// Returns [`FileError::OutsideRoot`] if the path cannot be expressed
    /// relative to the index root.
    pub fn key_for(&self, path: &Path) -> Result<String, FileError> {
        let absolute = path
            .canonicalize()
            .or_else(|_| std::path::absolute(path))
            .map_err(|_| FileError::OutsideRoot(path.to_path_buf()))?;
        self.display_path(&absolute).map(|d| fold_case(&d))
    }

    /// Walk `walk_root` and bring the index up to date.
    ///
    /// Returns the duplicate groups found during this walk and the run's
    /// counters. Group order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ResolveRoot`] if `walk_root` cannot be
    /// resolved. Per-file failures go to the reporter instead.
    pub fn run(&self, walk_root: &Path) -> Result<(Vec<DuplicateGroup>, IndexSummary), EngineError> {
        let walk_root = resolve_root(walk_root)?;
        let start = Instant::now();
        log::info!(
            "Indexing {} into {}",
            walk_root.display(),
            self.store_root.display()
        );

        self.resolver.borrow_mut().clear();
        let walker = Walker::new(&walk_root, self.config.walker.clone());
        let mut tracker = DuplicateTracker::new();
        let mut summary = IndexSummary::default();

        for visit in walker.walk() {
            let visit = match visit {
                Ok(visit) => visit,
                Err(e) => {
                    summary.errors += 1;
                    let path = scan_error_path(&e)
                        .unwrap_or(walk_root.as_path())
                        .to_path_buf();
                    self.reporter.on_file_error(&path, &FileError::from(e));
                    continue;
                }
            };

            summary.visited += 1;
            match self.process(&visit, &mut tracker) {
                Ok(outcome) => summary.count(&outcome),
                Err(e) => {
                    summary.errors += 1;
                    self.reporter.on_file_error(&visit.path, &e);
                }
            }

            if self.config.progress_interval > 0
                && summary.visited % self.config.progress_interval == 0
            {
                self.reporter.on_progress(summary.visited);
            }
        }

        let groups = tracker.into_groups();
        summary.duration = start.elapsed();
        self.reporter.on_complete(summary.visited, groups.len());

        Ok((groups, summary))
    }

    /// Apply the per-file state machine to one visited file.
    ///
    /// # Errors
    ///
    /// Returns [`FileError`] when this file cannot be processed. The store
    /// is left without a digest for the path, so the next run retries it.
    pub fn process(
        &self,
        visit: &FileVisit,
        tracker: &mut DuplicateTracker,
    ) -> Result<FileOutcome, FileError> {
        let display = self.display_path(&visit.path)?;
        let key = fold_case(&display);

        if self.store.digest_for_path(&key)?.is_some() {
            log::trace!("Already indexed: {}", key);
            return Ok(FileOutcome::Unchanged);
        }

        let digest = self.hash(&visit.path, visit.kind)?;

        // Normally one row; older stores may carry several per digest
        let existing = self.store.paths_for_digest(&digest)?;
        let Some(first) = existing.first().cloned() else {
            self.store.insert(&key, &digest)?;
            self.reporter.on_new(&display);
            return Ok(FileOutcome::New(digest));
        };

        if existing.iter().any(|path| *path == key) {
            return Ok(FileOutcome::Consistent);
        }

        let live = {
            let mut resolver = self.resolver.borrow_mut();
            existing
                .iter()
                .find_map(|path| resolver.resolve(&self.store_root, path))
        };

        match live {
            None => {
                self.store.update_path(&first, &key, &digest)?;
                self.reporter.on_moved(&first, &display);
                Ok(FileOutcome::Moved { from: first })
            }
            Some(on_disk) => {
                let existing_display = relative_to(&self.store_root, &on_disk)
                    .map_or_else(|| first.clone(), |rel| display_key(&rel));
                tracker.record(&existing_display, &display);
                self.reporter.on_duplicate(&existing_display, &display);
                Ok(FileOutcome::Duplicate {
                    existing: existing_display,
                })
            }
        }
    }

    /// Hash one file with the engine's hasher.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be read.
    pub fn hash(&self, path: &Path, kind: MediaKind) -> Result<Digest, HashError> {
        self.hasher.hash(path, kind)
    }

    /// Close the store.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if SQLite reports a failure on close.
    pub fn close(self) -> Result<(), IndexError> {
        self.store.close()
    }

    /// Relative display path (on-disk spelling, `/`-separated).
    fn display_path(&self, absolute: &Path) -> Result<String, FileError> {
        relative_to(&self.store_root, absolute)
            .map(|rel| display_key(&rel))
            .ok_or_else(|| FileError::OutsideRoot(absolute.to_path_buf()))
    }
}

/// Build the index in `store_root` from the files under `walk_root`,
/// logging through the `log` facade.
///
/// Returns the duplicate groups found during this walk, in no particular
/// order.
///
/// # Errors
///
/// Returns [`EngineError`] if the store cannot be opened or a root cannot
/// be resolved.
pub fn update_index(store_root: &Path, walk_root: &Path) -> Result<Vec<DuplicateGroup>, EngineError> {
    let indexer = Indexer::open(store_root, Arc::new(LogReporter::new()))?;
    let (groups, _summary) = indexer.run(walk_root)?;
    indexer.close()?;
    Ok(groups)
}

fn resolve_root(path: &Path) -> Result<PathBuf, EngineError> {
    path.canonicalize().map_err(|source| EngineError::ResolveRoot {
        path: path.to_path_buf(),
        source,
    })
}

fn scan_error_path(error: &ScanError) -> Option<&Path> {
    match error {
        ScanError::PermissionDenied(p) | ScanError::NotFound(p) | ScanError::Loop(p) => Some(p),
        ScanError::Io { path, .. } => Some(path),
    }
}
