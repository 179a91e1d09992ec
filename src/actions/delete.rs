//! Removal of one side of a duplicate group.
//!
//! # Overview
//!
//! After a run the operator may choose to keep the original copies or the
//! new copies of a [`DuplicateGroup`]. This module removes the other side:
//! - Move to system trash (default, recoverable)
//! - Permanent deletion (with explicit configuration)
//!
//! Files that have already disappeared are logged and skipped. The first
//! hard failure stops the removal of that side, leaving the rest in place.
//!
//! The index is not touched here; entries for removed files go stale and
//! the next run resolves them as moved or leaves them orphaned.
//!
//! # Example
//!
//! ```no_run
//! use mediadex::actions::delete::{delete_group_side, Choice, DeleteConfig};
//! use mediadex::duplicates::DuplicateGroup;
//! use std::path::Path;
//!
//! let group = DuplicateGroup::new("2023", "backup");
//! if let Some(side) = Choice::from_input("n").side() {
//!     let result = delete_group_side(Path::new("/photos"), &group, side, &DeleteConfig::trash());
//!     println!("{}", result.summary());
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::DuplicateGroup;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// Permanent delete operation failed.
    #[error("permanent delete failed for {path}: {message}")]
    PermanentDeleteFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::PermanentDeleteFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Which side of a duplicate group to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The previously indexed copies
    Original,
    /// The newly found copies
    New,
}

/// Operator decision for one duplicate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Delete the original files, keep the new ones
    DeleteOriginal,
    /// Delete the new files, keep the originals
    DeleteNew,
    /// Leave both sides alone
    Skip,
}

impl Choice {
    /// Parse an interactive answer: `o`, `n`, anything else skips.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "o" => Self::DeleteOriginal,
            "n" => Self::DeleteNew,
            _ => Self::Skip,
        }
    }

    /// The side to delete, if any.
    #[must_use]
    pub fn side(self) -> Option<Side> {
        match self {
            Self::DeleteOriginal => Some(Side::Original),
            Self::DeleteNew => Some(Side::New),
            Self::Skip => None,
        }
    }
}

/// Result of a successful deletion operation.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// Whether deletion was permanent (true) or to trash (false).
    pub permanent: bool,
}

/// Results of deleting one side of a group.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Files that were already gone.
    pub missing: Vec<PathBuf>,
    /// The failure that stopped the batch, if any.
    pub failures: Vec<(PathBuf, String)>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Deleted {} file(s), freed {} bytes",
            self.success_count(),
            self.bytes_freed
        );
        if !self.missing.is_empty() {
            text.push_str(&format!(", {} already gone", self.missing.len()));
        }
        if !self.all_succeeded() {
            text.push_str(&format!(", {} failed", self.failures.len()));
        }
        text
    }
}

/// Configuration for deletion operations.
#[derive(Debug, Clone, Default)]
pub struct DeleteConfig {
    /// Use permanent deletion instead of trash.
    pub permanent: bool,
}

impl DeleteConfig {
    /// Create config for trash deletion.
    #[must_use]
    pub fn trash() -> Self {
        Self::default()
    }

    /// Create config for permanent deletion.
    #[must_use]
    pub fn permanent() -> Self {
        Self { permanent: true }
    }
}

/// Delete a single file to the system trash.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `TrashFailed` if the trash operation fails
pub fn delete_to_trash(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = fs::metadata(path)
        .map_err(|e| DeleteError::from_io(path, e))?
        .len();

    trash::delete(path).map_err(|e| {
        log::error!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Moved to trash: {} ({} bytes)", path.display(), size);
    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
        permanent: false,
    })
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `PermanentDeleteFailed` if the delete operation fails
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = fs::metadata(path)
        .map_err(|e| DeleteError::from_io(path, e))?
        .len();

    fs::remove_file(path).map_err(|e| {
        log::error!("Permanent delete failed for {}: {}", path.display(), e);
        DeleteError::PermanentDeleteFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Permanently deleted: {} ({} bytes)", path.display(), size);
    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
        permanent: true,
    })
}

/// Delete every file on `side` of `group`.
///
/// Group paths are relative to `root` (the index root). Missing files are
/// skipped with a warning; the first other failure stops the batch.
pub fn delete_group_side(
    root: &Path,
    group: &DuplicateGroup,
    side: Side,
    config: &DeleteConfig,
) -> BatchDeleteResult {
    let files = match side {
        Side::Original => &group.original_files,
        Side::New => &group.new_files,
    };

    let mut result = BatchDeleteResult::default();
    for file in files {
        let path = root.join(file);
        if !path.exists() {
            log::warn!("File does not exist, skipping: {}", path.display());
            result.missing.push(path);
            continue;
        }

        let outcome = if config.permanent {
            permanent_delete(&path)
        } else {
            delete_to_trash(&path)
        };

        match outcome {
            Ok(deleted) => {
                result.bytes_freed += deleted.size;
                result.successes.push(deleted);
            }
            Err(DeleteError::NotFound(p)) => {
                log::warn!("File vanished before deletion: {}", p.display());
                result.missing.push(p);
            }
            Err(e) => {
                log::warn!("Failed to delete {}: {}", path.display(), e);
                result.failures.push((path, e.to_string()));
                break;
            }
        }
    }

    log::info!("{}", result.summary());
    result
}
