//! Directory walker yielding supported media files.
//!
//! # Overview
//!
//! [`Walker`] wraps [`walkdir`] to produce a lazy, one-shot sequence of
//! [`FileVisit`] records. Traversal is single-threaded and children are
//! visited in file-name order so repeated runs see files in the same order.
//!
//! Only regular files whose lowercased extension is a supported picture or
//! video extension are yielded; everything else is skipped silently.
//! Traversal errors are yielded as [`ScanError`] values rather than stopping
//! iteration.
//!
//! # Example
//!
//! ```no_run
//! use mediadex::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Pictures"), WalkerConfig::default());
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} media files", files.len());
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileVisit, MediaKind, ScanError, WalkerConfig};

/// Sequential directory walker for media discovery.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory tree, yielding supported media files.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileVisit, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        if entry.path_is_symlink() && !self.config.follow_symlinks {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        return None;
                    }

                    let path = entry.into_path();
                    match MediaKind::from_path(&path) {
                        Some(kind) => Some(Ok(FileVisit::new(path, kind))),
                        None => {
                            log::trace!("Ignoring unsupported file: {}", path.display());
                            None
                        }
                    }
                }
                Err(e) => Some(Err(self.handle_walkdir_error(e))),
            })
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn handle_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        use std::io::ErrorKind;

        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            log::warn!(
                "Symlink loop: {} points back to {}",
                path.display(),
                ancestor.display()
            );
            return ScanError::Loop(path);
        }

        match error.io_error().map(std::io::Error::kind) {
            Some(ErrorKind::PermissionDenied) => {
                log::warn!("Permission denied: {}", path.display());
                ScanError::PermissionDenied(path)
            }
            Some(ErrorKind::NotFound) => {
                log::debug!("Path not found (may have been deleted): {}", path.display());
                ScanError::NotFound(path)
            }
            _ => {
                log::warn!("Walker error for {}: {}", path.display(), error);
                ScanError::Io {
                    path,
                    source: std::io::Error::other(error.to_string()),
                }
            }
        }
    }
}
