//! Scanner module for directory traversal and content hashing.
//!
//! This module provides functionality for:
//! - Sequential directory walking using walkdir
//! - Media kind classification by file extension
//! - Content digests (full MD5 for pictures, size + prefix for videos)
//! - Unicode and case normalization of index keys
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`media`]: Supported extensions and [`MediaKind`] classification
//! - [`hasher`]: Content hashing (streaming)
//! - [`walker`]: Directory traversal yielding [`FileVisit`] records
//! - [`path_utils`]: Relative, NFC, lowercased index keys
//!
//! # Example
//!
//! ```no_run
//! use mediadex::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for visit in walker.walk() {
//!     match visit {
//!         Ok(file) => println!("{} ({:?})", file.path.display(), file.kind),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod media;
pub mod path_utils;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{Digest, Hasher, CHUNK_SIZE, VIDEO_PREFIX_CHUNKS};
pub use media::{MediaKind, PICTURE_EXTENSIONS, VIDEO_EXTENSIONS};
pub use walker::Walker;

/// A supported media file discovered during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileVisit {
    /// Path to the file as produced by the traversal
    pub path: PathBuf,
    /// Classification derived from the lowercased extension
    pub kind: MediaKind,
}

impl FileVisit {
    /// Create a new FileVisit.
    #[must_use]
    pub fn new(path: PathBuf, kind: MediaKind) -> Self {
        Self { path, kind }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// Warning: walkdir detects loops but traversal may still leave the root.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Enable or disable symlink following.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// A symlink cycle was detected while following links.
    #[error("Symlink loop at {0}")]
    Loop(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
