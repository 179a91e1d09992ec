//! Content hasher producing index digests.
//!
//! # Overview
//!
//! Pictures are streamed in full through MD5 in [`CHUNK_SIZE`] reads.
//! Videos mix in the file length (8 bytes, little-endian) followed by at most
//! [`VIDEO_PREFIX_CHUNKS`] chunks of content. Two videos with the same length
//! and the same first 10 KiB therefore share a digest; this is accepted in
//! exchange for constant-cost hashing of large files.
//!
//! Digests are rendered as unpadded base32 text.
//!
//! # Example
//!
//! ```no_run
//! use mediadex::scanner::{Hasher, MediaKind};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.hash(Path::new("IMG_0001.jpg"), MediaKind::Picture)?;
//! println!("{digest}");
//! # Ok::<(), mediadex::scanner::HashError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use data_encoding::BASE32_NOPAD;
use md5::{Digest as _, Md5};
use serde::{Deserialize, Serialize};

use super::{HashError, MediaKind};

/// Read size for every hashing strategy (1 KiB).
pub const CHUNK_SIZE: usize = 1024;

/// Number of chunks read from the start of a video.
pub const VIDEO_PREFIX_CHUNKS: u64 = 10;

/// Text fingerprint of file content.
///
/// Opaque base32 string; equality of digests is the index's proxy for
/// equality of content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Wrap an already-encoded digest string (e.g. read back from the store).
    #[must_use]
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        Self(BASE32_NOPAD.encode(bytes))
    }

    /// The encoded digest text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the encoded digest text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stateless content hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher {
    _private: (),
}

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the digest for `path` using the strategy for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read. The file
    /// handle is released on every path out of this function.
    pub fn hash(&self, path: &Path, kind: MediaKind) -> Result<Digest, HashError> {
        match kind {
            MediaKind::Picture => self.full_hash(path),
            MediaKind::Video => self.video_hash(path),
        }
    }

    /// Hash the entire file content.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] on open or read failure.
    pub fn full_hash(&self, path: &Path) -> Result<Digest, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let mut hasher = Md5::new();
        stream_into(&mut hasher, file, path)?;
        Ok(Digest::from_bytes(&hasher.finalize()))
    }

    /// Hash the file length followed by the first ten chunks of content.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] on open, stat, or read failure.
    pub fn video_hash(&self, path: &Path) -> Result<Digest, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| HashError::from_io(path, e))?
            .len();

        let mut hasher = Md5::new();
        hasher.update(size.to_le_bytes());
        let prefix = file.take(VIDEO_PREFIX_CHUNKS * CHUNK_SIZE as u64);
        stream_into(&mut hasher, prefix, path)?;
        Ok(Digest::from_bytes(&hasher.finalize()))
    }
}

/// Feed `reader` into `hasher` in [`CHUNK_SIZE`] reads until end of stream.
fn stream_into<R: Read>(hasher: &mut Md5, mut reader: R, path: &Path) -> Result<(), HashError> {
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(n) => hasher.update(&buffer[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(HashError::from_io(path, e)),
        }
    }
}
