//! Index entry definitions.

use serde::{Deserialize, Serialize};

use crate::scanner::Digest;

/// A single row of the index.
///
/// `path` is the normalized key (relative to the index root, NFC,
/// lowercased, `/`-separated) and is unique. `digest` is the content
/// fingerprint and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Normalized relative path (primary key)
    pub path: String,
    /// Content digest
    pub digest: Digest,
}

impl IndexEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(path: impl Into<String>, digest: Digest) -> Self {
        Self {
            path: path.into(),
            digest,
        }
    }
}
