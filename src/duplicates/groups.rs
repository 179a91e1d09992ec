//! Folder-pair grouping of duplicate files.
//!
//! # Overview
//!
//! When the engine finds content that is already indexed under another
//! existing path, it records the pair here. Pairs are grouped by the two
//! folders involved. The key is a [`FolderPair`], an unordered pair made
//! canonical by sorting, so `(X, Y)` and `(Y, X)` land in the same group.
//!
//! A group remembers the orientation of its first pair: the folder of the
//! file that was already indexed is the "original" side. Later pairs are
//! placed by folder, so every file on one side lives in the same folder.
//!
//! # Example
//!
//! ```
//! use mediadex::duplicates::DuplicateTracker;
//!
//! let mut tracker = DuplicateTracker::new();
//! tracker.record("2023/Trip/a.jpg", "Backup/a.jpg");
//! tracker.record("Backup/b.jpg", "2023/Trip/b.jpg");
//!
//! let groups = tracker.into_groups();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].original_folder, "2023/Trip");
//! assert_eq!(groups[0].original_files, vec!["2023/Trip/a.jpg", "2023/Trip/b.jpg"]);
//! assert_eq!(groups[0].new_files, vec!["Backup/a.jpg", "Backup/b.jpg"]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scanner::path_utils::{fold_case, parent_key};

/// Unordered pair of folder keys, stored in sorted order.
///
/// Folder keys are compared in folded (NFC, lowercase) form so that the
/// same directory spelled differently maps to one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderPair {
    first: String,
    second: String,
}

impl FolderPair {
    /// Build the canonical pair for two folders, in either order.
    #[must_use]
    pub fn new(a: &str, b: &str) -> Self {
        let a = fold_case(a);
        let b = fold_case(b);
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The lexicographically smaller folder key.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The lexicographically larger folder key.
    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Whether both sides are the same folder.
    #[must_use]
    pub fn is_same_folder(&self) -> bool {
        self.first == self.second
    }
}

/// Duplicate files shared between two folders.
///
/// Paths are relative to the index root, `/`-separated, in their on-disk
/// spelling. Files at the index root have folder `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Folder of the previously indexed copies
    pub original_folder: String,
    /// Folder of the newly found copies
    pub new_folder: String,
    /// Previously indexed copies, in discovery order
    pub original_files: Vec<String>,
    /// Newly found copies, in discovery order
    pub new_files: Vec<String>,
}

impl DuplicateGroup {
    /// Create an empty group oriented as `original` -> `new`.
    #[must_use]
    pub fn new(original_folder: impl Into<String>, new_folder: impl Into<String>) -> Self {
        Self {
            original_folder: original_folder.into(),
            new_folder: new_folder.into(),
            original_files: Vec::new(),
            new_files: Vec::new(),
        }
    }

    /// Canonical key of this group.
    #[must_use]
    pub fn key(&self) -> FolderPair {
        FolderPair::new(&self.original_folder, &self.new_folder)
    }

    /// Number of recorded files on both sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.original_files.len() + self.new_files.len()
    }

    /// Whether no file has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original_files.is_empty() && self.new_files.is_empty()
    }

    /// Add one duplicate pair, placing each file on the side of its folder.
    fn add_pair(&mut self, existing: &str, current: &str) {
        let original_key = fold_case(&self.original_folder);
        let (to_original, to_new) = if fold_case(parent_key(existing)) == original_key {
            (existing, current)
        } else {
            (current, existing)
        };
        push_unique(&mut self.original_files, to_original);
        push_unique(&mut self.new_files, to_new);
    }
}

fn push_unique(files: &mut Vec<String>, file: &str) {
    if !files.iter().any(|f| f == file) {
        files.push(file.to_string());
    }
}

/// In-memory accumulator of duplicate pairs for one walk.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    groups: BTreeMap<FolderPair, DuplicateGroup>,
    pairs: usize,
}

impl DuplicateTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `current` has the same content as the already indexed
    /// `existing`. Both are relative display paths.
    ///
    /// The first pair for a folder pair fixes the orientation: `existing`'s
    /// folder becomes the original side. Later pairs are placed by folder,
    /// not by role, so when a later pair is discovered the other way round
    /// its `existing` file is listed under `new_files`.
    pub fn record(&mut self, existing: &str, current: &str) {
        let existing_folder = parent_key(existing);
        let current_folder = parent_key(current);
        let key = FolderPair::new(existing_folder, current_folder);

        log::trace!(
            "Duplicate pair {} <-> {} under ({}, {})",
            existing,
            current,
            key.first(),
            key.second()
        );

        self.groups
            .entry(key)
            .or_insert_with(|| DuplicateGroup::new(existing_folder, current_folder))
            .add_pair(existing, current);
        self.pairs += 1;
    }

    /// Number of pairs recorded so far.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs
    }

    /// Number of distinct folder pairs seen so far.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Look up the group for a folder pair.
    #[must_use]
    pub fn get(&self, key: &FolderPair) -> Option<&DuplicateGroup> {
        self.groups.get(key)
    }

    /// Consume the tracker and emit its groups.
    ///
    /// Callers must not rely on the order of the returned groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        self.groups.into_values().collect()
    }
}
