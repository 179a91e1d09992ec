//! Duplicate tracking module.
//!
//! This module provides functionality for:
//! - Canonical, order-independent folder pair keys ([`FolderPair`])
//! - Accumulating duplicate file pairs during a walk ([`DuplicateTracker`])
//! - The per-folder-pair result records handed to callers ([`DuplicateGroup`])

pub mod groups;

pub use groups::{DuplicateGroup, DuplicateTracker, FolderPair};
