//! Persistent path <-> digest index.
//!
//! This module provides durable storage for content digests so that repeat
//! runs skip files that were already hashed and can recognise content that
//! reappears under a different path.
//!
//! # Architecture
//!
//! * [`database`]: SQLite persistence, schema management and the lookups
//!   used by the indexing engine.
//! * [`entry`]: The [`IndexEntry`] row model.
//!
//! # Layout
//!
//! The store is a single file, [`STORE_FILE_NAME`], inside the index root.
//! It holds one table keyed by the normalized relative path, with a
//! secondary index on the digest for reverse lookups. Digests are not unique
//! at the storage layer; duplicate detection happens in the engine.

pub mod database;
pub mod entry;

pub use database::{HashIndex, IndexError, IndexResult, STORE_FILE_NAME};
pub use entry::IndexEntry;
