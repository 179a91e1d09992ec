//! SQLite-backed path <-> digest index.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use super::IndexEntry;
use crate::scanner::Digest;

/// File name of the store inside the index root.
pub const STORE_FILE_NAME: &str = "image_hash.sqlite3";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS ImageHash (path varchar primary key, hash varchar);
    CREATE INDEX IF NOT EXISTS Index_hash ON ImageHash(hash);
";

/// Errors raised by the index store.
#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    /// The store directory could not be created.
    #[error("Failed to create index directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The store file could not be opened.
    #[error("Failed to open index {path}: {source}")]
    Open {
        /// Store file path
        path: PathBuf,
        /// The underlying SQLite error
        #[source]
        source: rusqlite::Error,
    },

    /// The schema could not be created.
    #[error("Failed to create index schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// Another entry already holds this path key.
    #[error("Path already indexed: {0}")]
    PathExists(String),

    /// No entry carries this digest, so there is nothing to repoint.
    #[error("No entry for digest {0}")]
    DigestNotFound(String),

    /// A read or write against the store failed.
    #[error("Index query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Result alias for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Durable index of content digests keyed by normalized relative path.
///
/// The store assumes a single writer for its whole lifetime; concurrent
/// processes touching the same file are unsupported.
pub struct HashIndex {
    conn: Connection,
    location: Option<PathBuf>,
}

impl std::fmt::Debug for HashIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashIndex")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl HashIndex {
    /// Open (or create) the store inside `store_root`.
    ///
    /// The directory is created if missing and the schema is ensured on
    /// every open, so repeated opens never fail on existing objects.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::CreateDir`], [`IndexError::Open`] or
    /// [`IndexError::Schema`]. All of these are fatal for an indexing run.
    pub fn open(store_root: &Path) -> IndexResult<Self> {
        std::fs::create_dir_all(store_root).map_err(|source| IndexError::CreateDir {
            path: store_root.to_path_buf(),
            source,
        })?;

        let file = store_root.join(STORE_FILE_NAME);
        let conn = Connection::open(&file).map_err(|source| IndexError::Open {
            path: file.clone(),
            source,
        })?;
        log::debug!("Opened index at {}", file.display());

        Self::with_connection(conn, Some(file))
    }

    /// Open a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> IndexResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| IndexError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Self::with_connection(conn, None)
    }

    fn with_connection(conn: Connection, location: Option<PathBuf>) -> IndexResult<Self> {
        conn.execute_batch(SCHEMA).map_err(IndexError::Schema)?;
        Ok(Self { conn, location })
    }

    /// Path of the store file, or `None` for in-memory stores.
    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Digest recorded for `path`, or `None` if the path is not indexed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Query`] if the read fails.
    pub fn digest_for_path(&self, path: &str) -> IndexResult<Option<Digest>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT hash FROM ImageHash WHERE path = ?1")?;
        let digest = stmt
            .query_row(params![path], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(digest.map(Digest::from_encoded))
    }

    /// Path currently mapped to `digest`, or `None` if no entry carries it.
    ///
    /// When several rows share the digest the smallest path is returned.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Query`] if the read fails.
    pub fn path_for_digest(&self, digest: &Digest) -> IndexResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT path FROM ImageHash WHERE hash = ?1 ORDER BY path LIMIT 1")?;
        let path = stmt
            .query_row(params![digest.as_str()], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(path)
    }

    /// Every path mapped to `digest`, smallest first.
    ///
    /// A store normally holds one row per digest; older stores may hold
    /// several.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Query`] if the read fails.
    pub fn paths_for_digest(&self, digest: &Digest) -> IndexResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT path FROM ImageHash WHERE hash = ?1 ORDER BY path")?;
        let rows = stmt.query_map(params![digest.as_str()], |row| row.get::<_, String>(0))?;
        let paths = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(paths)
    }

    /// Record a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::PathExists`] if the path key is already taken,
    /// or [`IndexError::Query`] for other write failures.
    pub fn insert(&self, path: &str, digest: &Digest) -> IndexResult<()> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO ImageHash (path, hash) VALUES (?1, ?2)")?;
        match stmt.execute(params![path, digest.as_str()]) {
            Ok(_) => Ok(()),
            Err(e) if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                Err(IndexError::PathExists(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Repoint the entry `old_path` (carrying `digest`) at `new_path`.
    ///
    /// Used only when `old_path` no longer exists on disk. Other rows that
    /// share the digest are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DigestNotFound`] if no row matches both
    /// `old_path` and `digest`, [`IndexError::PathExists`] if `new_path` is
    /// already a key, or [`IndexError::Query`] for other write failures.
    pub fn update_path(&self, old_path: &str, new_path: &str, digest: &Digest) -> IndexResult<()> {
        let mut stmt = self
            .conn
            .prepare_cached("UPDATE ImageHash SET path = ?1 WHERE path = ?2 AND hash = ?3")?;
        match stmt.execute(params![new_path, old_path, digest.as_str()]) {
            Ok(0) => Err(IndexError::DigestNotFound(digest.to_string())),
            Ok(_) => Ok(()),
            Err(e) if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                Err(IndexError::PathExists(new_path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Number of entries in the store.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Query`] if the count fails.
    pub fn len(&self) -> IndexResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM ImageHash", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Whether the store has no entries.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Query`] if the count fails.
    pub fn is_empty(&self) -> IndexResult<bool> {
        Ok(self.len()? == 0)
    }

    /// All entries, ordered by path.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Query`] if the read fails.
    pub fn entries(&self) -> IndexResult<Vec<IndexEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT path, hash FROM ImageHash ORDER BY path")?;
        let rows = stmt.query_map([], |row| {
            Ok(IndexEntry::new(
                row.get::<_, String>(0)?,
                Digest::from_encoded(row.get::<_, String>(1)?),
            ))
        })?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Close the underlying connection, surfacing any final error.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Query`] if SQLite reports a failure on close.
    pub fn close(self) -> IndexResult<()> {
        self.conn.close().map_err(|(_, e)| IndexError::Query(e))
    }
}
