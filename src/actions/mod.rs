//! File actions module.
//!
//! This module provides functionality for acting on duplicate groups after
//! an indexing run:
//! - Safe deletion via trash crate
//! - Permanent deletion (with explicit configuration)
//!
//! ```no_run
//! use mediadex::actions::delete::delete_to_trash;
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/photos/backup/IMG_0001.jpg");
//! let result = delete_to_trash(&path);
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_group_side, delete_to_trash, permanent_delete, BatchDeleteResult, Choice,
    DeleteConfig, DeleteError, DeleteResult, Side,
};
