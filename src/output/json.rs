//! JSON output formatter for indexing results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "original_folder": "2023/Trip",
//!       "new_folder": "Backup",
//!       "original_files": ["2023/Trip/a.jpg"],
//!       "new_files": ["Backup/a.jpg"]
//!     }
//!   ],
//!   "summary": {
//!     "visited": 100,
//!     "unchanged": 80,
//!     "new_files": 15,
//!     "moved": 3,
//!     "consistent": 0,
//!     "duplicates": 2,
//!     "errors": 0,
//!     "duplicate_groups": 1,
//!     "duration_ms": 1234,
//!     "exit_code": 2,
//!     "exit_code_name": "MX002"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::DuplicateGroup;
use crate::engine::IndexSummary;
use crate::error::ExitCode;

/// Run counters in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Per-file counters of the run
    #[serde(flatten)]
    pub counts: IndexSummary,
    /// Number of folder-pair groups reported
    pub duplicate_groups: usize,
    /// Duration of the walk in milliseconds
    pub duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "MX002")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from run counters and an exit code.
    #[must_use]
    pub fn from_index_summary(summary: &IndexSummary, groups: usize, exit_code: ExitCode) -> Self {
        Self {
            counts: summary.clone(),
            duplicate_groups: groups,
            duration_ms: summary.duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicate groups, one per folder pair
    pub duplicates: Vec<DuplicateGroup>,
    /// Run summary
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from duplicate groups, summary and exit code.
    ///
    /// # Example
    ///
    /// ```
    /// use mediadex::duplicates::DuplicateGroup;
    /// use mediadex::engine::IndexSummary;
    /// use mediadex::error::ExitCode;
    /// use mediadex::output::json::JsonOutput;
    ///
    /// let groups = vec![DuplicateGroup::new("a", "b")];
    /// let output = JsonOutput::new(&groups, &IndexSummary::default(), ExitCode::DuplicatesFound);
    /// assert_eq!(output.summary.duplicate_groups, 1);
    /// ```
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &IndexSummary, exit_code: ExitCode) -> Self {
        Self {
            duplicates: groups.to_vec(),
            summary: JsonSummary::from_index_summary(summary, groups.len(), exit_code),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
