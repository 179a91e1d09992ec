//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the mediadex binary.
///
/// - 0: Success (run completed, no duplicates reported)
/// - 1: General error (fatal failure, e.g. the index could not be opened)
/// - 2: Duplicates found (run completed, duplicate groups reported)
/// - 3: Partial success (run completed but some files were skipped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Run completed and no duplicates were found.
    Success = 0,
    /// General error: An unrecoverable error occurred.
    GeneralError = 1,
    /// Duplicates: Run completed and duplicate groups were reported.
    DuplicatesFound = 2,
    /// Partial success: Run completed but some files failed.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "MX000",
            Self::GeneralError => "MX001",
            Self::DuplicatesFound => "MX002",
            Self::PartialSuccess => "MX003",
        }
    }

    /// Pick the exit code for a completed run.
    ///
    /// Per-file errors take precedence over found duplicates.
    #[must_use]
    pub fn for_run(duplicate_groups: usize, file_errors: usize) -> Self {
        if file_errors > 0 {
            Self::PartialSuccess
        } else if duplicate_groups > 0 {
            Self::DuplicatesFound
        } else {
            Self::Success
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "MX001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
