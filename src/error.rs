//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Reasons an expense cannot be constructed from raw input
///
/// Each variant carries the rejected input so callers can report it back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date did not parse as `YYYY-MM-DD`
    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Amount was not numeric, not positive after rounding, or above the maximum
    #[error("Invalid amount '{0}'. Amount must be a valid positive number.")]
    InvalidAmount(String),

    /// Category was empty or not one of the canonical names
    #[error("Invalid category '{0}'")]
    InvalidCategory(String),
}

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Expense construction failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Positional removal outside the collection
    #[error("Invalid expense index {index} (have {len} expenses)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A list number given on the command line that `list` never shows
    #[error("Invalid expense number {number} (list shows {len} expenses, numbered from 1)")]
    InvalidExpenseNumber { number: usize, len: usize },

    /// Unparseable input outside expense construction (e.g. date range bounds)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Backup and restore errors
    #[error("Backup error: {0}")]
    Backup(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl TrackerError {
    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
