//! Error types for store and interchange operations.

use thiserror::Error;

/// Errors surfaced by task creation and import/export.
///
/// Per-row problems during import (bad id, bad date, unknown priority or
/// category) are not errors: each field falls back to its documented default
/// and the row is still imported.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Task name is empty after trimming.
    #[error("Task name cannot be empty")]
    EmptyName,

    /// Import/export file extension is neither csv nor json.
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    /// JSON import payload did not decode to an array of task records.
    #[error("JSON payload is not an array of tasks")]
    NotAnArray,

    /// CSV import is missing a required column.
    #[error("CSV file is missing required column: '{0}'")]
    MissingColumn(&'static str),

    /// CSV import produced zero usable rows after skipping blanks.
    #[error("No valid task rows found in import")]
    NoValidRows,

    /// IO error from the file layer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
