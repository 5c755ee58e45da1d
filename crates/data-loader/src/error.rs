//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while ingesting the ratings CSV
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open ratings file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Underlying CSV-level failure (malformed quoting, bad UTF-8, ...)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A required column is missing from the header row
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { column: String, path: String },

    /// A data row couldn't be deserialized
    #[error("Parse error at line {line} in {path}: {reason}")]
    ParseError {
        path: String,
        line: u64,
        reason: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
