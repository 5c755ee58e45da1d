//! CSV ingestion for the scraped ratings file.
//!
//! The scraper emits one CSV with the header `User, Film ID, Rating`,
//! one rating triple per data row. Header names are validated up front so
//! a wrong or truncated file fails with a column name rather than a
//! confusing per-row deserialization error.

use crate::error::{DataLoadError, Result};
use crate::types::RatingRecord;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::debug;

/// Column names the ratings CSV must carry, exactly as the scraper writes
/// them (surrounding whitespace is trimmed before comparison).
pub const REQUIRED_COLUMNS: [&str; 3] = ["User", "Film ID", "Rating"];

/// Load all rating triples from a CSV file on disk.
///
/// Fails with `FileNotFound` if the path does not exist, `MissingColumn`
/// if the header row lacks any required column, and `ParseError` (with
/// line context) for rows that cannot be deserialized.
pub fn load_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: display.clone(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    read_ratings(file, &display)
}

/// Read rating triples from any reader. `path` is only used for error
/// messages.
pub fn read_ratings<R: io::Read>(reader: R, path: &str) -> Result<Vec<RatingRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                column: column.to_string(),
                path: path.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for result in csv_reader.into_deserialize() {
        let record: RatingRecord = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            DataLoadError::ParseError {
                path: path.to_string(),
                line,
                reason: e.to_string(),
            }
        })?;
        records.push(record);
    }

    debug!("Read {} rating records from {}", records.len(), path);
    Ok(records)
}
