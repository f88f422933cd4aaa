//! Error types for recruitment data extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Schema defects and I/O failures found while extracting the source CSV.
///
/// All of these are fatal: nothing reaches the transform stage.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty or has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Schema Errors ===
    /// Expected columns are absent from the header.
    #[error("missing columns in {path}: {}", columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    /// A column that must hold numbers was read with another type.
    #[error("column '{column}' in {path} is not numeric (found {dtype})")]
    NonNumericColumn {
        column: String,
        dtype: String,
        path: PathBuf,
    },

    /// A non-empty application date could not be parsed.
    #[error("invalid date '{value}' in column '{column}' at data row {row} of {path}")]
    InvalidDate {
        column: String,
        value: String,
        row: usize,
        path: PathBuf,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_are_listed() {
        let err = IngestError::MissingColumns {
            path: PathBuf::from("candidates.csv"),
            columns: vec!["YOE".to_string(), "Email".to_string()],
        };
        assert_eq!(err.to_string(), "missing columns in candidates.csv: YOE, Email");
    }

    #[test]
    fn polars_errors_convert() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("Email".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
