//! Error types for reporting and export.

use std::path::PathBuf;

use recruit_model::TableName;
use thiserror::Error;

/// Failures while querying the warehouse or writing report files.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// A stored value has a type the column cannot hold.
    #[error("unsupported value in {table}.{column}: {detail}")]
    UnsupportedValue {
        table: TableName,
        column: String,
        detail: String,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
