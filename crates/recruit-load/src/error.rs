//! Load stage error types.

use std::path::PathBuf;

use recruit_model::TableName;

/// Errors produced while persisting or reopening the warehouse.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Underlying `SQLite` failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// File-system I/O failure (e.g. creating the database directory).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The DDL override could not be read.
    #[error("failed to read DDL script {path}: {source}")]
    DdlRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted row count differs from the rows handed in.
    #[error("{table} holds {actual} rows after load, expected {expected}")]
    RowCountMismatch {
        table: TableName,
        expected: usize,
        actual: usize,
    },

    /// A warehouse was requested for reading but does not exist.
    #[error("warehouse database not found: {path}")]
    DatabaseNotFound { path: PathBuf },
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, LoadError>;
