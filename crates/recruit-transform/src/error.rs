//! Error types for the transform stage.

use recruit_model::TableName;
use thiserror::Error;

use crate::integrity::IntegrityReport;

/// Fatal transform failures.
///
/// Missing values are not errors: the cleanser recovers from them by dropping
/// rows and reporting counts.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Surrogate keys of a dimension have gaps or duplicates.
    #[error("surrogate key assignment for {table} is broken: {detail}")]
    Assignment { table: TableName, detail: String },

    /// The dimension would need more keys than the key type holds.
    #[error("{table} has {members} members, more than a surrogate key can address")]
    KeySpaceExhausted { table: TableName, members: usize },

    /// Fact rows reference natural keys with no dimension row and the
    /// caller asked to abort.
    #[error("referential integrity check failed: {report}")]
    ReferentialIntegrity { report: IntegrityReport },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
