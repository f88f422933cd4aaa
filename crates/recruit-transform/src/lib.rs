//! Transform stage of the recruitment warehouse ETL.
//!
//! This crate turns extracted application rows into a star schema:
//!
//! - **cleanse**: drop incomplete rows, trim text fields
//! - **rules**: apply the hiring decision
//! - **dimension**: generic surrogate key assignment
//! - **dimensions**: the five warehouse dimensions
//! - **fact**: fact rows with foreign key resolution
//! - **integrity**: referential integrity accounting
//! - **pipeline**: the orchestrated sequence of all of the above

pub mod cleanse;
pub mod dimension;
pub mod dimensions;
mod error;
pub mod fact;
pub mod integrity;
pub mod pipeline;
pub mod rules;

pub use cleanse::{CleanseOutcome, CleanseReport, clean};
pub use dimension::{SortPolicy, build_dimension, verify_assignment};
pub use dimensions::{build_dimensions, candidate_identity};
pub use error::{Result, TransformError};
pub use fact::{FactTable, build_fact};
pub use integrity::IntegrityReport;
pub use pipeline::{TransformOptions, TransformOutput, apply_policy, transform};
pub use rules::{HiringSummary, apply_hiring_rule, is_hired};
