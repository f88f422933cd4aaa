//! Data model for the recruitment warehouse.
//!
//! - **record**: application rows as extracted and as validated
//! - **dimension**: surrogate-keyed dimension tables and their natural keys
//! - **schema**: the fact table and the full star schema table set
//! - **options**: hiring thresholds and integrity policy shared by stages

pub mod dimension;
pub mod options;
pub mod record;
pub mod schema;

pub use dimension::{CandidateIdentity, DateAttributes, Dimension, SurrogateKey};
pub use options::{HiringThresholds, IntegrityPolicy};
pub use record::{ApplicationRecord, RawApplication, ScoredApplication};
pub use schema::{DimensionSet, FactApplication, ForeignKey, StarSchema, TableName};
