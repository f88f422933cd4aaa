//! Load stage: persist the star schema into a SQLite warehouse.
//!
//! The warehouse is recreated on every run from a DDL script (embedded by
//! default), loaded dimensions first, and validated by row count.

mod error;
mod insert;
pub mod warehouse;

pub use error::{LoadError, Result};
pub use warehouse::{
    DEFAULT_DDL, LoadOptions, LoadSummary, count_rows, load_star_schema, open_warehouse,
};
