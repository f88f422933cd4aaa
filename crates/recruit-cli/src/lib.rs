//! CLI library components for the recruitment warehouse ETL.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
