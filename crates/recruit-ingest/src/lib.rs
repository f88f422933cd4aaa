//! Extraction of recruitment candidate data.
//!
//! This crate reads the candidate CSV export with Polars and turns it into
//! typed [`RawApplication`](recruit_model::RawApplication) rows:
//!
//! - **reader**: CSV loading, header matching, schema validation
//! - **values**: AnyValue conversions and date parsing

mod error;
pub mod reader;
pub mod values;

pub use error::{IngestError, Result};
pub use reader::{DEFAULT_SEPARATOR, ExtractOptions, ExtractedBatch, read_applications};
pub use values::parse_date;
