//! KPI reporting and CSV export for the recruitment warehouse.

pub mod chart;
pub mod dashboard;
mod error;
pub mod export;
pub mod frames;
pub mod kpi;

pub use chart::render_chart;
pub use dashboard::{KpiArtifacts, write_dashboard};
pub use error::{ReportError, Result};
pub use export::{ExportedTable, export_frames, export_tables};
pub use frames::{read_table_frame, star_schema_frames};
pub use kpi::{KpiKind, KpiOptions, KpiTable, query_dashboard, query_kpi};
