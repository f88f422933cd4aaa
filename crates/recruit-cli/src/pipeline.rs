//! Stage orchestration for the CLI commands.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use recruit_ingest::read_applications;
use recruit_load::{LoadSummary, load_star_schema, open_warehouse};
use recruit_report::{
    ExportedTable, KpiTable, export_frames, export_tables, query_dashboard, star_schema_frames,
    write_dashboard,
};
use recruit_transform::{CleanseReport, HiringSummary, IntegrityReport, transform};
use tracing::{info, info_span};

use crate::config::PipelineConfig;

/// Outcome of one `run`.
#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub extracted_rows: usize,
    pub cleanse: CleanseReport,
    pub hiring: HiringSummary,
    pub integrity: IntegrityReport,
    pub load: LoadSummary,
    pub exported: Vec<ExportedTable>,
}

impl RunResult {
    /// Unresolved foreign keys were persisted under the `proceed` policy.
    pub fn integrity_flagged(&self) -> bool {
        !self.integrity.is_clean()
    }
}

/// Extract, transform, and load; with `export`, also write the table CSVs.
pub fn run_pipeline(config: &PipelineConfig, export: bool) -> Result<RunResult> {
    let input = config.paths.input.clone();
    let run_span = info_span!("run", input = %input.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let extract_options = config.extract_options()?;
    let extract_start = Instant::now();
    let batch = info_span!("extract")
        .in_scope(|| read_applications(&input, &extract_options))
        .with_context(|| format!("extract {}", input.display()))?;
    info!(
        rows = batch.row_count(),
        columns = batch.column_count,
        duration_ms = extract_start.elapsed().as_millis(),
        "extract complete"
    );

    let output = transform(&batch.rows, &config.transform_options()).context("transform")?;

    let load_options = config.load_options();
    let load = info_span!("load", database = %load_options.database.display())
        .in_scope(|| load_star_schema(&output.schema, &load_options))
        .with_context(|| format!("load {}", load_options.database.display()))?;

    let exported = if export {
        let export_dir = &config.paths.export_dir;
        info_span!("export", dir = %export_dir.display())
            .in_scope(|| {
                let frames = star_schema_frames(&output.schema)?;
                export_frames(frames, export_dir)
            })
            .with_context(|| format!("export to {}", export_dir.display()))?
    } else {
        Vec::new()
    };

    info!(
        hired = output.hiring.hired,
        dropped = output.cleanse.dropped_rows,
        duration_ms = start.elapsed().as_millis(),
        "pipeline complete"
    );

    Ok(RunResult {
        input,
        extracted_rows: batch.row_count(),
        cleanse: output.cleanse,
        hiring: output.hiring,
        integrity: output.integrity,
        load,
        exported,
    })
}

/// Query the six KPIs from an existing warehouse; with `write_files`, also
/// write their chart and data files to the report directory.
pub fn run_report(config: &PipelineConfig, write_files: bool) -> Result<Vec<KpiTable>> {
    let database = &config.paths.database;
    let conn = open_warehouse(database).with_context(|| format!("open {}", database.display()))?;
    let kpis = info_span!("report", database = %database.display())
        .in_scope(|| query_dashboard(&conn, &config.kpi_options()))
        .context("query KPIs")?;
    if write_files {
        let report_dir = &config.paths.report_dir;
        write_dashboard(&kpis, report_dir)
            .with_context(|| format!("write reports to {}", report_dir.display()))?;
    }
    Ok(kpis)
}

/// Export every table of an existing warehouse to CSV.
pub fn run_export(config: &PipelineConfig) -> Result<Vec<ExportedTable>> {
    let database = &config.paths.database;
    let export_dir = &config.paths.export_dir;
    let conn = open_warehouse(database).with_context(|| format!("open {}", database.display()))?;
    info_span!("export", dir = %export_dir.display())
        .in_scope(|| export_tables(&conn, export_dir))
        .with_context(|| format!("export to {}", export_dir.display()))
}
