//! Report artifacts: one chart and one data file per KPI.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::chart::render_chart;
use crate::error::{ReportError, Result};
use crate::kpi::{KpiKind, KpiTable};

/// Files written for one KPI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiArtifacts {
    pub kind: KpiKind,
    pub chart: PathBuf,
    pub data: PathBuf,
    pub rows: usize,
}

/// Column names of a KPI data file.
pub fn csv_header(kind: KpiKind) -> &'static [&'static str] {
    match kind {
        KpiKind::HiresByTechnology => &["technology_name", "total_hires"],
        KpiKind::HiresByYear => &["year", "total_hires"],
        KpiKind::HiresBySeniority => &["seniority_level", "total_hires"],
        KpiKind::HiresByCountryYear => &["country_name", "year", "total_hires"],
        KpiKind::HiringRateByTechnology => &[
            "technology_name",
            "total_applications",
            "total_hires",
            "hiring_rate_pct",
        ],
        KpiKind::AvgScoresBySeniority => &[
            "seniority_level",
            "avg_code_challenge",
            "avg_technical_interview",
        ],
    }
}

/// Write `<dir>/kpiN_<name>.txt` and `<dir>/kpiN_<name>.csv` for each KPI.
pub fn write_dashboard(kpis: &[KpiTable], dir: &Path) -> Result<Vec<KpiArtifacts>> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    kpis.iter().map(|kpi| write_kpi(kpi, dir)).collect()
}

fn write_kpi(kpi: &KpiTable, dir: &Path) -> Result<KpiArtifacts> {
    let kind = kpi.kind();
    let stem = kind.file_stem();

    let chart = dir.join(format!("{stem}.txt"));
    let mut text = render_chart(kpi, false);
    text.push('\n');
    std::fs::write(&chart, text).map_err(|source| ReportError::Write {
        path: chart.clone(),
        source,
    })?;

    let data = dir.join(format!("{stem}.csv"));
    write_kpi_csv(kpi, &data)?;

    info!(kpi = kind.number(), rows = kpi.len(), path = %data.display(), "KPI written");
    Ok(KpiArtifacts {
        kind,
        chart,
        data,
        rows: kpi.len(),
    })
}

/// The data file always starts with a header, also for an empty KPI.
pub fn write_kpi_csv(kpi: &KpiTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(csv_header(kpi.kind()))?;
    match kpi {
        KpiTable::HiresByTechnology(rows) => serialize_rows(&mut writer, rows)?,
        KpiTable::HiresByYear(rows) => serialize_rows(&mut writer, rows)?,
        KpiTable::HiresBySeniority(rows) => serialize_rows(&mut writer, rows)?,
        KpiTable::HiresByCountryYear(rows) => serialize_rows(&mut writer, rows)?,
        KpiTable::HiringRateByTechnology(rows) => serialize_rows(&mut writer, rows)?,
        KpiTable::AvgScoresBySeniority(rows) => serialize_rows(&mut writer, rows)?,
    }
    writer.flush().map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn serialize_rows<W: std::io::Write, T: Serialize>(
    writer: &mut csv::Writer<W>,
    rows: &[T],
) -> Result<()> {
    for row in rows {
        writer.serialize(row)?;
    }
    Ok(())
}
