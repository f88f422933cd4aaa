//! CSV export of the warehouse tables.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use recruit_model::TableName;
use rusqlite::Connection;
use tracing::info;

use crate::error::{ReportError, Result};
use crate::frames::read_table_frame;

/// One written table file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTable {
    pub table: TableName,
    pub path: PathBuf,
    pub rows: usize,
}

/// Export every warehouse table to `<dir>/<table>.csv`.
pub fn export_tables(conn: &Connection, dir: &Path) -> Result<Vec<ExportedTable>> {
    let frames = TableName::ALL
        .into_iter()
        .map(|table| Ok((table, read_table_frame(conn, table)?)))
        .collect::<Result<Vec<_>>>()?;
    export_frames(frames, dir)
}

/// Write already built frames to `<dir>/<table>.csv`, in the given order.
pub fn export_frames(
    frames: Vec<(TableName, DataFrame)>,
    dir: &Path,
) -> Result<Vec<ExportedTable>> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut exported = Vec::with_capacity(frames.len());
    for (table, mut df) in frames {
        let path = dir.join(format!("{}.csv", table.as_str()));
        write_frame_csv(&mut df, &path)?;
        info!(table = %table, rows = df.height(), path = %path.display(), "table exported");
        exported.push(ExportedTable {
            table,
            path,
            rows: df.height(),
        });
    }
    Ok(exported)
}

/// Comma separated with a header row.
pub fn write_frame_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;
    Ok(())
}
