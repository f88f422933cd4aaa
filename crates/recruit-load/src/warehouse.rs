//! SQLite warehouse creation, load, and validation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use recruit_model::{StarSchema, TableName};
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use crate::error::{LoadError, Result};
use crate::insert::insert_table;

/// DDL executed when no override script is configured.
pub const DEFAULT_DDL: &str = include_str!("../sql/create_tables.sql");

/// Where and how to persist a star schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub database: PathBuf,
    /// DDL script replacing [`DEFAULT_DDL`].
    pub ddl: Option<PathBuf>,
}

impl LoadOptions {
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            ddl: None,
        }
    }

    /// The DDL text this load will execute.
    pub fn ddl_script(&self) -> Result<String> {
        match &self.ddl {
            Some(path) => std::fs::read_to_string(path).map_err(|source| LoadError::DdlRead {
                path: path.clone(),
                source,
            }),
            None => Ok(DEFAULT_DDL.to_string()),
        }
    }
}

/// Rows per table after a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub database: PathBuf,
    /// `(table, rows)` in load order.
    pub tables: Vec<(TableName, usize)>,
    /// Whether an earlier database file was replaced.
    pub replaced_existing: bool,
}

impl LoadSummary {
    pub fn rows(&self, table: TableName) -> Option<usize> {
        self.tables
            .iter()
            .find(|(name, _)| *name == table)
            .map(|(_, rows)| *rows)
    }
}

/// Recreate the warehouse and load every table.
///
/// The previous database file is removed first. Dimensions are inserted
/// before the fact table inside one transaction, so a failed insert leaves
/// an empty schema rather than a partial one. Row counts are read back and
/// compared with the input.
pub fn load_star_schema(schema: &StarSchema, options: &LoadOptions) -> Result<LoadSummary> {
    let start = Instant::now();
    let ddl = options.ddl_script()?;
    let path = options.database.as_path();

    let replaced_existing = path.exists();
    if replaced_existing {
        std::fs::remove_file(path)?;
        debug!(path = %path.display(), "previous database removed");
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(&ddl)?;
    let ddl_source = options
        .ddl
        .as_deref()
        .map_or_else(|| "embedded".to_string(), |p| p.display().to_string());
    info!(path = %path.display(), ddl = %ddl_source, "warehouse schema created");

    let tx = conn.transaction()?;
    for table in TableName::ALL {
        let rows = insert_table(&tx, schema, table)?;
        info!(table = %table, rows, "table loaded");
    }
    tx.commit()?;

    let tables = validate_load(&conn, schema)?;
    info!(
        path = %path.display(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );

    Ok(LoadSummary {
        database: options.database.clone(),
        tables,
        replaced_existing,
    })
}

fn validate_load(conn: &Connection, schema: &StarSchema) -> Result<Vec<(TableName, usize)>> {
    let mut tables = Vec::with_capacity(TableName::ALL.len());
    for table in TableName::ALL {
        let actual = count_rows(conn, table)?;
        let expected = schema.row_count(table);
        if actual != expected {
            return Err(LoadError::RowCountMismatch {
                table,
                expected,
                actual,
            });
        }
        debug!(table = %table, rows = actual, "row count validated");
        tables.push((table, actual));
    }
    Ok(tables)
}

/// `SELECT COUNT(*)` for one warehouse table.
pub fn count_rows(conn: &Connection, table: TableName) -> Result<usize> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Open an existing warehouse read-only.
pub fn open_warehouse(path: &Path) -> Result<Connection> {
    if !path.is_file() {
        return Err(LoadError::DatabaseNotFound {
            path: path.to_path_buf(),
        });
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    debug!(path = %path.display(), "warehouse opened read-only");
    Ok(conn)
}
