//! Candidate CSV reading and schema validation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use recruit_model::RawApplication;
use recruit_model::record::columns::{
    APPLICATION_DATE, CODE_CHALLENGE_SCORE, COUNTRY, EMAIL, EXPECTED, FIRST_NAME, LAST_NAME,
    NUMERIC, SENIORITY, TECHNICAL_INTERVIEW_SCORE, TECHNOLOGY, YOE,
};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::values::{any_to_date, any_to_f64, any_to_text, is_numeric_column};

/// Default field separator of the candidate export.
pub const DEFAULT_SEPARATOR: u8 = b';';

/// Options for reading the candidate CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub separator: u8,
    /// Rows scanned for dtype inference; `None` scans the whole file.
    pub infer_schema_length: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            infer_schema_length: None,
        }
    }
}

/// Rows extracted from one CSV file.
#[derive(Debug, Clone)]
pub struct ExtractedBatch {
    pub path: PathBuf,
    /// Columns in the file, including ones the pipeline ignores.
    pub column_count: usize,
    pub rows: Vec<RawApplication>,
}

impl ExtractedBatch {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Read and validate the candidate CSV.
///
/// Fails on a missing file, an empty file, absent expected columns, a
/// non-numeric score or `YOE` column, or an unparseable application date.
/// Null cells are preserved as `None` for the cleanser.
pub fn read_applications(path: &Path, options: &ExtractOptions) -> Result<ExtractedBatch> {
    check_readable(path)?;

    let df = read_frame(path, options)?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "candidate CSV loaded"
    );

    let columns = resolve_columns(&df, path)?;
    validate_numeric(&df, &columns, path)?;
    debug!(path = %path.display(), "schema validation passed");

    let rows = frame_to_applications(&df, &columns, path)?;
    Ok(ExtractedBatch {
        path: path.to_path_buf(),
        column_count: df.width(),
        rows,
    })
}

fn check_readable(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn read_frame(path: &Path, options: &ExtractOptions) -> Result<DataFrame> {
    let separator = options.separator;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .map_parse_options(|parse| parse.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(df)
}

/// Header text as matched against the expected column names.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// Map each expected column name to the frame's actual column name.
fn resolve_columns(df: &DataFrame, path: &Path) -> Result<BTreeMap<&'static str, String>> {
    let mut actual: BTreeMap<String, String> = BTreeMap::new();
    for name in df.get_column_names() {
        actual
            .entry(normalize_header(name.as_str()))
            .or_insert_with(|| name.to_string());
    }

    let mut resolved = BTreeMap::new();
    let mut missing = Vec::new();
    for expected in EXPECTED {
        match actual.get(expected) {
            Some(name) => {
                resolved.insert(expected, name.clone());
            }
            None => missing.push(expected.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }
    Ok(resolved)
}

fn validate_numeric(
    df: &DataFrame,
    columns: &BTreeMap<&'static str, String>,
    path: &Path,
) -> Result<()> {
    for expected in NUMERIC {
        let column = resolved_column(df, columns, expected)?;
        if !is_numeric_column(column) {
            return Err(IngestError::NonNumericColumn {
                column: expected.to_string(),
                dtype: column.dtype().to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

fn resolved_column<'a>(
    df: &'a DataFrame,
    columns: &BTreeMap<&'static str, String>,
    expected: &str,
) -> Result<&'a Column> {
    let name = columns
        .get(expected)
        .ok_or_else(|| IngestError::DataFrame {
            message: format!("column '{expected}' was not resolved"),
        })?;
    Ok(df.column(name)?)
}

/// Convert validated frame rows into [`RawApplication`]s.
fn frame_to_applications(
    df: &DataFrame,
    columns: &BTreeMap<&'static str, String>,
    path: &Path,
) -> Result<Vec<RawApplication>> {
    let first_name = resolved_column(df, columns, FIRST_NAME)?;
    let last_name = resolved_column(df, columns, LAST_NAME)?;
    let email = resolved_column(df, columns, EMAIL)?;
    let application_date = resolved_column(df, columns, APPLICATION_DATE)?;
    let country = resolved_column(df, columns, COUNTRY)?;
    let yoe = resolved_column(df, columns, YOE)?;
    let seniority = resolved_column(df, columns, SENIORITY)?;
    let technology = resolved_column(df, columns, TECHNOLOGY)?;
    let code_challenge = resolved_column(df, columns, CODE_CHALLENGE_SCORE)?;
    let technical_interview = resolved_column(df, columns, TECHNICAL_INTERVIEW_SCORE)?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let date = any_to_date(application_date.get(idx)?).map_err(|value| {
            IngestError::InvalidDate {
                column: APPLICATION_DATE.to_string(),
                value,
                row: idx + 1,
                path: path.to_path_buf(),
            }
        })?;

        rows.push(RawApplication {
            first_name: any_to_text(first_name.get(idx)?),
            last_name: any_to_text(last_name.get(idx)?),
            email: any_to_text(email.get(idx)?),
            application_date: date,
            country: any_to_text(country.get(idx)?),
            years_of_experience: any_to_f64(yoe.get(idx)?),
            seniority: any_to_text(seniority.get(idx)?),
            technology: any_to_text(technology.get(idx)?),
            code_challenge_score: any_to_f64(code_challenge.get(idx)?),
            technical_interview_score: any_to_f64(technical_interview.get(idx)?),
        });
    }
    Ok(rows)
}
