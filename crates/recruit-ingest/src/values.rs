//! Polars AnyValue conversions for application fields.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// Days from 0001-01-01 to the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Date layouts accepted in `Application Date`; the first match wins.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Converts an AnyValue to text, `None` for nulls.
///
/// Whitespace is kept; trimming belongs to cleansing.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Float32(v) => Some(format_numeric(f64::from(v))),
        AnyValue::Float64(v) => Some(format_numeric(v)),
        other => Some(other.to_string()),
    }
}

/// Formats a float without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Converts an AnyValue to f64; nulls and non-numeric values are `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        _ => None,
    }
}

/// Parses one date cell.
///
/// `Ok(None)` for null or blank cells, `Err(text)` with the offending text
/// when the value is present but unparseable.
pub fn any_to_date(value: AnyValue<'_>) -> std::result::Result<Option<NaiveDate>, String> {
    match value {
        AnyValue::Null => Ok(None),
        AnyValue::Date(days) => days
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map(Some)
            .ok_or_else(|| days.to_string()),
        other => match any_to_text(other) {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => parse_date(&text).map(Some).ok_or(text),
        },
    }
}

/// Parses a date in one of the accepted layouts, ignoring surrounding space.
///
/// A time of day is accepted and discarded.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|datetime| datetime.date())
        })
}

/// Whether a column dtype satisfies a numeric column requirement.
///
/// A column with no values at all is read as text by Polars; it is accepted
/// and every cell becomes a missing value.
pub fn is_numeric_column(column: &Column) -> bool {
    let dtype = column.dtype();
    dtype.is_integer()
        || dtype.is_float()
        || matches!(dtype, DataType::Null)
        || column.null_count() == column.len()
}
