//! Polars DataFrames for the warehouse tables.
//!
//! Frames are either built from in-memory star schema tables or read back from
//! the SQLite warehouse; both paths produce the same columns and dtypes.

use polars::prelude::*;
use recruit_model::{
    Dimension, FactApplication, ForeignKey, StarSchema, SurrogateKey, TableName,
};
use rusqlite::Connection;
use rusqlite::types::Value;
use tracing::debug;

use crate::error::{ReportError, Result};

fn key_value(key: SurrogateKey) -> i64 {
    i64::from(key.get())
}

fn label_frame(
    dimension: &Dimension<String>,
    key_column: &str,
    label_column: &str,
) -> Result<DataFrame> {
    let (keys, labels): (Vec<i64>, Vec<String>) = dimension
        .rows()
        .map(|(key, label)| (key_value(key), label.clone()))
        .unzip();
    Ok(DataFrame::new(vec![
        Column::new(key_column.into(), keys),
        Column::new(label_column.into(), labels),
    ])?)
}

fn fact_keys(facts: &[FactApplication], fk: ForeignKey) -> Vec<Option<i64>> {
    facts
        .iter()
        .map(|fact| fact.foreign_key(fk).map(key_value))
        .collect()
}

/// In-memory star schema tables as frames, in load order.
pub fn star_schema_frames(schema: &StarSchema) -> Result<Vec<(TableName, DataFrame)>> {
    let dims = &schema.dimensions;

    let mut candidate_keys = Vec::with_capacity(dims.candidates.len());
    let mut first_names = Vec::with_capacity(dims.candidates.len());
    let mut last_names = Vec::with_capacity(dims.candidates.len());
    let mut emails = Vec::with_capacity(dims.candidates.len());
    for (key, candidate) in dims.candidates.rows() {
        candidate_keys.push(key_value(key));
        first_names.push(candidate.first_name.clone());
        last_names.push(candidate.last_name.clone());
        emails.push(candidate.email.clone());
    }
    let candidates = DataFrame::new(vec![
        Column::new("candidate_key".into(), candidate_keys),
        Column::new("first_name".into(), first_names),
        Column::new("last_name".into(), last_names),
        Column::new("email".into(), emails),
    ])?;

    let mut date_keys = Vec::with_capacity(dims.dates.len());
    let mut full_dates = Vec::with_capacity(dims.dates.len());
    let mut years = Vec::with_capacity(dims.dates.len());
    let mut months = Vec::with_capacity(dims.dates.len());
    let mut quarters = Vec::with_capacity(dims.dates.len());
    for (key, attrs) in dims.dates.date_rows() {
        date_keys.push(key_value(key));
        full_dates.push(attrs.full_date_text());
        years.push(i64::from(attrs.year));
        months.push(i64::from(attrs.month));
        quarters.push(i64::from(attrs.quarter));
    }
    let dates = DataFrame::new(vec![
        Column::new("date_key".into(), date_keys),
        Column::new("full_date".into(), full_dates),
        Column::new("year".into(), years),
        Column::new("month".into(), months),
        Column::new("quarter".into(), quarters),
    ])?;

    let facts = &schema.facts;
    let fact = DataFrame::new(vec![
        Column::new(
            "application_id".into(),
            facts.iter().map(|f| i64::from(f.application_id)).collect::<Vec<_>>(),
        ),
        Column::new("candidate_key".into(), fact_keys(facts, ForeignKey::Candidate)),
        Column::new("date_key".into(), fact_keys(facts, ForeignKey::Date)),
        Column::new("country_key".into(), fact_keys(facts, ForeignKey::Country)),
        Column::new("seniority_key".into(), fact_keys(facts, ForeignKey::Seniority)),
        Column::new("technology_key".into(), fact_keys(facts, ForeignKey::Technology)),
        Column::new(
            "code_challenge_score".into(),
            facts.iter().map(|f| f.code_challenge_score).collect::<Vec<_>>(),
        ),
        Column::new(
            "technical_interview_score".into(),
            facts.iter().map(|f| f.technical_interview_score).collect::<Vec<_>>(),
        ),
        Column::new(
            "is_hired".into(),
            facts.iter().map(|f| i64::from(f.is_hired)).collect::<Vec<_>>(),
        ),
    ])?;

    Ok(vec![
        (TableName::DimCandidate, candidates),
        (TableName::DimDate, dates),
        (
            TableName::DimCountry,
            label_frame(&dims.countries, "country_key", "country_name")?,
        ),
        (
            TableName::DimSeniority,
            label_frame(&dims.seniorities, "seniority_key", "seniority_level")?,
        ),
        (
            TableName::DimTechnology,
            label_frame(&dims.technologies, "technology_key", "technology_name")?,
        ),
        (TableName::FactApplications, fact),
    ])
}

/// `SELECT *` of one warehouse table as a frame.
pub fn read_table_frame(conn: &Connection, table: TableName) -> Result<DataFrame> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", table.as_str()))?;
    let names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut values: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(row.get::<_, Value>(idx)?);
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, column)| sql_column(table, &name, column))
        .collect::<Result<Vec<_>>>()?;
    let df = DataFrame::new(columns)?;
    debug!(table = %table, rows = df.height(), "table read");
    Ok(df)
}

/// Convert one SQLite column to the narrowest matching Polars column.
fn sql_column(table: TableName, name: &str, values: Vec<Value>) -> Result<Column> {
    if values
        .iter()
        .all(|v| matches!(v, Value::Null | Value::Integer(_)))
    {
        let ints: Vec<Option<i64>> = values
            .iter()
            .map(|v| match v {
                Value::Integer(i) => Some(*i),
                _ => None,
            })
            .collect();
        return Ok(Column::new(name.into(), ints));
    }

    if values
        .iter()
        .all(|v| matches!(v, Value::Null | Value::Integer(_) | Value::Real(_)))
    {
        let floats: Vec<Option<f64>> = values
            .iter()
            .map(|v| match v {
                Value::Integer(i) => Some(*i as f64),
                Value::Real(r) => Some(*r),
                _ => None,
            })
            .collect();
        return Ok(Column::new(name.into(), floats));
    }

    let mut texts: Vec<Option<String>> = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::Null => texts.push(None),
            Value::Text(text) => texts.push(Some(text)),
            other => {
                return Err(ReportError::UnsupportedValue {
                    table,
                    column: name.to_string(),
                    detail: format!("{:?} in a text column", other.data_type()),
                });
            }
        }
    }
    Ok(Column::new(name.into(), texts))
}
