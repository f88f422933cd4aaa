//! Row inserts for each warehouse table.

use recruit_model::{FactApplication, StarSchema, SurrogateKey, TableName};
use rusqlite::{Transaction, params};
use tracing::debug;

use crate::error::Result;

const INSERT_CANDIDATE: &str =
    "INSERT INTO dim_candidate (candidate_key, first_name, last_name, email) VALUES (?1, ?2, ?3, ?4)";
const INSERT_DATE: &str =
    "INSERT INTO dim_date (date_key, full_date, year, month, quarter) VALUES (?1, ?2, ?3, ?4, ?5)";
const INSERT_COUNTRY: &str =
    "INSERT INTO dim_country (country_key, country_name) VALUES (?1, ?2)";
const INSERT_SENIORITY: &str =
    "INSERT INTO dim_seniority (seniority_key, seniority_level) VALUES (?1, ?2)";
const INSERT_TECHNOLOGY: &str =
    "INSERT INTO dim_technology (technology_key, technology_name) VALUES (?1, ?2)";
const INSERT_FACT: &str = "INSERT INTO fact_applications (application_id, candidate_key, date_key, \
     country_key, seniority_key, technology_key, code_challenge_score, \
     technical_interview_score, is_hired) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

/// Insert one table's rows; returns the number of rows written.
pub(crate) fn insert_table(
    tx: &Transaction<'_>,
    schema: &StarSchema,
    table: TableName,
) -> Result<usize> {
    let dims = &schema.dimensions;
    let written = match table {
        TableName::DimCandidate => {
            let mut stmt = tx.prepare_cached(INSERT_CANDIDATE)?;
            for (key, candidate) in dims.candidates.rows() {
                stmt.execute(params![
                    key.get(),
                    candidate.first_name,
                    candidate.last_name,
                    candidate.email
                ])?;
            }
            dims.candidates.len()
        }
        TableName::DimDate => {
            let mut stmt = tx.prepare_cached(INSERT_DATE)?;
            for (key, attrs) in dims.dates.date_rows() {
                stmt.execute(params![
                    key.get(),
                    attrs.full_date_text(),
                    attrs.year,
                    attrs.month,
                    attrs.quarter
                ])?;
            }
            dims.dates.len()
        }
        TableName::DimCountry => insert_labels(tx, INSERT_COUNTRY, dims.countries.rows())?,
        TableName::DimSeniority => insert_labels(tx, INSERT_SENIORITY, dims.seniorities.rows())?,
        TableName::DimTechnology => insert_labels(tx, INSERT_TECHNOLOGY, dims.technologies.rows())?,
        TableName::FactApplications => insert_facts(tx, &schema.facts)?,
    };
    debug!(table = %table, rows = written, "table inserted");
    Ok(written)
}

fn insert_labels<'a>(
    tx: &Transaction<'_>,
    sql: &str,
    rows: impl Iterator<Item = (SurrogateKey, &'a String)>,
) -> Result<usize> {
    let mut stmt = tx.prepare_cached(sql)?;
    let mut written = 0;
    for (key, label) in rows {
        stmt.execute(params![key.get(), label])?;
        written += 1;
    }
    Ok(written)
}

fn insert_facts(tx: &Transaction<'_>, facts: &[FactApplication]) -> Result<usize> {
    let mut stmt = tx.prepare_cached(INSERT_FACT)?;
    for fact in facts {
        stmt.execute(params![
            fact.application_id,
            fact.candidate_key.map(SurrogateKey::get),
            fact.date_key.map(SurrogateKey::get),
            fact.country_key.map(SurrogateKey::get),
            fact.seniority_key.map(SurrogateKey::get),
            fact.technology_key.map(SurrogateKey::get),
            fact.code_challenge_score,
            fact.technical_interview_score,
            i64::from(fact.is_hired)
        ])?;
    }
    Ok(facts.len())
}
