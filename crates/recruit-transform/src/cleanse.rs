//! Data quality handling for extracted rows.
//!
//! Rows with any missing value are dropped whole; there is no imputation.
//! Text fields are trimmed, and a text field that is blank after trimming
//! counts as missing.

use std::collections::BTreeMap;

use recruit_model::record::columns::{
    APPLICATION_DATE, CODE_CHALLENGE_SCORE, COUNTRY, EMAIL, FIRST_NAME, LAST_NAME, SENIORITY,
    TECHNICAL_INTERVIEW_SCORE, TECHNOLOGY, YOE,
};
use recruit_model::{ApplicationRecord, RawApplication};
use tracing::{debug, info};

/// Counts of what the cleanser removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanseReport {
    pub input_rows: usize,
    pub dropped_rows: usize,
    /// Missing values per column, over all input rows.
    pub missing_by_column: BTreeMap<&'static str, usize>,
}

impl CleanseReport {
    pub fn kept_rows(&self) -> usize {
        self.input_rows - self.dropped_rows
    }

    pub fn missing_values(&self) -> usize {
        self.missing_by_column.values().sum()
    }
}

#[derive(Debug, Clone)]
pub struct CleanseOutcome {
    pub rows: Vec<ApplicationRecord>,
    pub report: CleanseReport,
}

/// Drop incomplete rows and trim text fields.
///
/// The input is left untouched; surviving rows keep their input order.
pub fn clean(rows: &[RawApplication]) -> CleanseOutcome {
    let mut report = CleanseReport {
        input_rows: rows.len(),
        ..CleanseReport::default()
    };
    let mut kept = Vec::with_capacity(rows.len());

    for row in rows {
        let mut missing = Vec::new();
        let first_name = text(row.first_name.as_deref(), FIRST_NAME, &mut missing);
        let last_name = text(row.last_name.as_deref(), LAST_NAME, &mut missing);
        let email = text(row.email.as_deref(), EMAIL, &mut missing);
        let application_date = present(row.application_date, APPLICATION_DATE, &mut missing);
        let country = text(row.country.as_deref(), COUNTRY, &mut missing);
        let years_of_experience = number(row.years_of_experience, YOE, &mut missing);
        let seniority = text(row.seniority.as_deref(), SENIORITY, &mut missing);
        let technology = text(row.technology.as_deref(), TECHNOLOGY, &mut missing);
        let code_challenge_score =
            number(row.code_challenge_score, CODE_CHALLENGE_SCORE, &mut missing);
        let technical_interview_score = number(
            row.technical_interview_score,
            TECHNICAL_INTERVIEW_SCORE,
            &mut missing,
        );

        for column in &missing {
            *report.missing_by_column.entry(*column).or_insert(0) += 1;
        }

        match (
            first_name,
            last_name,
            email,
            application_date,
            country,
            years_of_experience,
            seniority,
            technology,
            code_challenge_score,
            technical_interview_score,
        ) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(application_date),
                Some(country),
                Some(years_of_experience),
                Some(seniority),
                Some(technology),
                Some(code_challenge_score),
                Some(technical_interview_score),
            ) => kept.push(ApplicationRecord {
                first_name,
                last_name,
                email,
                application_date,
                country,
                years_of_experience,
                seniority,
                technology,
                code_challenge_score,
                technical_interview_score,
            }),
            _ => report.dropped_rows += 1,
        }
    }

    if report.dropped_rows > 0 {
        info!(
            input_rows = report.input_rows,
            dropped_rows = report.dropped_rows,
            missing_values = report.missing_values(),
            "dropped rows with missing values"
        );
        for (column, count) in &report.missing_by_column {
            debug!(column = %column, missing = count, "missing values in column");
        }
    } else {
        info!(input_rows = report.input_rows, "no missing values found");
    }

    CleanseOutcome { rows: kept, report }
}

fn text(
    value: Option<&str>,
    column: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_string()),
        _ => {
            missing.push(column);
            None
        }
    }
}

fn number(
    value: Option<f64>,
    column: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<f64> {
    match value {
        Some(v) if !v.is_nan() => Some(v),
        _ => {
            missing.push(column);
            None
        }
    }
}

fn present<T>(
    value: Option<T>,
    column: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<T> {
    if value.is_none() {
        missing.push(column);
    }
    value
}
