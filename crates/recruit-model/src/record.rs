//! Application rows at each step of the transform.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One extracted CSV row before cleansing.
///
/// Every field is optional: a `None` is a missing value that the cleanser
/// drops the row for. Types are already checked by extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawApplication {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub application_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub years_of_experience: Option<f64>,
    pub seniority: Option<String>,
    pub technology: Option<String>,
    pub code_challenge_score: Option<f64>,
    pub technical_interview_score: Option<f64>,
}

/// A complete, trimmed application row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub application_date: NaiveDate,
    pub country: String,
    pub years_of_experience: f64,
    pub seniority: String,
    pub technology: String,
    pub code_challenge_score: f64,
    pub technical_interview_score: f64,
}

impl From<ApplicationRecord> for RawApplication {
    fn from(record: ApplicationRecord) -> Self {
        Self {
            first_name: Some(record.first_name),
            last_name: Some(record.last_name),
            email: Some(record.email),
            application_date: Some(record.application_date),
            country: Some(record.country),
            years_of_experience: Some(record.years_of_experience),
            seniority: Some(record.seniority),
            technology: Some(record.technology),
            code_challenge_score: Some(record.code_challenge_score),
            technical_interview_score: Some(record.technical_interview_score),
        }
    }
}

/// An application row with its hiring decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredApplication {
    pub record: ApplicationRecord,
    pub is_hired: bool,
}

/// Source CSV column names.
pub mod columns {
    pub const FIRST_NAME: &str = "First Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const EMAIL: &str = "Email";
    pub const APPLICATION_DATE: &str = "Application Date";
    pub const COUNTRY: &str = "Country";
    pub const YOE: &str = "YOE";
    pub const SENIORITY: &str = "Seniority";
    pub const TECHNOLOGY: &str = "Technology";
    pub const CODE_CHALLENGE_SCORE: &str = "Code Challenge Score";
    pub const TECHNICAL_INTERVIEW_SCORE: &str = "Technical Interview Score";

    /// Every column the extract must provide, in file order.
    pub const EXPECTED: [&str; 10] = [
        FIRST_NAME,
        LAST_NAME,
        EMAIL,
        APPLICATION_DATE,
        COUNTRY,
        YOE,
        SENIORITY,
        TECHNOLOGY,
        CODE_CHALLENGE_SCORE,
        TECHNICAL_INTERVIEW_SCORE,
    ];

    /// Columns that must hold numbers.
    pub const NUMERIC: [&str; 3] = [YOE, CODE_CHALLENGE_SCORE, TECHNICAL_INTERVIEW_SCORE];
}
