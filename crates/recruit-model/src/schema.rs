//! Star schema table set: five dimensions around one fact table.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dimension::{CandidateIdentity, Dimension, SurrogateKey};

/// Warehouse table names, in load order (dimensions before the fact table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    DimCandidate,
    DimDate,
    DimCountry,
    DimSeniority,
    DimTechnology,
    FactApplications,
}

impl TableName {
    pub const ALL: [TableName; 6] = [
        TableName::DimCandidate,
        TableName::DimDate,
        TableName::DimCountry,
        TableName::DimSeniority,
        TableName::DimTechnology,
        TableName::FactApplications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DimCandidate => "dim_candidate",
            Self::DimDate => "dim_date",
            Self::DimCountry => "dim_country",
            Self::DimSeniority => "dim_seniority",
            Self::DimTechnology => "dim_technology",
            Self::FactApplications => "fact_applications",
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Foreign key columns of `fact_applications`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKey {
    Candidate,
    Date,
    Country,
    Seniority,
    Technology,
}

impl ForeignKey {
    pub const ALL: [ForeignKey; 5] = [
        ForeignKey::Candidate,
        ForeignKey::Date,
        ForeignKey::Country,
        ForeignKey::Seniority,
        ForeignKey::Technology,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Self::Candidate => "candidate_key",
            Self::Date => "date_key",
            Self::Country => "country_key",
            Self::Seniority => "seniority_key",
            Self::Technology => "technology_key",
        }
    }

    /// Dimension table the column points at.
    pub fn references(self) -> TableName {
        match self {
            Self::Candidate => TableName::DimCandidate,
            Self::Date => TableName::DimDate,
            Self::Country => TableName::DimCountry,
            Self::Seniority => TableName::DimSeniority,
            Self::Technology => TableName::DimTechnology,
        }
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One row of `fact_applications`.
///
/// A `None` foreign key marks a natural key that had no dimension row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactApplication {
    pub application_id: u32,
    pub candidate_key: Option<SurrogateKey>,
    pub date_key: Option<SurrogateKey>,
    pub country_key: Option<SurrogateKey>,
    pub seniority_key: Option<SurrogateKey>,
    pub technology_key: Option<SurrogateKey>,
    pub code_challenge_score: f64,
    pub technical_interview_score: f64,
    pub is_hired: bool,
}

impl FactApplication {
    pub fn foreign_key(&self, fk: ForeignKey) -> Option<SurrogateKey> {
        match fk {
            ForeignKey::Candidate => self.candidate_key,
            ForeignKey::Date => self.date_key,
            ForeignKey::Country => self.country_key,
            ForeignKey::Seniority => self.seniority_key,
            ForeignKey::Technology => self.technology_key,
        }
    }
}

/// The five dimensions built from one cleansed row set.
#[derive(Debug, Clone)]
pub struct DimensionSet {
    pub candidates: Dimension<CandidateIdentity>,
    pub dates: Dimension<NaiveDate>,
    pub countries: Dimension<String>,
    pub seniorities: Dimension<String>,
    pub technologies: Dimension<String>,
}

impl DimensionSet {
    pub fn row_count(&self, table: TableName) -> usize {
        match table {
            TableName::DimCandidate => self.candidates.len(),
            TableName::DimDate => self.dates.len(),
            TableName::DimCountry => self.countries.len(),
            TableName::DimSeniority => self.seniorities.len(),
            TableName::DimTechnology => self.technologies.len(),
            TableName::FactApplications => 0,
        }
    }

    /// Whether `key` exists in the dimension referenced by `fk`.
    pub fn resolves(&self, fk: ForeignKey, key: SurrogateKey) -> bool {
        match fk {
            ForeignKey::Candidate => self.candidates.contains_key(key),
            ForeignKey::Date => self.dates.contains_key(key),
            ForeignKey::Country => self.countries.contains_key(key),
            ForeignKey::Seniority => self.seniorities.contains_key(key),
            ForeignKey::Technology => self.technologies.contains_key(key),
        }
    }
}

/// The six named warehouse tables produced by one transform run.
#[derive(Debug, Clone)]
pub struct StarSchema {
    pub dimensions: DimensionSet,
    pub facts: Vec<FactApplication>,
}

impl StarSchema {
    pub fn row_count(&self, table: TableName) -> usize {
        match table {
            TableName::FactApplications => self.facts.len(),
            dimension => self.dimensions.row_count(dimension),
        }
    }

    /// `(table, rows)` pairs in load order.
    pub fn row_counts(&self) -> Vec<(TableName, usize)> {
        TableName::ALL
            .iter()
            .map(|table| (*table, self.row_count(*table)))
            .collect()
    }
}
