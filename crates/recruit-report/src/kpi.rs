//! KPI queries against the persisted star schema.
//!
//! Every KPI reads the warehouse tables, never the source CSV. Ties are broken
//! by label so repeated runs list rows in the same order.

use rusqlite::{Connection, params_from_iter};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Countries tracked by the hires-over-time KPI unless configured otherwise.
pub const DEFAULT_TRACKED_COUNTRIES: [&str; 4] =
    ["United States of America", "Brazil", "Colombia", "Ecuador"];

/// The six dashboard KPIs, in dashboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KpiKind {
    HiresByTechnology,
    HiresByYear,
    HiresBySeniority,
    HiresByCountryYear,
    HiringRateByTechnology,
    AvgScoresBySeniority,
}

impl KpiKind {
    pub const ALL: [KpiKind; 6] = [
        KpiKind::HiresByTechnology,
        KpiKind::HiresByYear,
        KpiKind::HiresBySeniority,
        KpiKind::HiresByCountryYear,
        KpiKind::HiringRateByTechnology,
        KpiKind::AvgScoresBySeniority,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::HiresByTechnology => 1,
            Self::HiresByYear => 2,
            Self::HiresBySeniority => 3,
            Self::HiresByCountryYear => 4,
            Self::HiringRateByTechnology => 5,
            Self::AvgScoresBySeniority => 6,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::HiresByTechnology => "hires_by_technology",
            Self::HiresByYear => "hires_by_year",
            Self::HiresBySeniority => "hires_by_seniority",
            Self::HiresByCountryYear => "hires_by_country_year",
            Self::HiringRateByTechnology => "hiring_rate_by_technology",
            Self::AvgScoresBySeniority => "avg_scores_by_seniority",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::HiresByTechnology => "Hires by Technology",
            Self::HiresByYear => "Hires by Year",
            Self::HiresBySeniority => "Hires by Seniority",
            Self::HiresByCountryYear => "Hires by Country Over the Years",
            Self::HiringRateByTechnology => "Hiring Rate (%) by Technology",
            Self::AvgScoresBySeniority => "Average Scores by Seniority",
        }
    }

    /// File name stem for report artifacts, e.g. `kpi1_hires_by_technology`.
    pub fn file_stem(self) -> String {
        format!("kpi{}_{}", self.number(), self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyHires {
    pub technology_name: String,
    pub total_hires: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearHires {
    pub year: i64,
    pub total_hires: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeniorityHires {
    pub seniority_level: String,
    pub total_hires: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryYearHires {
    pub country_name: String,
    pub year: i64,
    pub total_hires: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyHiringRate {
    pub technology_name: String,
    pub total_applications: i64,
    pub total_hires: i64,
    pub hiring_rate_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeniorityScores {
    pub seniority_level: String,
    pub avg_code_challenge: f64,
    pub avg_technical_interview: f64,
}

/// Result rows of one KPI.
#[derive(Debug, Clone, PartialEq)]
pub enum KpiTable {
    HiresByTechnology(Vec<TechnologyHires>),
    HiresByYear(Vec<YearHires>),
    HiresBySeniority(Vec<SeniorityHires>),
    HiresByCountryYear(Vec<CountryYearHires>),
    HiringRateByTechnology(Vec<TechnologyHiringRate>),
    AvgScoresBySeniority(Vec<SeniorityScores>),
}

impl KpiTable {
    pub fn kind(&self) -> KpiKind {
        match self {
            Self::HiresByTechnology(_) => KpiKind::HiresByTechnology,
            Self::HiresByYear(_) => KpiKind::HiresByYear,
            Self::HiresBySeniority(_) => KpiKind::HiresBySeniority,
            Self::HiresByCountryYear(_) => KpiKind::HiresByCountryYear,
            Self::HiringRateByTechnology(_) => KpiKind::HiringRateByTechnology,
            Self::AvgScoresBySeniority(_) => KpiKind::AvgScoresBySeniority,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::HiresByTechnology(rows) => rows.len(),
            Self::HiresByYear(rows) => rows.len(),
            Self::HiresBySeniority(rows) => rows.len(),
            Self::HiresByCountryYear(rows) => rows.len(),
            Self::HiringRateByTechnology(rows) => rows.len(),
            Self::AvgScoresBySeniority(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Options for KPI queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiOptions {
    /// Countries included in the hires-over-time KPI.
    pub tracked_countries: Vec<String>,
}

impl Default for KpiOptions {
    fn default() -> Self {
        Self {
            tracked_countries: DEFAULT_TRACKED_COUNTRIES
                .iter()
                .map(|country| (*country).to_string())
                .collect(),
        }
    }
}

pub fn hires_by_technology(conn: &Connection) -> Result<Vec<TechnologyHires>> {
    let mut stmt = conn.prepare(
        "SELECT t.technology_name, COUNT(*) AS total_hires
         FROM fact_applications f
         JOIN dim_technology t ON f.technology_key = t.technology_key
         WHERE f.is_hired = 1
         GROUP BY t.technology_name
         ORDER BY total_hires DESC, t.technology_name",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TechnologyHires {
                technology_name: row.get(0)?,
                total_hires: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn hires_by_year(conn: &Connection) -> Result<Vec<YearHires>> {
    let mut stmt = conn.prepare(
        "SELECT d.year, COUNT(*) AS total_hires
         FROM fact_applications f
         JOIN dim_date d ON f.date_key = d.date_key
         WHERE f.is_hired = 1
         GROUP BY d.year
         ORDER BY d.year",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(YearHires {
                year: row.get(0)?,
                total_hires: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn hires_by_seniority(conn: &Connection) -> Result<Vec<SeniorityHires>> {
    let mut stmt = conn.prepare(
        "SELECT s.seniority_level, COUNT(*) AS total_hires
         FROM fact_applications f
         JOIN dim_seniority s ON f.seniority_key = s.seniority_key
         WHERE f.is_hired = 1
         GROUP BY s.seniority_level
         ORDER BY total_hires DESC, s.seniority_level",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SeniorityHires {
                seniority_level: row.get(0)?,
                total_hires: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Hires per year for each of `countries`; an empty list yields no rows.
pub fn hires_by_country_year(
    conn: &Connection,
    countries: &[String],
) -> Result<Vec<CountryYearHires>> {
    if countries.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = (1..=countries.len())
        .map(|idx| format!("?{idx}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT c.country_name, d.year, COUNT(*) AS total_hires
         FROM fact_applications f
         JOIN dim_country c ON f.country_key = c.country_key
         JOIN dim_date d ON f.date_key = d.date_key
         WHERE f.is_hired = 1
           AND c.country_name IN ({placeholders})
         GROUP BY c.country_name, d.year
         ORDER BY c.country_name, d.year"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(countries.iter()), |row| {
            Ok(CountryYearHires {
                country_name: row.get(0)?,
                year: row.get(1)?,
                total_hires: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn hiring_rate_by_technology(conn: &Connection) -> Result<Vec<TechnologyHiringRate>> {
    let mut stmt = conn.prepare(
        "SELECT t.technology_name,
                COUNT(*) AS total_applications,
                SUM(f.is_hired) AS total_hires,
                ROUND(SUM(f.is_hired) * 100.0 / COUNT(*), 2) AS hiring_rate_pct
         FROM fact_applications f
         JOIN dim_technology t ON f.technology_key = t.technology_key
         GROUP BY t.technology_name
         ORDER BY hiring_rate_pct DESC, t.technology_name",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TechnologyHiringRate {
                technology_name: row.get(0)?,
                total_applications: row.get(1)?,
                total_hires: row.get(2)?,
                hiring_rate_pct: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn avg_scores_by_seniority(conn: &Connection) -> Result<Vec<SeniorityScores>> {
    let mut stmt = conn.prepare(
        "SELECT s.seniority_level,
                ROUND(AVG(f.code_challenge_score), 2) AS avg_code_challenge,
                ROUND(AVG(f.technical_interview_score), 2) AS avg_technical_interview
         FROM fact_applications f
         JOIN dim_seniority s ON f.seniority_key = s.seniority_key
         GROUP BY s.seniority_level
         ORDER BY s.seniority_level",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SeniorityScores {
                seniority_level: row.get(0)?,
                avg_code_challenge: row.get(1)?,
                avg_technical_interview: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Run one KPI query.
pub fn query_kpi(conn: &Connection, kind: KpiKind, options: &KpiOptions) -> Result<KpiTable> {
    let table = match kind {
        KpiKind::HiresByTechnology => KpiTable::HiresByTechnology(hires_by_technology(conn)?),
        KpiKind::HiresByYear => KpiTable::HiresByYear(hires_by_year(conn)?),
        KpiKind::HiresBySeniority => KpiTable::HiresBySeniority(hires_by_seniority(conn)?),
        KpiKind::HiresByCountryYear => KpiTable::HiresByCountryYear(hires_by_country_year(
            conn,
            &options.tracked_countries,
        )?),
        KpiKind::HiringRateByTechnology => {
            KpiTable::HiringRateByTechnology(hiring_rate_by_technology(conn)?)
        }
        KpiKind::AvgScoresBySeniority => {
            KpiTable::AvgScoresBySeniority(avg_scores_by_seniority(conn)?)
        }
    };
    debug!(kpi = kind.number(), rows = table.len(), "KPI queried");
    Ok(table)
}

/// Run all six KPIs in dashboard order.
pub fn query_dashboard(conn: &Connection, options: &KpiOptions) -> Result<Vec<KpiTable>> {
    KpiKind::ALL
        .iter()
        .map(|kind| query_kpi(conn, *kind, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stems_are_numbered() {
        let stems: Vec<String> = KpiKind::ALL.into_iter().map(KpiKind::file_stem).collect();
        assert_eq!(stems[0], "kpi1_hires_by_technology");
        assert_eq!(stems[3], "kpi4_hires_by_country_year");
        assert_eq!(stems[5], "kpi6_avg_scores_by_seniority");
    }

    #[test]
    fn default_tracked_countries() {
        let options = KpiOptions::default();
        assert_eq!(options.tracked_countries.len(), 4);
        assert_eq!(options.tracked_countries[0], "United States of America");
    }
}
