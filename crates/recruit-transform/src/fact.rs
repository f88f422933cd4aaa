//! Fact table construction.

use recruit_model::{
    DimensionSet, FactApplication, ForeignKey, ScoredApplication, SurrogateKey, TableName,
};
use tracing::{info, warn};

use crate::dimensions::candidate_identity;
use crate::error::{Result, TransformError};
use crate::integrity::IntegrityReport;

/// `fact_applications` rows with the integrity findings of their build.
#[derive(Debug, Clone)]
pub struct FactTable {
    pub rows: Vec<FactApplication>,
    pub integrity: IntegrityReport,
}

/// Map every row's natural keys to surrogate keys.
///
/// A natural key missing from its dimension leaves the foreign key null and is
/// recorded in the report; it never drops the row. `application_id` is
/// assigned `1..=n` in row order.
pub fn build_fact(rows: &[ScoredApplication], dims: &DimensionSet) -> Result<FactTable> {
    let mut integrity = IntegrityReport::new(rows.len());
    let mut facts = Vec::with_capacity(rows.len());

    for (position, row) in rows.iter().enumerate() {
        let application_id = SurrogateKey::from_position(position)
            .ok_or(TransformError::KeySpaceExhausted {
                table: TableName::FactApplications,
                members: rows.len(),
            })?
            .get();
        let record = &row.record;

        let candidate_key = dims.candidates.key_of(&candidate_identity(record));
        let date_key = dims.dates.key_of(&record.application_date);
        let country_key = dims.countries.key_of(&record.country);
        let seniority_key = dims.seniorities.key_of(&record.seniority);
        let technology_key = dims.technologies.key_of(&record.technology);

        let fact = FactApplication {
            application_id,
            candidate_key,
            date_key,
            country_key,
            seniority_key,
            technology_key,
            code_challenge_score: record.code_challenge_score,
            technical_interview_score: record.technical_interview_score,
            is_hired: row.is_hired,
        };
        for fk in ForeignKey::ALL {
            if fact.foreign_key(fk).is_none() {
                integrity.record(fk, application_id);
            }
        }
        facts.push(fact);
    }

    if integrity.is_clean() {
        info!(rows = facts.len(), "fact table built");
    } else {
        for (fk, count) in integrity.by_column() {
            warn!(
                column = %fk,
                references = %fk.references(),
                unresolved = count,
                "unresolved foreign keys"
            );
        }
        warn!(
            rows = facts.len(),
            affected_rows = integrity.affected_rows(),
            "fact table built with integrity defects"
        );
    }

    Ok(FactTable {
        rows: facts,
        integrity,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use recruit_model::ApplicationRecord;

    use super::*;
    use crate::dimensions::build_dimensions;

    fn scored(first: &str, country: &str, hired: bool) -> ScoredApplication {
        ScoredApplication {
            record: ApplicationRecord {
                first_name: first.to_string(),
                last_name: "Ruiz".to_string(),
                email: format!("{first}@example.com"),
                application_date: NaiveDate::from_ymd_opt(2019, 6, 3).expect("valid date"),
                country: country.to_string(),
                years_of_experience: 4.0,
                seniority: "Senior".to_string(),
                technology: "Java".to_string(),
                code_challenge_score: 9.0,
                technical_interview_score: 3.0,
            },
            is_hired: hired,
        }
    }

    #[test]
    fn assigns_application_ids_in_row_order() {
        let rows = [scored("a", "Peru", false), scored("b", "Chile", true)];
        let dims = build_dimensions(&rows).expect("dimensions");
        let table = build_fact(&rows, &dims).expect("fact");

        let ids: Vec<u32> = table.rows.iter().map(|f| f.application_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(table.integrity.is_clean());
        assert_eq!(table.rows[0].country_key.map(SurrogateKey::get), Some(2));
        assert_eq!(table.rows[1].country_key.map(SurrogateKey::get), Some(1));
        assert!(table.rows[1].is_hired);
        assert_eq!(table.rows[0].code_challenge_score, 9.0);
    }

    #[test]
    fn keys_missing_from_dimensions_are_reported_not_dropped() {
        let known = [scored("a", "Peru", false)];
        let dims = build_dimensions(&known).expect("dimensions");
        let rows = [scored("a", "Peru", false), scored("b", "Chile", true)];

        let table = build_fact(&rows, &dims).expect("fact");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].country_key, None);
        assert_eq!(table.integrity.violations(ForeignKey::Country), 1);
        assert_eq!(table.integrity.violations(ForeignKey::Candidate), 1);
        assert_eq!(table.integrity.violations(ForeignKey::Date), 0);
        assert_eq!(table.integrity.application_ids(ForeignKey::Country), &[2]);
    }
}
