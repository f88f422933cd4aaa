//! The five dimensions of the recruitment star schema.

use chrono::NaiveDate;
use recruit_model::{
    ApplicationRecord, CandidateIdentity, Dimension, DimensionSet, ScoredApplication, TableName,
};
use tracing::info;

use crate::dimension::{SortPolicy, build_dimension};
use crate::error::Result;

/// Natural key of a row in `dim_candidate`.
pub fn candidate_identity(record: &ApplicationRecord) -> CandidateIdentity {
    CandidateIdentity {
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        email: record.email.clone(),
    }
}

pub fn build_candidate_dimension(
    rows: &[ScoredApplication],
) -> Result<Dimension<CandidateIdentity>> {
    build_dimension(
        TableName::DimCandidate,
        rows,
        |row| candidate_identity(&row.record),
        SortPolicy::FirstOccurrence,
    )
}

pub fn build_date_dimension(rows: &[ScoredApplication]) -> Result<Dimension<NaiveDate>> {
    build_dimension(
        TableName::DimDate,
        rows,
        |row| row.record.application_date,
        SortPolicy::Ascending,
    )
}

pub fn build_country_dimension(rows: &[ScoredApplication]) -> Result<Dimension<String>> {
    build_dimension(
        TableName::DimCountry,
        rows,
        |row| row.record.country.clone(),
        SortPolicy::Ascending,
    )
}

pub fn build_seniority_dimension(rows: &[ScoredApplication]) -> Result<Dimension<String>> {
    build_dimension(
        TableName::DimSeniority,
        rows,
        |row| row.record.seniority.clone(),
        SortPolicy::Ascending,
    )
}

pub fn build_technology_dimension(rows: &[ScoredApplication]) -> Result<Dimension<String>> {
    build_dimension(
        TableName::DimTechnology,
        rows,
        |row| row.record.technology.clone(),
        SortPolicy::Ascending,
    )
}

/// Build every dimension from the same row set.
pub fn build_dimensions(rows: &[ScoredApplication]) -> Result<DimensionSet> {
    let candidates = build_candidate_dimension(rows)?;
    info!(table = %TableName::DimCandidate, rows = candidates.len(), "dimension built");
    let dates = build_date_dimension(rows)?;
    info!(table = %TableName::DimDate, rows = dates.len(), "dimension built");
    let countries = build_country_dimension(rows)?;
    info!(table = %TableName::DimCountry, rows = countries.len(), "dimension built");
    let seniorities = build_seniority_dimension(rows)?;
    info!(table = %TableName::DimSeniority, rows = seniorities.len(), "dimension built");
    let technologies = build_technology_dimension(rows)?;
    info!(table = %TableName::DimTechnology, rows = technologies.len(), "dimension built");

    Ok(DimensionSet {
        candidates,
        dates,
        countries,
        seniorities,
        technologies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(first: &str, email: &str, date: (i32, u32, u32), country: &str) -> ScoredApplication {
        ScoredApplication {
            record: ApplicationRecord {
                first_name: first.to_string(),
                last_name: "Diaz".to_string(),
                email: email.to_string(),
                application_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                    .expect("valid date"),
                country: country.to_string(),
                years_of_experience: 2.0,
                seniority: "Junior".to_string(),
                technology: "Python".to_string(),
                code_challenge_score: 8.0,
                technical_interview_score: 8.0,
            },
            is_hired: true,
        }
    }

    #[test]
    fn same_name_with_different_email_is_a_new_candidate() {
        let rows = [
            scored("Ana", "ana@a.com", (2021, 1, 1), "Peru"),
            scored("Ana", "ana@b.com", (2021, 1, 1), "Peru"),
            scored("Ana", "ana@a.com", (2021, 1, 1), "Peru"),
        ];
        let dims = build_dimensions(&rows).expect("build dimensions");
        assert_eq!(dims.candidates.len(), 2);
        assert_eq!(dims.candidates.members()[0].email, "ana@a.com");
    }

    #[test]
    fn dates_are_chronological() {
        let rows = [
            scored("A", "a@x", (2022, 3, 1), "Peru"),
            scored("B", "b@x", (2018, 7, 9), "Peru"),
            scored("C", "c@x", (2020, 1, 1), "Peru"),
        ];
        let dates = build_date_dimension(&rows).expect("build dates");
        let years: Vec<_> = dates
            .date_rows()
            .map(|(key, attrs)| (key.get(), attrs.year))
            .collect();
        assert_eq!(years, vec![(1, 2018), (2, 2020), (3, 2022)]);
    }

    #[test]
    fn country_keys_follow_name_order() {
        let rows = [
            scored("A", "a@x", (2020, 1, 1), "Brazil"),
            scored("B", "b@x", (2020, 1, 1), "Argentina"),
        ];
        let dims = build_dimensions(&rows).expect("build dimensions");
        assert_eq!(
            dims.countries.key_of(&"Argentina".to_string()).map(|k| k.get()),
            Some(1)
        );
        assert_eq!(dims.seniorities.len(), 1);
        assert_eq!(dims.technologies.len(), 1);
    }
}
