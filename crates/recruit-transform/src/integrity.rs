//! Referential integrity of fact rows against their dimensions.

use std::collections::BTreeMap;
use std::fmt;

use recruit_model::{DimensionSet, FactApplication, ForeignKey};

/// Unresolved foreign keys found while building or checking the fact table.
///
/// Each entry lists the `application_id`s whose key for that column is null
/// or points at a missing dimension row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    checked_rows: usize,
    unresolved: BTreeMap<ForeignKey, Vec<u32>>,
}

impl IntegrityReport {
    pub fn new(checked_rows: usize) -> Self {
        Self {
            checked_rows,
            unresolved: BTreeMap::new(),
        }
    }

    /// Check existing fact rows against `dimensions`.
    pub fn check(facts: &[FactApplication], dimensions: &DimensionSet) -> Self {
        let mut report = Self::new(facts.len());
        for fact in facts {
            for fk in ForeignKey::ALL {
                let resolved = fact
                    .foreign_key(fk)
                    .is_some_and(|key| dimensions.resolves(fk, key));
                if !resolved {
                    report.record(fk, fact.application_id);
                }
            }
        }
        report
    }

    pub fn record(&mut self, fk: ForeignKey, application_id: u32) {
        self.unresolved.entry(fk).or_default().push(application_id);
    }

    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn checked_rows(&self) -> usize {
        self.checked_rows
    }

    /// Unresolved values in one foreign key column.
    pub fn violations(&self, fk: ForeignKey) -> usize {
        self.unresolved.get(&fk).map_or(0, Vec::len)
    }

    pub fn total_violations(&self) -> usize {
        self.unresolved.values().map(Vec::len).sum()
    }

    /// Fact rows with at least one unresolved key.
    pub fn affected_rows(&self) -> usize {
        let mut ids: Vec<u32> = self.unresolved.values().flatten().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    pub fn application_ids(&self, fk: ForeignKey) -> &[u32] {
        self.unresolved.get(&fk).map_or(&[], Vec::as_slice)
    }

    /// `(column, count)` for every column with violations, in column order.
    pub fn by_column(&self) -> impl Iterator<Item = (ForeignKey, usize)> + '_ {
        self.unresolved.iter().map(|(fk, ids)| (*fk, ids.len()))
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "all foreign keys resolved in {} rows", self.checked_rows);
        }
        write!(
            f,
            "{} unresolved keys in {} of {} rows",
            self.total_violations(),
            self.affected_rows(),
            self.checked_rows
        )?;
        for (index, (fk, count)) in self.by_column().enumerate() {
            let sep = if index == 0 { " (" } else { ", " };
            write!(f, "{sep}{fk}: {count}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use recruit_model::{CandidateIdentity, Dimension, SurrogateKey, TableName};

    use super::*;

    fn key(position: usize) -> Option<SurrogateKey> {
        SurrogateKey::from_position(position)
    }

    fn label(table: TableName, name: &str) -> Dimension<String> {
        Dimension::assign(table, vec![name.to_string()])
    }

    fn one_row_dimensions() -> DimensionSet {
        DimensionSet {
            candidates: Dimension::assign(
                TableName::DimCandidate,
                vec![CandidateIdentity {
                    first_name: "Ana".to_string(),
                    last_name: "Diaz".to_string(),
                    email: "ana@mail.com".to_string(),
                }],
            ),
            dates: Dimension::assign(
                TableName::DimDate,
                vec![NaiveDate::from_ymd_opt(2021, 3, 4).expect("valid date")],
            ),
            countries: label(TableName::DimCountry, "Brazil"),
            seniorities: label(TableName::DimSeniority, "Junior"),
            technologies: label(TableName::DimTechnology, "Go"),
        }
    }

    fn fact(application_id: u32, country_key: Option<SurrogateKey>) -> FactApplication {
        FactApplication {
            application_id,
            candidate_key: key(0),
            date_key: key(0),
            country_key,
            seniority_key: key(0),
            technology_key: key(0),
            code_challenge_score: 8.0,
            technical_interview_score: 9.0,
            is_hired: true,
        }
    }

    #[test]
    fn check_flags_dangling_and_null_keys() {
        let dims = one_row_dimensions();
        let facts = [fact(1, key(0)), fact(2, key(40)), fact(3, None)];

        let report = IntegrityReport::check(&facts, &dims);
        assert_eq!(report.checked_rows(), 3);
        assert_eq!(report.application_ids(ForeignKey::Country), &[2, 3]);
        assert_eq!(report.violations(ForeignKey::Candidate), 0);
        assert_eq!(report.affected_rows(), 2);
    }

    #[test]
    fn check_passes_resolved_facts() {
        let dims = one_row_dimensions();
        let report = IntegrityReport::check(&[fact(1, key(0))], &dims);
        assert!(report.is_clean());
        assert_eq!(report.checked_rows(), 1);
    }

    #[test]
    fn clean_report_displays_row_count() {
        let report = IntegrityReport::new(12);
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "all foreign keys resolved in 12 rows");
    }

    #[test]
    fn counts_violations_per_column() {
        let mut report = IntegrityReport::new(5);
        report.record(ForeignKey::Country, 2);
        report.record(ForeignKey::Country, 4);
        report.record(ForeignKey::Candidate, 4);

        assert_eq!(report.violations(ForeignKey::Country), 2);
        assert_eq!(report.violations(ForeignKey::Date), 0);
        assert_eq!(report.total_violations(), 3);
        assert_eq!(report.affected_rows(), 2);
        assert_eq!(report.application_ids(ForeignKey::Country), &[2, 4]);
        assert_eq!(
            report.to_string(),
            "3 unresolved keys in 2 of 5 rows (candidate_key: 1, country_key: 2)"
        );
    }
}
