//! Orchestrated transform: cleanse, hire, dimensions, fact.
//!
//! The transform is a pure function of its input rows and options. Nothing is
//! handed to the load stage unless every step succeeded.

use std::time::Instant;

use recruit_model::{HiringThresholds, IntegrityPolicy, RawApplication, StarSchema};
use tracing::{debug, info, info_span, warn};

use crate::cleanse::{CleanseReport, clean};
use crate::dimensions::build_dimensions;
use crate::error::{Result, TransformError};
use crate::fact::{FactTable, build_fact};
use crate::integrity::IntegrityReport;
use crate::rules::{HiringSummary, apply_hiring_rule};

/// Options for one transform run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformOptions {
    pub thresholds: HiringThresholds,
    pub integrity_policy: IntegrityPolicy,
}

/// The six warehouse tables plus the findings of each stage.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub schema: StarSchema,
    pub cleanse: CleanseReport,
    pub hiring: HiringSummary,
    pub integrity: IntegrityReport,
}

impl TransformOutput {
    /// True when the run proceeded past unresolved foreign keys.
    pub fn integrity_flagged(&self) -> bool {
        !self.integrity.is_clean()
    }
}

/// Decide whether a run with integrity findings may continue.
///
/// A clean report always passes. Otherwise [`IntegrityPolicy::Abort`] fails with
/// [`TransformError::ReferentialIntegrity`] and [`IntegrityPolicy::Proceed`]
/// hands the report back so the run is flagged.
pub fn apply_policy(
    integrity: IntegrityReport,
    policy: IntegrityPolicy,
) -> Result<IntegrityReport> {
    if integrity.is_clean() {
        return Ok(integrity);
    }
    match policy {
        IntegrityPolicy::Abort => Err(TransformError::ReferentialIntegrity { report: integrity }),
        IntegrityPolicy::Proceed => {
            warn!(
                unresolved = integrity.total_violations(),
                affected_rows = integrity.affected_rows(),
                checked_rows = integrity.checked_rows(),
                "proceeding with unresolved foreign keys"
            );
            Ok(integrity)
        }
    }
}

/// Run the full transform over extracted rows.
///
/// Under [`IntegrityPolicy::Abort`] an unresolved foreign key fails the run
/// with [`TransformError::ReferentialIntegrity`]. Under
/// [`IntegrityPolicy::Proceed`] the rows are kept with null keys and the
/// report is returned alongside the tables.
pub fn transform(rows: &[RawApplication], options: &TransformOptions) -> Result<TransformOutput> {
    let transform_span = info_span!("transform", input_rows = rows.len());
    let _transform_guard = transform_span.enter();
    let transform_start = Instant::now();

    let cleansed = info_span!("cleanse").in_scope(|| {
        let start = Instant::now();
        let outcome = clean(rows);
        debug!(
            kept_rows = outcome.report.kept_rows(),
            duration_ms = start.elapsed().as_millis(),
            "cleanse complete"
        );
        outcome
    });

    let (scored, hiring) = info_span!("hiring_rule").in_scope(|| {
        let start = Instant::now();
        let result = apply_hiring_rule(cleansed.rows, &options.thresholds);
        debug!(
            duration_ms = start.elapsed().as_millis(),
            "hiring rule complete"
        );
        result
    });

    let dimensions = info_span!("dimensions").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let dimensions = build_dimensions(&scored)?;
        debug!(
            duration_ms = start.elapsed().as_millis(),
            "dimensions complete"
        );
        Ok(dimensions)
    })?;

    let facts = info_span!("fact").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let FactTable { rows, .. } = build_fact(&scored, &dimensions)?;
        debug!(
            rows = rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "fact complete"
        );
        Ok(rows)
    })?;

    let integrity = apply_policy(
        IntegrityReport::check(&facts, &dimensions),
        options.integrity_policy,
    )?;

    let schema = StarSchema { dimensions, facts };
    info!(
        input_rows = rows.len(),
        fact_rows = schema.facts.len(),
        duration_ms = transform_start.elapsed().as_millis(),
        "transform complete"
    );

    Ok(TransformOutput {
        schema,
        cleanse: cleansed.report,
        hiring,
        integrity,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use recruit_model::ForeignKey;

    use super::*;

    fn raw(first: &str, code: f64, interview: f64) -> RawApplication {
        RawApplication {
            first_name: Some(first.to_string()),
            last_name: Some("Lopez".to_string()),
            email: Some(format!("{first}@mail.com")),
            application_date: NaiveDate::from_ymd_opt(2022, 8, 14),
            country: Some("Ecuador".to_string()),
            years_of_experience: Some(1.0),
            seniority: Some("Trainee".to_string()),
            technology: Some("QA Manual".to_string()),
            code_challenge_score: Some(code),
            technical_interview_score: Some(interview),
        }
    }

    #[test]
    fn fact_rows_match_cleansed_rows() {
        let mut incomplete = raw("c", 8.0, 8.0);
        incomplete.email = None;
        let rows = [raw("a", 8.0, 9.0), incomplete, raw("b", 2.0, 9.0)];

        let output = transform(&rows, &TransformOptions::default()).expect("transform");
        assert_eq!(output.cleanse.dropped_rows, 1);
        assert_eq!(output.schema.facts.len(), output.cleanse.kept_rows());
        assert_eq!(output.hiring.hired, 1);
        assert!(!output.integrity_flagged());
    }

    /// Fact rows for `rows` mapped against dimensions built from `known` only.
    fn partial_integrity(known: &[RawApplication], rows: &[RawApplication]) -> IntegrityReport {
        let thresholds = HiringThresholds::default();
        let (known, _) = apply_hiring_rule(clean(known).rows, &thresholds);
        let (rows, _) = apply_hiring_rule(clean(rows).rows, &thresholds);
        let dims = build_dimensions(&known).expect("dimensions");
        build_fact(&rows, &dims).expect("fact").integrity
    }

    #[test]
    fn abort_policy_rejects_unresolved_keys() {
        let report = partial_integrity(
            &[raw("a", 8.0, 9.0)],
            &[raw("a", 8.0, 9.0), raw("b", 1.0, 2.0)],
        );
        assert_eq!(report.violations(ForeignKey::Candidate), 1);

        let report = match apply_policy(report, IntegrityPolicy::Abort) {
            Err(TransformError::ReferentialIntegrity { report }) => report,
            other => panic!("expected a referential integrity error, got {other:?}"),
        };
        assert_eq!(report.application_ids(ForeignKey::Candidate), &[2]);
        assert_eq!(report.checked_rows(), 2);
    }

    #[test]
    fn proceed_policy_returns_the_flagged_report() {
        let report = partial_integrity(
            &[raw("a", 8.0, 9.0)],
            &[raw("a", 8.0, 9.0), raw("b", 1.0, 2.0)],
        );

        let kept = apply_policy(report.clone(), IntegrityPolicy::Proceed).expect("proceed");
        assert_eq!(kept, report);
        assert!(!kept.is_clean());
        assert_eq!(kept.affected_rows(), 1);
    }

    #[test]
    fn clean_report_passes_either_policy() {
        let report = partial_integrity(&[raw("a", 8.0, 9.0)], &[raw("a", 8.0, 9.0)]);
        assert!(apply_policy(report.clone(), IntegrityPolicy::Abort).is_ok());
        assert!(apply_policy(report, IntegrityPolicy::Proceed).is_ok());
    }

    #[test]
    fn empty_input_produces_empty_tables() {
        let output = transform(&[], &TransformOptions::default()).expect("transform");
        assert!(output.schema.row_counts().iter().all(|(_, rows)| *rows == 0));
        assert!(output.integrity.is_clean());
    }
}
