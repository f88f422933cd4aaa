//! Hiring business rule.
//!
//! A candidate is hired when both the code challenge score and the technical
//! interview score reach their thresholds. Thresholds are inclusive.

use recruit_model::{ApplicationRecord, HiringThresholds, ScoredApplication};
use tracing::info;

/// Hired/rejected counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiringSummary {
    pub hired: usize,
    pub rejected: usize,
}

impl HiringSummary {
    pub fn total(&self) -> usize {
        self.hired + self.rejected
    }

    /// Share of hired rows in percent, 0 for an empty run.
    pub fn hired_pct(&self) -> f64 {
        percent(self.hired, self.total())
    }

    pub fn rejected_pct(&self) -> f64 {
        percent(self.rejected, self.total())
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// The hiring decision for one pair of scores.
pub fn is_hired(
    code_challenge: f64,
    technical_interview: f64,
    thresholds: &HiringThresholds,
) -> bool {
    code_challenge >= thresholds.code_challenge
        && technical_interview >= thresholds.technical_interview
}

/// Attach the hiring decision to every row.
pub fn apply_hiring_rule(
    rows: Vec<ApplicationRecord>,
    thresholds: &HiringThresholds,
) -> (Vec<ScoredApplication>, HiringSummary) {
    let mut summary = HiringSummary::default();
    let scored: Vec<ScoredApplication> = rows
        .into_iter()
        .map(|record| {
            let hired = is_hired(
                record.code_challenge_score,
                record.technical_interview_score,
                thresholds,
            );
            if hired {
                summary.hired += 1;
            } else {
                summary.rejected += 1;
            }
            ScoredApplication {
                record,
                is_hired: hired,
            }
        })
        .collect();

    info!(
        hired = summary.hired,
        hired_pct = %format!("{:.1}", summary.hired_pct()),
        rejected = summary.rejected,
        rejected_pct = %format!("{:.1}", summary.rejected_pct()),
        "hiring rule applied"
    );

    (scored, summary)
}
