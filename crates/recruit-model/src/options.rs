//! Configuration options for transform processing.

use serde::{Deserialize, Serialize};

/// Inclusive score thresholds of the hiring rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HiringThresholds {
    pub code_challenge: f64,
    pub technical_interview: f64,
}

impl HiringThresholds {
    pub const DEFAULT_SCORE: f64 = 7.0;
}

impl Default for HiringThresholds {
    fn default() -> Self {
        Self {
            code_challenge: Self::DEFAULT_SCORE,
            technical_interview: Self::DEFAULT_SCORE,
        }
    }
}

/// What to do when fact rows reference natural keys missing from a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityPolicy {
    /// Fail the transform before anything reaches the warehouse.
    #[default]
    Abort,
    /// Keep the rows with null foreign keys and flag the run.
    Proceed,
}
