mod aggregate;
mod indicators;
mod matrix;
mod recommendations;

pub use aggregate::{aggregate, AxisTotals};
pub use indicators::{
    check_weight_sums, validate_indicators, Contribution, ScoredIndicator, WeightWarning,
};
pub use matrix::{classify, Band, BoxClassification, BoxDescription, BoxNumber, BOX_MATRIX};
pub use recommendations::{
    modules_for, recommendations_for, resolve, RecommendationSet, BOX_RECOMMENDATIONS,
    RECOMMENDATION_MODULES,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::Indicator;
use indicators::score_rows;
use crate::config::ScoringConfig;

/// Errors raised by the scoring engine. All are deterministic; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("indicator '{indicator}' has {field} {value} outside [0, 100]")]
    MalformedIndicator {
        indicator: String,
        field: &'static str,
        value: f64,
    },
    #[error("indicator {field} must not be blank")]
    BlankName { field: &'static str },
    #[error("assessment requires at least one indicator")]
    EmptyIndicatorSet,
    #[error("box number {0} is outside the 9-box grid")]
    InvalidBox(u8),
}

impl ScoringError {
    /// Input errors are the caller's fault; `InvalidBox` is an internal fault.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ScoringError::InvalidBox(_))
    }
}

/// Self-describing evaluation result: raw rows, totals, box, and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub rows: Vec<ScoredIndicator>,
    pub totals: AxisTotals,
    pub classification: BoxClassification,
    pub description: BoxDescription,
    pub recommendations: Vec<String>,
    pub learning_modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WeightWarning>,
}

impl AssessmentSnapshot {
    pub fn box_number(&self) -> BoxNumber {
        self.classification.box_number
    }
}

/// Stateless engine applying the weighting, banding, and recommendation tables.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, indicators: &[Indicator]) -> Result<AssessmentSnapshot, ScoringError> {
        validate_indicators(indicators)?;

        let warnings = check_weight_sums(indicators, self.config.weight_tolerance);
        for warning in &warnings {
            warn!(finding = %warning.summary(), "indicator weights do not balance");
        }

        let rows = score_rows(indicators);
        let totals = aggregate(&rows);
        let classification = classify(totals.performance, totals.potential);
        let RecommendationSet {
            box_number,
            recommendations,
            learning_modules,
        } = recommendations_for(classification.box_number);

        debug!(
            performance = totals.performance,
            potential = totals.potential,
            box_number = box_number.get(),
            "assessment scored"
        );

        Ok(AssessmentSnapshot {
            rows,
            totals,
            classification,
            description: box_number.description(),
            recommendations,
            learning_modules,
            warnings,
        })
    }
}
