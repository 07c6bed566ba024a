//! Performance/potential assessments and 9-box classification.
//!
//! Indicators are weighted into two axis totals, banded, and mapped onto the
//! 9-box grid. Each stored assessment keeps the full snapshot so it can be
//! displayed without recomputation.

pub mod blueprint;
pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use blueprint::{AssessmentBlueprint, BlueprintError, IndicatorTemplate};
pub use domain::{
    AssessmentId, AssessmentSubmission, Axis, EmployeeId, Indicator, DEFAULT_PERIOD,
};
pub use import::{parse_indicators, read_indicators, IndicatorImportError};
pub use repository::{
    AssessmentQuery, AssessmentRecord, AssessmentRepository, AssessmentSummaryView,
    RepositoryError,
};
pub use router::assessment_router;
pub use scoring::{
    AssessmentSnapshot, AxisTotals, Band, BoxClassification, BoxDescription, BoxNumber,
    RecommendationSet, ScoredIndicator, ScoringEngine, ScoringError, WeightWarning,
};
pub use service::{AssessmentService, AssessmentServiceError};
