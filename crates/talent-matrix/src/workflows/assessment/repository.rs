use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, EmployeeId};
use super::scoring::{AssessmentSnapshot, Band};

/// Stored assessment: the denormalized snapshot for one employee and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub employee_id: EmployeeId,
    pub year: i32,
    pub period: String,
    pub snapshot: AssessmentSnapshot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn same_period(&self, employee_id: &EmployeeId, year: i32, period: &str) -> bool {
        self.employee_id == *employee_id && self.year == year && self.period == period
    }

    pub fn summary_view(&self) -> AssessmentSummaryView {
        let snapshot = &self.snapshot;
        AssessmentSummaryView {
            assessment_id: self.id.clone(),
            employee_id: self.employee_id.clone(),
            year: self.year,
            period: self.period.clone(),
            total_performance: round2(snapshot.totals.performance),
            total_potential: round2(snapshot.totals.potential),
            overall_score: round2(snapshot.totals.overall),
            performance_band: snapshot.classification.performance_band,
            potential_band: snapshot.classification.potential_band,
            box_number: snapshot.box_number().get(),
            box_title: snapshot.description.title.clone(),
            warning_count: snapshot.warnings.len(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Filter for listing assessments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssessmentQuery {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl AssessmentQuery {
    pub fn matches(&self, record: &AssessmentRecord) -> bool {
        self.employee_id
            .as_ref()
            .map_or(true, |employee_id| record.employee_id == *employee_id)
            && self.year.map_or(true, |year| record.year == year)
    }
}

/// Storage abstraction for assessment snapshots.
pub trait AssessmentRepository: Send + Sync {
    /// Fails with `Conflict` when the employee already has an assessment for the period.
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// Matching records, newest first.
    fn list(&self, query: &AssessmentQuery) -> Result<Vec<AssessmentRecord>, RepositoryError>;
    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact listing view with totals rounded for display.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSummaryView {
    pub assessment_id: AssessmentId,
    pub employee_id: EmployeeId,
    pub year: i32,
    pub period: String,
    pub total_performance: f64,
    pub total_potential: f64,
    pub overall_score: f64,
    pub performance_band: Band,
    pub potential_band: Band,
    pub box_number: u8,
    pub box_title: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub warning_count: usize,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}
