use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::blueprint::{AssessmentBlueprint, BlueprintError};
use super::domain::{AssessmentId, AssessmentSubmission, EmployeeId, Indicator};
use super::repository::{AssessmentQuery, AssessmentRecord, AssessmentRepository, RepositoryError};
use super::scoring::{AssessmentSnapshot, ScoringEngine, ScoringError};

/// Service composing the scoring engine with snapshot storage.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
    blueprint: Arc<AssessmentBlueprint>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asm-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: ScoringEngine) -> Self {
        Self {
            repository,
            engine: Arc::new(engine),
            blueprint: Arc::new(AssessmentBlueprint::standard()),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn blueprint(&self) -> &AssessmentBlueprint {
        &self.blueprint
    }

    /// Score indicators without storing anything.
    pub fn preview(&self, indicators: &[Indicator]) -> Result<AssessmentSnapshot, AssessmentServiceError> {
        Ok(self.engine.score(indicators)?)
    }

    /// Score and store a new assessment for the submission's employee and period.
    pub fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let period = submission.period_label();
        let snapshot = self.engine.score(&submission.indicators)?;
        let now = Utc::now();

        let record = AssessmentRecord {
            id: next_assessment_id(),
            employee_id: submission.employee_id,
            year: submission.year,
            period,
            snapshot,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        info!(
            assessment_id = %stored.id.0,
            employee_id = %stored.employee_id.0,
            box_number = stored.snapshot.box_number().get(),
            "assessment stored"
        );
        Ok(stored)
    }

    /// Build the standard indicator set from raw scores and submit it.
    pub fn generate_standard(
        &self,
        employee_id: EmployeeId,
        year: i32,
        scores: &BTreeMap<String, f64>,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let indicators = self.blueprint.fill(scores)?;
        self.submit(AssessmentSubmission {
            employee_id,
            year,
            period: None,
            indicators,
        })
    }

    /// Replace an assessment's indicator rows and recompute its snapshot.
    pub fn rescore(
        &self,
        assessment_id: &AssessmentId,
        indicators: Vec<Indicator>,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let mut record = self.get(assessment_id)?;
        record.snapshot = self.engine.score(&indicators)?;
        record.updated_at = Utc::now();

        self.repository.update(record.clone())?;
        info!(
            assessment_id = %record.id.0,
            box_number = record.snapshot.box_number().get(),
            "assessment rescored"
        );
        Ok(record)
    }

    pub fn get(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(assessment_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(
        &self,
        query: &AssessmentQuery,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        Ok(self.repository.list(query)?)
    }

    pub fn delete(&self, assessment_id: &AssessmentId) -> Result<(), AssessmentServiceError> {
        self.repository.delete(assessment_id)?;
        info!(assessment_id = %assessment_id.0, "assessment deleted");
        Ok(())
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Blueprint(#[from] BlueprintError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
