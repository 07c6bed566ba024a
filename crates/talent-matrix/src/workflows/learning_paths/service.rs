use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::domain::{
    LearningModule, LearningPath, LearningPathDraft, LearningPathError, LearningPathId,
    LearningPathRecord, ModuleDraft, ModuleUpdate,
};
use super::repository::{LearningPathQuery, LearningPathRepository, RepositoryError};
use crate::workflows::assessment::{AssessmentId, AssessmentRepository};

/// Learning path storage plus seeding from stored assessments.
pub struct LearningPathService<R, A> {
    repository: Arc<R>,
    assessments: Arc<A>,
}

static LEARNING_PATH_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_learning_path_id() -> LearningPathId {
    let id = LEARNING_PATH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LearningPathId(format!("lp-{id:06}"))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl<R, A> LearningPathService<R, A>
where
    R: LearningPathRepository + 'static,
    A: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, assessments: Arc<A>) -> Self {
        Self {
            repository,
            assessments,
        }
    }

    pub fn create(
        &self,
        draft: LearningPathDraft,
    ) -> Result<LearningPathRecord, LearningPathServiceError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(LearningPathError::BlankPathTitle.into());
        }

        let mut path = LearningPath::new(draft.employee_id, title, draft.year);
        path.description = clean(draft.description);
        path.based_on_box = draft.based_on_box;
        path.replace_modules(&draft.modules, today())?;
        self.store(path)
    }

    /// Builds a path from the learning modules of a stored assessment.
    pub fn seed_from_assessment(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<LearningPathRecord, LearningPathServiceError> {
        let assessment = self
            .assessments
            .fetch(assessment_id)?
            .ok_or_else(|| LearningPathServiceError::UnknownAssessment(assessment_id.0.clone()))?;

        let path = LearningPath::from_snapshot(
            assessment.employee_id,
            assessment.year,
            &assessment.snapshot,
        );
        self.store(path)
    }

    pub fn get(
        &self,
        id: &LearningPathId,
    ) -> Result<LearningPathRecord, LearningPathServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(
        &self,
        query: &LearningPathQuery,
    ) -> Result<Vec<LearningPathRecord>, LearningPathServiceError> {
        Ok(self.repository.list(query)?)
    }

    /// Replaces the module list, and the title or description when given.
    pub fn replace(
        &self,
        id: &LearningPathId,
        title: Option<String>,
        description: Option<String>,
        modules: Vec<ModuleDraft>,
    ) -> Result<LearningPathRecord, LearningPathServiceError> {
        let mut record = self.get(id)?;
        if let Some(title) = title {
            let title = title.trim();
            if title.is_empty() {
                return Err(LearningPathError::BlankPathTitle.into());
            }
            record.path.title = title.to_string();
        }
        if description.is_some() {
            record.path.description = clean(description);
        }
        record.path.replace_modules(&modules, today())?;
        record.updated_at = Utc::now();

        self.repository.update(record.clone())?;
        info!(
            learning_path_id = %record.id.0,
            modules = record.path.modules.len(),
            "learning path modules replaced"
        );
        Ok(record)
    }

    pub fn update_module(
        &self,
        id: &LearningPathId,
        module_id: &str,
        update: &ModuleUpdate,
    ) -> Result<LearningModule, LearningPathServiceError> {
        let mut record = self.get(id)?;
        let module = record
            .path
            .update_module(module_id, update, today())?
            .clone();
        record.updated_at = Utc::now();

        self.repository.update(record.clone())?;
        info!(
            learning_path_id = %record.id.0,
            module_id,
            status = ?module.status,
            progress_pct = record.path.progress_pct(),
            "learning module updated"
        );
        Ok(module)
    }

    pub fn delete(&self, id: &LearningPathId) -> Result<(), LearningPathServiceError> {
        self.repository.delete(id)?;
        info!(learning_path_id = %id.0, "learning path deleted");
        Ok(())
    }

    fn store(&self, path: LearningPath) -> Result<LearningPathRecord, LearningPathServiceError> {
        let now = Utc::now();
        let record = LearningPathRecord {
            id: next_learning_path_id(),
            path,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        info!(
            learning_path_id = %stored.id.0,
            employee_id = %stored.path.employee_id.0,
            modules = stored.path.modules.len(),
            "learning path stored"
        );
        Ok(stored)
    }
}

fn clean(text: Option<String>) -> Option<String> {
    text.map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Error raised by the learning path service.
#[derive(Debug, thiserror::Error)]
pub enum LearningPathServiceError {
    #[error(transparent)]
    Path(#[from] LearningPathError),
    #[error("assessment '{0}' not found")]
    UnknownAssessment(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
