use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::{
    AssessmentId, AssessmentQuery, AssessmentRecord, AssessmentRepository, AssessmentService,
    AssessmentSubmission, Axis, EmployeeId, Indicator, RepositoryError, ScoringEngine,
};
use crate::workflows::learning_paths::domain::{LearningPathId, LearningPathRecord};
use crate::workflows::learning_paths::repository::{LearningPathQuery, LearningPathRepository};
use crate::workflows::learning_paths::{learning_path_router, LearningPathService};

pub(super) const EMPLOYEE: &str = "emp-200";

pub(super) type TestService = LearningPathService<MemoryPaths, MemoryAssessments>;

pub(super) fn build_service() -> (TestService, Arc<MemoryPaths>, Arc<MemoryAssessments>) {
    let paths = Arc::new(MemoryPaths::default());
    let assessments = Arc::new(MemoryAssessments::default());
    let service = LearningPathService::new(paths.clone(), assessments.clone());
    (service, paths, assessments)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    learning_path_router(Arc::new(service))
}

/// Stores a scored assessment that lands in box 9.
pub(super) fn stored_assessment(assessments: &Arc<MemoryAssessments>) -> AssessmentRecord {
    let service = AssessmentService::new(assessments.clone(), ScoringEngine::default());
    service
        .submit(AssessmentSubmission {
            employee_id: EmployeeId(EMPLOYEE.to_string()),
            year: 2025,
            period: None,
            indicators: vec![
                Indicator::new(Axis::Performance, "Kinerja", 100.0, "SKP", 100.0, 85.0),
                Indicator::new(Axis::Potential, "Potensi", 100.0, "Potensi", 100.0, 90.0),
            ],
        })
        .expect("assessment stored")
}

#[derive(Default)]
pub(super) struct MemoryPaths {
    records: Mutex<Vec<LearningPathRecord>>,
}

impl MemoryPaths {
    pub(super) fn stored(&self, id: &LearningPathId) -> Option<LearningPathRecord> {
        let guard = self.records.lock().expect("path mutex poisoned");
        guard.iter().find(|record| record.id == *id).cloned()
    }
}

impl LearningPathRepository for MemoryPaths {
    fn insert(&self, record: LearningPathRecord) -> Result<LearningPathRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("path mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: LearningPathRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("path mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record;
        Ok(())
    }

    fn fetch(&self, id: &LearningPathId) -> Result<Option<LearningPathRecord>, RepositoryError> {
        Ok(self.stored(id))
    }

    fn list(&self, query: &LearningPathQuery) -> Result<Vec<LearningPathRecord>, RepositoryError> {
        let guard = self.records.lock().expect("path mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &LearningPathId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("path mutex poisoned");
        let position = guard
            .iter()
            .position(|record| record.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        guard.remove(position);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryAssessments {
    records: Mutex<HashMap<AssessmentId, AssessmentRecord>>,
}

impl AssessmentRepository for MemoryAssessments {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("assessment mutex poisoned");
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("assessment mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("assessment mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, query: &AssessmentQuery) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("assessment mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("assessment mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
