use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::domain::{
    AssessmentId, AssessmentSubmission, Axis, EmployeeId, Indicator,
};
use crate::workflows::assessment::repository::{
    AssessmentQuery, AssessmentRecord, AssessmentRepository, RepositoryError,
};
use crate::workflows::assessment::{assessment_router, AssessmentService, ScoringEngine};

/// One indicator per axis, each carrying the full axis weight, so totals equal the raw scores.
pub(super) fn axis_pair(performance: f64, potential: f64) -> Vec<Indicator> {
    vec![
        Indicator::new(
            Axis::Performance,
            "Kinerja Utama",
            100.0,
            "Penilaian Kinerja",
            100.0,
            performance,
        ),
        Indicator::new(
            Axis::Potential,
            "Potensi",
            100.0,
            "Penilaian Potensi",
            100.0,
            potential,
        ),
    ]
}

/// Two components per axis with split indicators.
pub(super) fn layered_indicators() -> Vec<Indicator> {
    vec![
        Indicator::new(Axis::Performance, "Kinerja Utama", 60.0, "SKP", 100.0, 80.0),
        Indicator::new(Axis::Performance, "Kinerja Penguat", 40.0, "Penghargaan", 50.0, 70.0),
        Indicator::new(Axis::Performance, "Kinerja Penguat", 40.0, "Umpan Balik 360", 50.0, 90.0),
        Indicator::new(Axis::Potential, "Kompetensi", 70.0, "Penilaian Kompetensi", 100.0, 65.0),
        Indicator::new(Axis::Potential, "Kualifikasi", 30.0, "Pendidikan", 100.0, 85.0),
    ]
}

pub(super) fn submission(employee: &str, year: i32, indicators: Vec<Indicator>) -> AssessmentSubmission {
    AssessmentSubmission {
        employee_id: EmployeeId(employee.to_string()),
        year,
        period: None,
        indicators,
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(repository.clone(), ScoringEngine::default());
    (service, repository)
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.same_period(&record.employee_id, record.year, &record.period)
        });
        if duplicate || guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&record.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, query: &AssessmentQuery) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(records)
    }

    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _query: &AssessmentQuery) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &AssessmentId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
