use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::competencies::domain::{
    Competency, CompetencyCategory, CompetencyDraft, CompetencyId, JobPosition, JobPositionDraft,
    JobPositionId, Priority, RequiredCompetency,
};
use crate::workflows::competencies::repository::{
    CompetencyRepository, JobPositionRepository, RepositoryError,
};
use crate::workflows::competencies::{competency_router, CompetencyService};

pub(super) type TestService = CompetencyService<MemoryCompetencies, MemoryPositions>;

pub(super) fn build_service() -> TestService {
    CompetencyService::new(
        Arc::new(MemoryCompetencies::default()),
        Arc::new(MemoryPositions::default()),
    )
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    competency_router(Arc::new(service))
}

pub(super) fn competency(name: &str, category: CompetencyCategory) -> CompetencyDraft {
    CompetencyDraft {
        name: name.to_string(),
        category,
        description: None,
    }
}

pub(super) fn requirement(id: &CompetencyId, level: u8, priority: Priority) -> RequiredCompetency {
    RequiredCompetency {
        competency_id: id.clone(),
        required_level: level,
        priority,
    }
}

pub(super) fn position(title: &str, competencies: Vec<RequiredCompetency>) -> JobPositionDraft {
    JobPositionDraft {
        title: title.to_string(),
        unit: Some("Deputi Bidang Operasi".to_string()),
        level: Some("Eselon III".to_string()),
        description: None,
        is_available: true,
        competencies,
    }
}

#[derive(Default)]
pub(super) struct MemoryCompetencies {
    entries: Mutex<Vec<Competency>>,
}

impl CompetencyRepository for MemoryCompetencies {
    fn insert(&self, competency: Competency) -> Result<Competency, RepositoryError> {
        let mut guard = self.entries.lock().expect("competency mutex poisoned");
        if guard.iter().any(|existing| existing.same_name(&competency.name)) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(competency.clone());
        Ok(competency)
    }

    fn update(&self, competency: Competency) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("competency mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.id != competency.id && existing.same_name(&competency.name))
        {
            return Err(RepositoryError::Conflict);
        }
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == competency.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = competency;
        Ok(())
    }

    fn fetch(&self, id: &CompetencyId) -> Result<Option<Competency>, RepositoryError> {
        let guard = self.entries.lock().expect("competency mutex poisoned");
        Ok(guard.iter().find(|competency| competency.id == *id).cloned())
    }

    fn list(&self) -> Result<Vec<Competency>, RepositoryError> {
        Ok(self.entries.lock().expect("competency mutex poisoned").clone())
    }

    fn delete(&self, id: &CompetencyId) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("competency mutex poisoned");
        let position = guard
            .iter()
            .position(|competency| competency.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        guard.remove(position);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryPositions {
    entries: Mutex<Vec<JobPosition>>,
}

impl JobPositionRepository for MemoryPositions {
    fn insert(&self, position: JobPosition) -> Result<JobPosition, RepositoryError> {
        self.entries
            .lock()
            .expect("position mutex poisoned")
            .push(position.clone());
        Ok(position)
    }

    fn update(&self, position: JobPosition) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("position mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == position.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = position;
        Ok(())
    }

    fn fetch(&self, id: &JobPositionId) -> Result<Option<JobPosition>, RepositoryError> {
        let guard = self.entries.lock().expect("position mutex poisoned");
        Ok(guard.iter().find(|position| position.id == *id).cloned())
    }

    fn list(&self) -> Result<Vec<JobPosition>, RepositoryError> {
        Ok(self.entries.lock().expect("position mutex poisoned").clone())
    }

    fn delete(&self, id: &JobPositionId) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("position mutex poisoned");
        let index = guard
            .iter()
            .position(|position| position.id == *id)
            .ok_or(RepositoryError::NotFound)?;
        guard.remove(index);
        Ok(())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
