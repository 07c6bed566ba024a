use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    Competency, CompetencyDraft, CompetencyError, CompetencyId, JobPosition, JobPositionDraft,
    JobPositionId, JobPositionView, ResolvedRequirement, MAX_LEVEL, MIN_LEVEL,
};
use super::repository::{CompetencyRepository, JobPositionRepository, RepositoryError};

/// Competency catalogue plus the job positions that draw on it.
pub struct CompetencyService<C, J> {
    competencies: Arc<C>,
    positions: Arc<J>,
}

static COMPETENCY_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static JOB_POSITION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_competency_id() -> CompetencyId {
    let id = COMPETENCY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CompetencyId(format!("comp-{id:06}"))
}

fn next_job_position_id() -> JobPositionId {
    let id = JOB_POSITION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobPositionId(format!("job-{id:06}"))
}

impl<C, J> CompetencyService<C, J>
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    pub fn new(competencies: Arc<C>, positions: Arc<J>) -> Self {
        Self {
            competencies,
            positions,
        }
    }

    /// Catalogue ordered by category label, then name.
    pub fn list_competencies(&self) -> Result<Vec<Competency>, CompetencyServiceError> {
        let mut competencies = self.competencies.list()?;
        competencies.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(competencies)
    }

    pub fn get_competency(&self, id: &CompetencyId) -> Result<Competency, CompetencyServiceError> {
        let competency = self
            .competencies
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(competency)
    }

    pub fn create_competency(
        &self,
        draft: CompetencyDraft,
    ) -> Result<Competency, CompetencyServiceError> {
        let competency = build_competency(next_competency_id(), draft)?;
        let stored = self.competencies.insert(competency)?;
        info!(competency_id = %stored.id.0, name = %stored.name, "competency created");
        Ok(stored)
    }

    pub fn update_competency(
        &self,
        id: &CompetencyId,
        draft: CompetencyDraft,
    ) -> Result<Competency, CompetencyServiceError> {
        let competency = build_competency(id.clone(), draft)?;
        self.competencies.update(competency.clone())?;
        info!(competency_id = %competency.id.0, "competency updated");
        Ok(competency)
    }

    /// Refuses while any job position still requires the competency.
    pub fn delete_competency(&self, id: &CompetencyId) -> Result<(), CompetencyServiceError> {
        let positions = self
            .positions
            .list()?
            .iter()
            .filter(|position| position.requires(id))
            .count();
        if positions > 0 {
            return Err(CompetencyError::InUse {
                competency_id: id.0.clone(),
                positions,
            }
            .into());
        }

        self.competencies.delete(id)?;
        info!(competency_id = %id.0, "competency deleted");
        Ok(())
    }

    /// Positions ordered by title; `available_only` drops closed ones.
    pub fn list_positions(
        &self,
        available_only: bool,
    ) -> Result<Vec<JobPositionView>, CompetencyServiceError> {
        let mut positions: Vec<_> = self
            .positions
            .list()?
            .into_iter()
            .filter(|position| !available_only || position.is_available)
            .collect();
        positions.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.0.cmp(&b.id.0)));

        let catalogue = self.catalogue()?;
        Ok(positions
            .into_iter()
            .map(|position| resolve(position, &catalogue))
            .collect())
    }

    pub fn get_position(
        &self,
        id: &JobPositionId,
    ) -> Result<JobPositionView, CompetencyServiceError> {
        let position = self
            .positions
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(resolve(position, &self.catalogue()?))
    }

    pub fn create_position(
        &self,
        draft: JobPositionDraft,
    ) -> Result<JobPositionView, CompetencyServiceError> {
        let position = self.build_position(next_job_position_id(), draft)?;
        let stored = self.positions.insert(position)?;
        info!(
            job_position_id = %stored.id.0,
            requirements = stored.competencies.len(),
            "job position created"
        );
        Ok(resolve(stored, &self.catalogue()?))
    }

    /// Replaces every field, including the full requirement list.
    pub fn update_position(
        &self,
        id: &JobPositionId,
        draft: JobPositionDraft,
    ) -> Result<JobPositionView, CompetencyServiceError> {
        let position = self.build_position(id.clone(), draft)?;
        self.positions.update(position.clone())?;
        info!(
            job_position_id = %position.id.0,
            requirements = position.competencies.len(),
            "job position updated"
        );
        Ok(resolve(position, &self.catalogue()?))
    }

    pub fn delete_position(&self, id: &JobPositionId) -> Result<(), CompetencyServiceError> {
        self.positions.delete(id)?;
        info!(job_position_id = %id.0, "job position deleted");
        Ok(())
    }

    fn catalogue(&self) -> Result<HashMap<CompetencyId, Competency>, CompetencyServiceError> {
        Ok(self
            .competencies
            .list()?
            .into_iter()
            .map(|competency| (competency.id.clone(), competency))
            .collect())
    }

    fn build_position(
        &self,
        id: JobPositionId,
        draft: JobPositionDraft,
    ) -> Result<JobPosition, CompetencyServiceError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CompetencyError::BlankTitle.into());
        }

        let catalogue = self.catalogue()?;
        let mut seen = HashSet::new();
        for required in &draft.competencies {
            let competency_id = &required.competency_id;
            if !(MIN_LEVEL..=MAX_LEVEL).contains(&required.required_level) {
                return Err(CompetencyError::LevelOutOfRange {
                    competency_id: competency_id.0.clone(),
                    level: required.required_level,
                }
                .into());
            }
            if !catalogue.contains_key(competency_id) {
                return Err(CompetencyError::UnknownCompetency(competency_id.0.clone()).into());
            }
            if !seen.insert(competency_id) {
                return Err(CompetencyError::DuplicateRequirement(competency_id.0.clone()).into());
            }
        }

        Ok(JobPosition {
            id,
            title: title.to_string(),
            unit: clean(draft.unit),
            level: clean(draft.level),
            description: clean(draft.description),
            is_available: draft.is_available,
            competencies: draft.competencies,
        })
    }
}

fn build_competency(
    id: CompetencyId,
    draft: CompetencyDraft,
) -> Result<Competency, CompetencyError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(CompetencyError::BlankName);
    }
    Ok(Competency {
        id,
        name: name.to_string(),
        category: draft.category,
        description: clean(draft.description),
    })
}

fn resolve(position: JobPosition, catalogue: &HashMap<CompetencyId, Competency>) -> JobPositionView {
    let competencies = position
        .competencies
        .into_iter()
        .filter_map(|required| match catalogue.get(&required.competency_id) {
            Some(competency) => Some(ResolvedRequirement {
                competency: competency.clone(),
                required_level: required.required_level,
                priority: required.priority,
            }),
            None => {
                warn!(
                    job_position_id = %position.id.0,
                    competency_id = %required.competency_id.0,
                    "required competency missing from catalogue"
                );
                None
            }
        })
        .collect();

    JobPositionView {
        id: position.id,
        title: position.title,
        unit: position.unit,
        level: position.level,
        description: position.description,
        is_available: position.is_available,
        competencies,
    }
}

fn clean(text: Option<String>) -> Option<String> {
    text.map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Error raised by the competency service.
#[derive(Debug, thiserror::Error)]
pub enum CompetencyServiceError {
    #[error(transparent)]
    Invalid(#[from] CompetencyError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
