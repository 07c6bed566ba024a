use super::domain::{Competency, CompetencyId, JobPosition, JobPositionId};

pub use crate::workflows::assessment::RepositoryError;

/// Storage abstraction for the competency catalogue.
pub trait CompetencyRepository: Send + Sync {
    /// Fails with `Conflict` when another competency already has the name, ignoring case.
    fn insert(&self, competency: Competency) -> Result<Competency, RepositoryError>;
    /// Same name rule as `insert`; `NotFound` when the id is unknown.
    fn update(&self, competency: Competency) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CompetencyId) -> Result<Option<Competency>, RepositoryError>;
    fn list(&self) -> Result<Vec<Competency>, RepositoryError>;
    fn delete(&self, id: &CompetencyId) -> Result<(), RepositoryError>;
}

/// Storage abstraction for job positions.
pub trait JobPositionRepository: Send + Sync {
    fn insert(&self, position: JobPosition) -> Result<JobPosition, RepositoryError>;
    fn update(&self, position: JobPosition) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &JobPositionId) -> Result<Option<JobPosition>, RepositoryError>;
    fn list(&self) -> Result<Vec<JobPosition>, RepositoryError>;
    fn delete(&self, id: &JobPositionId) -> Result<(), RepositoryError>;
}
