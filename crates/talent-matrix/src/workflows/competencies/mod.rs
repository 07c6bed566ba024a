//! Competency catalogue and the job positions that require its entries.
//!
//! Required levels run from 1 to 5. A competency cannot be removed while a
//! position still requires it.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Competency, CompetencyCategory, CompetencyDraft, CompetencyError, CompetencyId, JobPosition,
    JobPositionDraft, JobPositionId, JobPositionView, Priority, RequiredCompetency,
    ResolvedRequirement, MAX_LEVEL, MIN_LEVEL,
};
pub use repository::{CompetencyRepository, JobPositionRepository};
pub use router::competency_router;
pub use service::{CompetencyService, CompetencyServiceError};
