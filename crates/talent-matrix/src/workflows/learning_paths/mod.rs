//! Per-employee development plans, usually seeded from an assessment's learning modules.
//!
//! Modules keep their order and ids for the life of a path; progress is the
//! completed share of modules.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    LearningModule, LearningPath, LearningPathDraft, LearningPathError, LearningPathId,
    LearningPathRecord, LearningPathView, ModuleDraft, ModuleStatus, ModuleUpdate,
};
pub use repository::{LearningPathQuery, LearningPathRepository};
pub use router::learning_path_router;
pub use service::{LearningPathService, LearningPathServiceError};
