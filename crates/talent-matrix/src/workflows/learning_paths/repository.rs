use serde::Deserialize;

use super::domain::{LearningPathId, LearningPathRecord};
use crate::workflows::assessment::EmployeeId;

pub use crate::workflows::assessment::RepositoryError;

/// Filter for listing learning paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LearningPathQuery {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

impl LearningPathQuery {
    pub fn matches(&self, record: &LearningPathRecord) -> bool {
        self.employee_id
            .as_ref()
            .map_or(true, |employee_id| record.path.employee_id == *employee_id)
    }
}

/// Storage abstraction for learning paths.
pub trait LearningPathRepository: Send + Sync {
    fn insert(&self, record: LearningPathRecord) -> Result<LearningPathRecord, RepositoryError>;
    fn update(&self, record: LearningPathRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LearningPathId) -> Result<Option<LearningPathRecord>, RepositoryError>;
    /// Matching paths, newest first.
    fn list(&self, query: &LearningPathQuery) -> Result<Vec<LearningPathRecord>, RepositoryError>;
    fn delete(&self, id: &LearningPathId) -> Result<(), RepositoryError>;
}
