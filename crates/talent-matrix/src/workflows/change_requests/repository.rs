use serde::Deserialize;

use super::domain::{
    AppliedChange, ApplyError, ChangePayload, ChangeRequest, ChangeRequestId, ChangeRequestStatus,
    EmployeeRecord,
};
use crate::workflows::assessment::EmployeeId;

pub use crate::workflows::assessment::RepositoryError;

/// Filter for listing change requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChangeRequestQuery {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub status: Option<ChangeRequestStatus>,
}

impl ChangeRequestQuery {
    pub fn matches(&self, request: &ChangeRequest) -> bool {
        self.employee_id
            .as_ref()
            .map_or(true, |employee_id| request.employee_id == *employee_id)
            && self.status.map_or(true, |status| request.status == status)
    }
}

/// Storage abstraction for change requests.
pub trait ChangeRequestRepository: Send + Sync {
    fn insert(&self, request: ChangeRequest) -> Result<ChangeRequest, RepositoryError>;
    /// Stores `request` only if the stored status is still `expected`, as one step.
    ///
    /// Fails with `Conflict` when the status has moved on and `NotFound` when the id is unknown.
    fn transition(
        &self,
        expected: ChangeRequestStatus,
        request: ChangeRequest,
    ) -> Result<ChangeRequest, RepositoryError>;
    fn fetch(&self, id: &ChangeRequestId) -> Result<Option<ChangeRequest>, RepositoryError>;
    /// Matching requests, newest first.
    fn list(&self, query: &ChangeRequestQuery) -> Result<Vec<ChangeRequest>, RepositoryError>;
}

/// Employee master data that approved requests are written into.
pub trait EmployeeRecordStore: Send + Sync {
    fn fetch(&self, employee_id: &EmployeeId) -> Result<Option<EmployeeRecord>, RecordStoreError>;
    fn list(&self) -> Result<Vec<EmployeeRecord>, RecordStoreError>;
    fn apply(
        &self,
        employee_id: &EmployeeId,
        payload: &ChangePayload,
    ) -> Result<AppliedChange, RecordStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("employee '{0}' not found")]
    UnknownEmployee(String),
    #[error(transparent)]
    Apply(#[from] ApplyError),
    #[error("employee records unavailable: {0}")]
    Unavailable(String),
}
