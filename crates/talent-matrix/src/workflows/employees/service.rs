use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::workflows::assessment::EmployeeId;
use crate::workflows::change_requests::{
    ChangePayload, EmployeeRecord, EmployeeRecordStore, PayloadError, ProfilePatch,
    RecordStoreError,
};

/// Directory listing entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub employee_id: EmployeeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nip: Option<String>,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub certification_count: usize,
}

impl From<&EmployeeRecord> for EmployeeSummary {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            nip: record.nip.clone(),
            full_name: record.profile.full_name.clone(),
            email: record.profile.email.clone(),
            certification_count: record.certifications.len(),
        }
    }
}

/// Employee directory over the shared record store.
pub struct EmployeeService<S> {
    records: Arc<S>,
}

impl<S> EmployeeService<S>
where
    S: EmployeeRecordStore + 'static,
{
    pub fn new(records: Arc<S>) -> Self {
        Self { records }
    }

    /// All employees ordered by full name.
    pub fn list(&self) -> Result<Vec<EmployeeSummary>, EmployeeServiceError> {
        let mut records = self.records.list()?;
        records.sort_by(|a, b| {
            a.profile
                .full_name
                .to_lowercase()
                .cmp(&b.profile.full_name.to_lowercase())
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        Ok(records.iter().map(EmployeeSummary::from).collect())
    }

    /// Full record with every history newest first; undated entries go last.
    pub fn get(&self, employee_id: &EmployeeId) -> Result<EmployeeRecord, EmployeeServiceError> {
        let mut record = self
            .records
            .fetch(employee_id)?
            .ok_or_else(|| EmployeeServiceError::NotFound(employee_id.0.clone()))?;

        record
            .certifications
            .sort_by(|a, b| b.issue_date.cmp(&a.issue_date));
        record
            .assignments
            .sort_by(|a, b| b.start_date.cmp(&a.start_date));
        record
            .position_history
            .sort_by(|a, b| b.start_date.cmp(&a.start_date));
        record
            .education
            .sort_by(|a, b| b.start_year.cmp(&a.start_year));
        Ok(record)
    }

    /// HR edit of profile fields, written straight to the record without review.
    pub fn update_profile(
        &self,
        employee_id: &EmployeeId,
        patch: ProfilePatch,
    ) -> Result<EmployeeRecord, EmployeeServiceError> {
        let payload = ChangePayload::Profile(patch);
        payload.validate()?;
        if self.records.fetch(employee_id)?.is_none() {
            return Err(EmployeeServiceError::NotFound(employee_id.0.clone()));
        }

        self.records.apply(employee_id, &payload)?;
        info!(employee_id = %employee_id.0, "employee profile updated");
        self.get(employee_id)
    }
}

/// Error raised by the employee service.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeServiceError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("employee '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Records(#[from] RecordStoreError),
}
