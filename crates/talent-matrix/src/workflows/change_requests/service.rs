use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use super::domain::{
    ChangePayload, ChangeRequest, ChangeRequestId, ChangeRequestStatus, PayloadError,
    ReviewDecision,
};
use super::repository::{
    ChangeRequestQuery, ChangeRequestRepository, EmployeeRecordStore, RecordStoreError,
    RepositoryError,
};
use crate::workflows::assessment::EmployeeId;

/// Employee-initiated master data changes with HR review.
pub struct ChangeRequestService<R, S> {
    repository: Arc<R>,
    records: Arc<S>,
}

static CHANGE_REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_change_request_id() -> ChangeRequestId {
    let id = CHANGE_REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ChangeRequestId(format!("chg-{id:06}"))
}

impl<R, S> ChangeRequestService<R, S>
where
    R: ChangeRequestRepository + 'static,
    S: EmployeeRecordStore + 'static,
{
    pub fn new(repository: Arc<R>, records: Arc<S>) -> Self {
        Self {
            repository,
            records,
        }
    }

    pub fn submit(
        &self,
        employee_id: EmployeeId,
        payload: ChangePayload,
        old_data: Option<Value>,
        reason: Option<String>,
    ) -> Result<ChangeRequest, ChangeRequestServiceError> {
        payload.validate()?;
        if self.records.fetch(&employee_id)?.is_none() {
            return Err(ChangeRequestServiceError::UnknownEmployee(employee_id.0));
        }

        let request = ChangeRequest {
            id: next_change_request_id(),
            employee_id,
            payload,
            old_data,
            reason: reason.filter(|reason| !reason.trim().is_empty()),
            status: ChangeRequestStatus::Pending,
            review_note: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(request)?;
        info!(
            change_request_id = %stored.id.0,
            employee_id = %stored.employee_id.0,
            kind = ?stored.kind(),
            "change request submitted"
        );
        Ok(stored)
    }

    /// Records the reviewer's decision.
    ///
    /// The request is claimed with a compare-and-set on `Pending` before anything
    /// is written to the employee record, so only one review of a request can win.
    /// An approval that cannot be applied releases the claim and the request
    /// stays pending.
    pub fn review(
        &self,
        id: &ChangeRequestId,
        decision: ReviewDecision,
        note: Option<String>,
        reviewer: &str,
    ) -> Result<ChangeRequest, ChangeRequestServiceError> {
        let reviewer = reviewer.trim();
        if reviewer.is_empty() {
            return Err(ChangeRequestServiceError::MissingReviewer);
        }

        let pending = self.get(id)?;
        if pending.status.is_terminal() {
            return Err(ChangeRequestServiceError::InvalidTransition {
                id: pending.id.0,
                status: pending.status,
            });
        }

        let mut decided = pending.clone();
        decided.status = decision.into();
        decided.review_note = note.filter(|note| !note.trim().is_empty());
        decided.reviewed_by = Some(reviewer.to_string());
        decided.reviewed_at = Some(Utc::now());

        let decided = match self
            .repository
            .transition(ChangeRequestStatus::Pending, decided)
        {
            Ok(decided) => decided,
            Err(RepositoryError::Conflict) => {
                let latest = self.get(id)?;
                return Err(ChangeRequestServiceError::InvalidTransition {
                    id: latest.id.0,
                    status: latest.status,
                });
            }
            Err(error) => return Err(error.into()),
        };

        if decision == ReviewDecision::Approved {
            match self.records.apply(&decided.employee_id, &decided.payload) {
                Ok(applied) => info!(
                    change_request_id = %decided.id.0,
                    entry_id = applied.entry_id.as_deref().unwrap_or("-"),
                    created = applied.created,
                    "change applied to employee record"
                ),
                Err(error) => {
                    warn!(
                        change_request_id = %decided.id.0,
                        %error,
                        "approved change could not be applied"
                    );
                    if let Err(release) = self.repository.transition(decided.status, pending) {
                        warn!(
                            change_request_id = %decided.id.0,
                            error = %release,
                            "claimed change request could not be released"
                        );
                    }
                    return Err(error.into());
                }
            }
        }

        info!(
            change_request_id = %decided.id.0,
            status = ?decided.status,
            reviewer,
            "change request reviewed"
        );
        Ok(decided)
    }

    pub fn get(&self, id: &ChangeRequestId) -> Result<ChangeRequest, ChangeRequestServiceError> {
        let request = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(request)
    }

    pub fn list(
        &self,
        query: &ChangeRequestQuery,
    ) -> Result<Vec<ChangeRequest>, ChangeRequestServiceError> {
        Ok(self.repository.list(query)?)
    }
}

/// Error raised by the change-request service.
#[derive(Debug, thiserror::Error)]
pub enum ChangeRequestServiceError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("employee '{0}' not found")]
    UnknownEmployee(String),
    #[error("reviewer name is required")]
    MissingReviewer,
    #[error("change request '{id}' is already {status:?}")]
    InvalidTransition {
        id: String,
        status: ChangeRequestStatus,
    },
    #[error(transparent)]
    Records(#[from] RecordStoreError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
