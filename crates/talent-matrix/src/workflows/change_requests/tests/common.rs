use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::assessment::EmployeeId;
use crate::workflows::change_requests::domain::{
    AppliedChange, Certification, ChangePayload, ChangeRequest, ChangeRequestId,
    ChangeRequestStatus, EmployeeRecord, PositionRecord, ProfilePatch,
};
use crate::workflows::change_requests::repository::{
    ChangeRequestQuery, ChangeRequestRepository, EmployeeRecordStore, RecordStoreError,
    RepositoryError,
};
use crate::workflows::change_requests::{change_request_router, ChangeRequestService};

pub(super) const EMPLOYEE: &str = "emp-100";

pub(super) fn employee() -> EmployeeId {
    EmployeeId(EMPLOYEE.to_string())
}

pub(super) fn seeded_record() -> EmployeeRecord {
    let mut record = EmployeeRecord::new(employee(), "Budi Santoso");
    record.nip = Some("198701012010011001".to_string());
    record.certifications.push(Certification {
        id: Some("cert-1".to_string()),
        name: "Certified HR Professional".to_string(),
        issuer: "BNSP".to_string(),
        issue_date: NaiveDate::from_ymd_opt(2021, 5, 10),
        credential: Some("CHRP-2021-001".to_string()),
    });
    record
}

pub(super) fn new_certification() -> ChangePayload {
    ChangePayload::Certification(Certification {
        id: None,
        name: "Project Management Professional".to_string(),
        issuer: "PMI".to_string(),
        issue_date: NaiveDate::from_ymd_opt(2024, 2, 1),
        credential: Some("PMP-778".to_string()),
    })
}

pub(super) fn phone_change() -> ChangePayload {
    ChangePayload::Profile(ProfilePatch {
        phone: Some("081234567890".to_string()),
        ..ProfilePatch::default()
    })
}

pub(super) fn missing_position() -> ChangePayload {
    ChangePayload::PositionHistory(PositionRecord {
        id: Some("pos-404".to_string()),
        position: "Kepala Subbagian".to_string(),
        unit: "Biro Umum".to_string(),
        start_date: None,
        end_date: None,
    })
}

pub(super) type TestService = ChangeRequestService<MemoryRequests, MemoryRecords>;

pub(super) fn build_service() -> (TestService, Arc<MemoryRequests>, Arc<MemoryRecords>) {
    let requests = Arc::new(MemoryRequests::default());
    let records = Arc::new(MemoryRecords::with(seeded_record()));
    let service = ChangeRequestService::new(requests.clone(), records.clone());
    (service, requests, records)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    change_request_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRequests {
    pub(super) requests: Arc<Mutex<Vec<ChangeRequest>>>,
}

impl ChangeRequestRepository for MemoryRequests {
    fn insert(&self, request: ChangeRequest) -> Result<ChangeRequest, RepositoryError> {
        let mut guard = self.requests.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == request.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(request.clone());
        Ok(request)
    }

    fn transition(
        &self,
        expected: ChangeRequestStatus,
        request: ChangeRequest,
    ) -> Result<ChangeRequest, RepositoryError> {
        let mut guard = self.requests.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == request.id)
            .ok_or(RepositoryError::NotFound)?;
        if slot.status != expected {
            return Err(RepositoryError::Conflict);
        }
        *slot = request.clone();
        Ok(request)
    }

    fn fetch(&self, id: &ChangeRequestId) -> Result<Option<ChangeRequest>, RepositoryError> {
        let guard = self.requests.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|request| request.id == *id).cloned())
    }

    fn list(&self, query: &ChangeRequestQuery) -> Result<Vec<ChangeRequest>, RepositoryError> {
        let guard = self.requests.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|request| query.matches(request))
            .cloned()
            .collect())
    }
}

/// Request store whose reads take as long as a database round trip.
pub(super) struct SlowRequests {
    pub(super) inner: MemoryRequests,
    pub(super) delay: Duration,
}

impl ChangeRequestRepository for SlowRequests {
    fn insert(&self, request: ChangeRequest) -> Result<ChangeRequest, RepositoryError> {
        self.inner.insert(request)
    }

    fn transition(
        &self,
        expected: ChangeRequestStatus,
        request: ChangeRequest,
    ) -> Result<ChangeRequest, RepositoryError> {
        self.inner.transition(expected, request)
    }

    fn fetch(&self, id: &ChangeRequestId) -> Result<Option<ChangeRequest>, RepositoryError> {
        let found = self.inner.fetch(id);
        thread::sleep(self.delay);
        found
    }

    fn list(&self, query: &ChangeRequestQuery) -> Result<Vec<ChangeRequest>, RepositoryError> {
        self.inner.list(query)
    }
}

/// Request store that accepts submissions but cannot record decisions.
#[derive(Default)]
pub(super) struct ReadOnlyRequests {
    pub(super) inner: MemoryRequests,
}

impl ChangeRequestRepository for ReadOnlyRequests {
    fn insert(&self, request: ChangeRequest) -> Result<ChangeRequest, RepositoryError> {
        self.inner.insert(request)
    }

    fn transition(
        &self,
        _expected: ChangeRequestStatus,
        _request: ChangeRequest,
    ) -> Result<ChangeRequest, RepositoryError> {
        Err(RepositoryError::Unavailable("write quorum lost".to_string()))
    }

    fn fetch(&self, id: &ChangeRequestId) -> Result<Option<ChangeRequest>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn list(&self, query: &ChangeRequestQuery) -> Result<Vec<ChangeRequest>, RepositoryError> {
        self.inner.list(query)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRecords {
    pub(super) records: Arc<Mutex<HashMap<EmployeeId, EmployeeRecord>>>,
}

impl MemoryRecords {
    pub(super) fn with(record: EmployeeRecord) -> Self {
        let store = Self::default();
        store
            .records
            .lock()
            .expect("record mutex poisoned")
            .insert(record.employee_id.clone(), record);
        store
    }

    pub(super) fn record(&self, employee_id: &EmployeeId) -> EmployeeRecord {
        self.records
            .lock()
            .expect("record mutex poisoned")
            .get(employee_id)
            .cloned()
            .expect("employee seeded")
    }
}

impl EmployeeRecordStore for MemoryRecords {
    fn fetch(&self, employee_id: &EmployeeId) -> Result<Option<EmployeeRecord>, RecordStoreError> {
        let guard = self.records.lock().expect("record mutex poisoned");
        Ok(guard.get(employee_id).cloned())
    }

    fn list(&self) -> Result<Vec<EmployeeRecord>, RecordStoreError> {
        let guard = self.records.lock().expect("record mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn apply(
        &self,
        employee_id: &EmployeeId,
        payload: &ChangePayload,
    ) -> Result<AppliedChange, RecordStoreError> {
        let mut guard = self.records.lock().expect("record mutex poisoned");
        let record = guard
            .get_mut(employee_id)
            .ok_or_else(|| RecordStoreError::UnknownEmployee(employee_id.0.clone()))?;
        let next = record.certifications.len()
            + record.assignments.len()
            + record.position_history.len()
            + record.education.len()
            + 1;
        Ok(record.apply(payload, |_| format!("entry-{next}"))?)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
