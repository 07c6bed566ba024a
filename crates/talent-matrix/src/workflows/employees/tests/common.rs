use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::assessment::EmployeeId;
use crate::workflows::change_requests::{
    AppliedChange, Certification, ChangePayload, EducationRecord, EmployeeRecord,
    EmployeeRecordStore, RecordStoreError,
};
use crate::workflows::employees::{employee_router, EmployeeService};

pub(super) fn certification(id: &str, name: &str, issued: Option<NaiveDate>) -> Certification {
    Certification {
        id: Some(id.to_string()),
        name: name.to_string(),
        issuer: "BNSP".to_string(),
        issue_date: issued,
        credential: None,
    }
}

pub(super) fn education(id: &str, degree: &str, start_year: i32) -> EducationRecord {
    EducationRecord {
        id: Some(id.to_string()),
        degree: degree.to_string(),
        institution: "Universitas Indonesia".to_string(),
        major: None,
        start_year: Some(start_year),
        end_year: None,
        gpa: None,
    }
}

/// "budi" only sorts ahead of "Citra" when the name comparison ignores case.
pub(super) fn directory() -> Arc<MemoryRecords> {
    let mut budi = EmployeeRecord::new(EmployeeId("emp-001".to_string()), "budi Santoso");
    budi.certifications = vec![
        certification("cert-1", "CISA", NaiveDate::from_ymd_opt(2018, 4, 2)),
        certification("cert-2", "Undated", None),
        certification("cert-3", "CISSP", NaiveDate::from_ymd_opt(2022, 9, 12)),
    ];
    budi.education = vec![
        education("edu-1", "S1 - Teknik Informatika", 2005),
        education("edu-2", "S2 - Magister Komputer", 2013),
    ];

    let mut citra = EmployeeRecord::new(EmployeeId("emp-002".to_string()), "Citra Lestari");
    citra.profile.email = Some("citra.lestari@example.go.id".to_string());

    let store = MemoryRecords::default();
    {
        let mut guard = store.records.lock().expect("record mutex poisoned");
        for record in [budi, citra] {
            guard.insert(record.employee_id.clone(), record);
        }
    }
    Arc::new(store)
}

pub(super) fn build_service() -> (EmployeeService<MemoryRecords>, Arc<MemoryRecords>) {
    let records = directory();
    (EmployeeService::new(records.clone()), records)
}

pub(super) fn router_with_service(service: EmployeeService<MemoryRecords>) -> axum::Router {
    employee_router(Arc::new(service))
}

#[derive(Default)]
pub(super) struct MemoryRecords {
    pub(super) records: Mutex<HashMap<EmployeeId, EmployeeRecord>>,
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
        Ok(record.apply(payload, |_| "entry-new".to_string())?)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
