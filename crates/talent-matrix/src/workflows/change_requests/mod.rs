//! Employee-submitted master data changes and their HR review.
//!
//! Requests start `Pending` and are reviewed exactly once. A review claims the
//! request before an approved payload is written into the employee record.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AppliedChange, ApplyError, Assignment, Certification, ChangePayload, ChangeRequest,
    ChangeRequestId, ChangeRequestKind, ChangeRequestStatus, EducationRecord, EmployeeProfile,
    EmployeeRecord, PayloadError, PositionRecord, ProfilePatch, ReviewDecision,
};
pub use repository::{
    ChangeRequestQuery, ChangeRequestRepository, EmployeeRecordStore, RecordStoreError,
};
pub use router::change_request_router;
pub use service::{ChangeRequestService, ChangeRequestServiceError};
