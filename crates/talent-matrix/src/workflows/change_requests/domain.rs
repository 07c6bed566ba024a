use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::workflows::assessment::EmployeeId;

/// Identifier wrapper for change requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeRequestId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeRequestKind {
    Profile,
    Certification,
    Assignment,
    PositionHistory,
    Education,
}

impl ChangeRequestKind {
    pub const fn label(self) -> &'static str {
        match self {
            ChangeRequestKind::Profile => "Profil",
            ChangeRequestKind::Certification => "Sertifikasi",
            ChangeRequestKind::Assignment => "Penugasan",
            ChangeRequestKind::PositionHistory => "Riwayat Jabatan",
            ChangeRequestKind::Education => "Riwayat Pendidikan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl ChangeRequestStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, ChangeRequestStatus::Pending)
    }
}

/// Reviewer's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for ChangeRequestStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => ChangeRequestStatus::Approved,
            ReviewDecision::Rejected => ChangeRequestStatus::Rejected,
        }
    }
}

/// Personal data fields an employee may ask to change. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == ProfilePatch::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub position: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
}

/// Requested change, tagged by kind. Record payloads update the entry named by
/// `id` when present and create a new entry otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "new_data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangePayload {
    Profile(ProfilePatch),
    Certification(Certification),
    Assignment(Assignment),
    PositionHistory(PositionRecord),
    Education(EducationRecord),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("profile change does not set any field")]
    EmptyProfilePatch,
    #[error("{kind:?} change requires a non-blank {field}")]
    BlankField {
        kind: ChangeRequestKind,
        field: &'static str,
    },
    #[error("{kind:?} change has an end before its start")]
    InvertedDates { kind: ChangeRequestKind },
}

impl ChangePayload {
    pub fn kind(&self) -> ChangeRequestKind {
        match self {
            ChangePayload::Profile(_) => ChangeRequestKind::Profile,
            ChangePayload::Certification(_) => ChangeRequestKind::Certification,
            ChangePayload::Assignment(_) => ChangeRequestKind::Assignment,
            ChangePayload::PositionHistory(_) => ChangeRequestKind::PositionHistory,
            ChangePayload::Education(_) => ChangeRequestKind::Education,
        }
    }

    /// Id of the existing entry this payload targets, if any.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            ChangePayload::Profile(_) => None,
            ChangePayload::Certification(entry) => entry.id.as_deref(),
            ChangePayload::Assignment(entry) => entry.id.as_deref(),
            ChangePayload::PositionHistory(entry) => entry.id.as_deref(),
            ChangePayload::Education(entry) => entry.id.as_deref(),
        }
    }

    pub fn validate(&self) -> Result<(), PayloadError> {
        let kind = self.kind();
        let required: Vec<(&'static str, &str)> = match self {
            ChangePayload::Profile(patch) => {
                if patch.is_empty() {
                    return Err(PayloadError::EmptyProfilePatch);
                }
                patch
                    .full_name
                    .as_deref()
                    .map(|name| vec![("full_name", name)])
                    .unwrap_or_default()
            }
            ChangePayload::Certification(entry) => {
                vec![("name", entry.name.as_str()), ("issuer", entry.issuer.as_str())]
            }
            ChangePayload::Assignment(entry) => {
                ordered(kind, entry.start_date, entry.end_date)?;
                vec![("title", entry.title.as_str())]
            }
            ChangePayload::PositionHistory(entry) => {
                ordered(kind, entry.start_date, entry.end_date)?;
                vec![("position", entry.position.as_str()), ("unit", entry.unit.as_str())]
            }
            ChangePayload::Education(entry) => {
                if let (Some(start), Some(end)) = (entry.start_year, entry.end_year) {
                    if end < start {
                        return Err(PayloadError::InvertedDates { kind });
                    }
                }
                vec![
                    ("degree", entry.degree.as_str()),
                    ("institution", entry.institution.as_str()),
                ]
            }
        };

        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(PayloadError::BlankField { kind, field }),
            None => Ok(()),
        }
    }
}

fn ordered(
    kind: ChangeRequestKind,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), PayloadError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(PayloadError::InvertedDates { kind }),
        _ => Ok(()),
    }
}

/// An employee's request to change their own master data, pending HR review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: ChangeRequestId,
    pub employee_id: EmployeeId,
    pub payload: ChangePayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub status: ChangeRequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ChangeRequest {
    pub fn kind(&self) -> ChangeRequestKind {
        self.payload.kind()
    }
}

/// Profile fields held on the employee master record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl EmployeeProfile {
    fn patch(&mut self, patch: &ProfilePatch) {
        if let Some(full_name) = &patch.full_name {
            self.full_name = full_name.clone();
        }
        overwrite(&mut self.birth_place, &patch.birth_place);
        overwrite(&mut self.birth_date, &patch.birth_date);
        overwrite(&mut self.gender, &patch.gender);
        overwrite(&mut self.phone, &patch.phone);
        overwrite(&mut self.email, &patch.email);
        overwrite(&mut self.address, &patch.address);
    }
}

fn overwrite<T: Clone>(field: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        field.clone_from(value);
    }
}

/// Master data for one employee that change requests write into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: EmployeeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nip: Option<String>,
    pub profile: EmployeeProfile,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub position_history: Vec<PositionRecord>,
    #[serde(default)]
    pub education: Vec<EducationRecord>,
}

impl EmployeeRecord {
    pub fn new(employee_id: EmployeeId, full_name: impl Into<String>) -> Self {
        Self {
            employee_id,
            nip: None,
            profile: EmployeeProfile {
                full_name: full_name.into(),
                ..EmployeeProfile::default()
            },
            certifications: Vec::new(),
            assignments: Vec::new(),
            position_history: Vec::new(),
            education: Vec::new(),
        }
    }

    /// Writes an approved payload into the record.
    ///
    /// `new_id` is only called when the payload creates an entry.
    pub fn apply(
        &mut self,
        payload: &ChangePayload,
        new_id: impl FnOnce(ChangeRequestKind) -> String,
    ) -> Result<AppliedChange, ApplyError> {
        let kind = payload.kind();
        let (entry_id, created) = match payload {
            ChangePayload::Profile(patch) => {
                self.profile.patch(patch);
                (None, false)
            }
            ChangePayload::Certification(entry) => {
                upsert(&mut self.certifications, entry.clone(), kind, new_id)?
            }
            ChangePayload::Assignment(entry) => {
                upsert(&mut self.assignments, entry.clone(), kind, new_id)?
            }
            ChangePayload::PositionHistory(entry) => {
                upsert(&mut self.position_history, entry.clone(), kind, new_id)?
            }
            ChangePayload::Education(entry) => {
                upsert(&mut self.education, entry.clone(), kind, new_id)?
            }
        };

        Ok(AppliedChange {
            kind,
            entry_id,
            created,
        })
    }
}

/// Outcome of applying a payload to an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedChange {
    pub kind: ChangeRequestKind,
    pub entry_id: Option<String>,
    pub created: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("{kind:?} entry '{id}' does not exist on the employee record")]
    UnknownEntry { kind: ChangeRequestKind, id: String },
}

trait RecordEntry {
    fn entry_id(&self) -> Option<&str>;
    fn assign_id(&mut self, id: String);
}

macro_rules! record_entry {
    ($($entry:ty),+ $(,)?) => {
        $(impl RecordEntry for $entry {
            fn entry_id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn assign_id(&mut self, id: String) {
                self.id = Some(id);
            }
        })+
    };
}

record_entry!(Certification, Assignment, PositionRecord, EducationRecord);

fn upsert<T: RecordEntry>(
    entries: &mut Vec<T>,
    mut entry: T,
    kind: ChangeRequestKind,
    new_id: impl FnOnce(ChangeRequestKind) -> String,
) -> Result<(Option<String>, bool), ApplyError> {
    match entry.entry_id().map(str::to_string) {
        Some(id) => {
            let slot = entries
                .iter_mut()
                .find(|existing| existing.entry_id() == Some(id.as_str()))
                .ok_or_else(|| ApplyError::UnknownEntry {
                    kind,
                    id: id.clone(),
                })?;
            *slot = entry;
            Ok((Some(id), false))
        }
        None => {
            let id = new_id(kind);
            entry.assign_id(id.clone());
            entries.push(entry);
            Ok((Some(id), true))
        }
    }
}
