use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::assessment::{AssessmentSnapshot, BoxNumber, EmployeeId};

/// Identifier wrapper for stored learning paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearningPathId(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ModuleStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ModuleStatus::NotStarted => "Belum Mulai",
            ModuleStatus::InProgress => "Sedang Berlangsung",
            ModuleStatus::Completed => "Selesai",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningModule {
    pub id: String,
    pub title: String,
    pub status: ModuleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
}

/// A module as supplied by the caller; its position in the list sets the order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModuleDraft {
    pub title: String,
    #[serde(default)]
    pub status: ModuleStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl ModuleDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: ModuleStatus::NotStarted,
            notes: None,
            target_date: None,
        }
    }
}

/// Input for creating a learning path by hand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LearningPathDraft {
    pub employee_id: EmployeeId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub year: i32,
    #[serde(default)]
    pub based_on_box: Option<BoxNumber>,
    #[serde(default)]
    pub modules: Vec<ModuleDraft>,
}

/// Partial change to one module. Omitted fields stay as they are; a blank note clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModuleUpdate {
    #[serde(default)]
    pub status: Option<ModuleStatus>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LearningPathError {
    #[error("learning path title must not be blank")]
    BlankPathTitle,
    #[error("module title must not be blank")]
    BlankTitle,
    #[error("module '{0}' is not part of this learning path")]
    UnknownModule(String),
    #[error("module '{0}' must be completed before it can carry a completion date")]
    NotCompleted(String),
}

/// Ordered list of modules with completion tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub employee_id: EmployeeId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on_box: Option<BoxNumber>,
    pub modules: Vec<LearningModule>,
    next_module: u32,
}

impl LearningPath {
    pub fn new(employee_id: EmployeeId, title: impl Into<String>, year: i32) -> Self {
        Self {
            employee_id,
            title: title.into(),
            description: None,
            year,
            based_on_box: None,
            modules: Vec::new(),
            next_module: 1,
        }
    }

    /// Seeds one not-started module per learning module in the snapshot, in order.
    pub fn from_snapshot(employee_id: EmployeeId, year: i32, snapshot: &AssessmentSnapshot) -> Self {
        let box_number = snapshot.box_number();
        let mut path = Self::new(
            employee_id,
            format!("Learning Path {year} - Box {box_number}"),
            year,
        );
        path.based_on_box = Some(box_number);
        for title in &snapshot.learning_modules {
            path.push_module(title.clone());
        }
        path
    }

    pub fn add_module(&mut self, title: &str) -> Result<&LearningModule, LearningPathError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LearningPathError::BlankTitle);
        }
        let index = self.push_module(title.to_string());
        Ok(&self.modules[index])
    }

    pub fn remove_module(&mut self, module_id: &str) -> Result<LearningModule, LearningPathError> {
        let position = self
            .modules
            .iter()
            .position(|module| module.id == module_id)
            .ok_or_else(|| LearningPathError::UnknownModule(module_id.to_string()))?;
        Ok(self.modules.remove(position))
    }

    /// Swaps the whole module list. Nothing changes if any title is blank.
    ///
    /// Replacement modules get fresh ids; drafts that arrive completed are stamped with `today`.
    pub fn replace_modules(
        &mut self,
        drafts: &[ModuleDraft],
        today: NaiveDate,
    ) -> Result<(), LearningPathError> {
        if drafts.iter().any(|draft| draft.title.trim().is_empty()) {
            return Err(LearningPathError::BlankTitle);
        }

        self.modules.clear();
        for draft in drafts {
            let index = self.push_module(draft.title.trim().to_string());
            let module = &mut self.modules[index];
            module.status = draft.status;
            module.notes = draft.notes.as_deref().and_then(clean_note);
            module.target_date = draft.target_date;
            module.completed_date = (draft.status == ModuleStatus::Completed).then_some(today);
        }
        Ok(())
    }

    /// Completing a module sets `completed_date` to `completed_on` unless it already
    /// has one; any other status clears `completed_date`.
    pub fn set_status(
        &mut self,
        module_id: &str,
        status: ModuleStatus,
        completed_on: NaiveDate,
    ) -> Result<&LearningModule, LearningPathError> {
        let update = ModuleUpdate {
            status: Some(status),
            ..ModuleUpdate::default()
        };
        self.update_module(module_id, &update, completed_on)
    }

    /// Applies a partial update to one module.
    ///
    /// An explicit `completed_date` wins over the stored one, and a module that
    /// ends up completed without any date is stamped with `today`.
    pub fn update_module(
        &mut self,
        module_id: &str,
        update: &ModuleUpdate,
        today: NaiveDate,
    ) -> Result<&LearningModule, LearningPathError> {
        let module = self
            .modules
            .iter_mut()
            .find(|module| module.id == module_id)
            .ok_or_else(|| LearningPathError::UnknownModule(module_id.to_string()))?;

        let status = update.status.unwrap_or(module.status);
        if update.completed_date.is_some() && status != ModuleStatus::Completed {
            return Err(LearningPathError::NotCompleted(module_id.to_string()));
        }

        if let Some(notes) = update.notes.as_deref() {
            module.notes = clean_note(notes);
        }
        if let Some(target_date) = update.target_date {
            module.target_date = Some(target_date);
        }
        module.status = status;
        module.completed_date = match status {
            ModuleStatus::Completed => update
                .completed_date
                .or(module.completed_date)
                .or(Some(today)),
            _ => None,
        };
        Ok(module)
    }

    pub fn completed_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|module| module.status == ModuleStatus::Completed)
            .count()
    }

    /// Completed share of modules as a whole percentage; an empty path is 0.
    pub fn progress_pct(&self) -> u8 {
        if self.modules.is_empty() {
            return 0;
        }
        let ratio = self.completed_count() as f64 / self.modules.len() as f64;
        (ratio * 100.0).round() as u8
    }

    fn push_module(&mut self, title: String) -> usize {
        let id = format!("module-{}", self.next_module);
        self.next_module += 1;
        self.modules.push(LearningModule {
            id,
            title,
            status: ModuleStatus::NotStarted,
            notes: None,
            target_date: None,
            completed_date: None,
        });
        self.modules.len() - 1
    }
}

fn clean_note(note: &str) -> Option<String> {
    let note = note.trim();
    (!note.is_empty()).then(|| note.to_string())
}

/// Stored learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPathRecord {
    pub id: LearningPathId,
    #[serde(flatten)]
    pub path: LearningPath,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Record plus its completion roll-up, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct LearningPathView {
    #[serde(flatten)]
    pub record: LearningPathRecord,
    pub completed_count: usize,
    pub progress_pct: u8,
}

impl From<LearningPathRecord> for LearningPathView {
    fn from(record: LearningPathRecord) -> Self {
        Self {
            completed_count: record.path.completed_count(),
            progress_pct: record.path.progress_pct(),
            record,
        }
    }
}
