use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Identifier wrapper for catalogue competencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompetencyId(pub String);

/// Identifier wrapper for job positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobPositionId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetencyCategory {
    Technical,
    Managerial,
    #[serde(rename = "Sosial")]
    Social,
}

impl CompetencyCategory {
    /// Stored label; listings sort on it.
    pub const fn as_str(self) -> &'static str {
        match self {
            CompetencyCategory::Technical => "Technical",
            CompetencyCategory::Managerial => "Managerial",
            CompetencyCategory::Social => "Sosial",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    pub id: CompetencyId,
    pub name: String,
    pub category: CompetencyCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Competency {
    pub fn same_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompetencyDraft {
    pub name: String,
    pub category: CompetencyCategory,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A competency a position needs, at a level from 1 to 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredCompetency {
    pub competency_id: CompetencyId,
    pub required_level: u8,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosition {
    pub id: JobPositionId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_available: bool,
    pub competencies: Vec<RequiredCompetency>,
}

impl JobPosition {
    pub fn requires(&self, competency_id: &CompetencyId) -> bool {
        self.competencies
            .iter()
            .any(|required| required.competency_id == *competency_id)
    }
}

fn available() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobPositionDraft {
    pub title: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "available")]
    pub is_available: bool,
    #[serde(default)]
    pub competencies: Vec<RequiredCompetency>,
}

/// Requirement with the competency it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRequirement {
    pub competency: Competency,
    pub required_level: u8,
    pub priority: Priority,
}

/// Position as returned by the API, requirements resolved against the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPositionView {
    pub id: JobPositionId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_available: bool,
    pub competencies: Vec<ResolvedRequirement>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CompetencyError {
    #[error("competency name must not be blank")]
    BlankName,
    #[error("job position title must not be blank")]
    BlankTitle,
    #[error("competency '{0}' is not in the catalogue")]
    UnknownCompetency(String),
    #[error("competency '{0}' is listed more than once")]
    DuplicateRequirement(String),
    #[error("required level {level} for competency '{competency_id}' is outside 1..=5")]
    LevelOutOfRange { competency_id: String, level: u8 },
    #[error("competency '{competency_id}' is still required by {positions} job position(s)")]
    InUse {
        competency_id: String,
        positions: usize,
    },
}
