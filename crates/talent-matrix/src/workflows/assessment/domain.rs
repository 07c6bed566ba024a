use serde::{Deserialize, Serialize};

/// Identifier wrapper for employees (the agency's internal record id, not the NIP).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

pub const DEFAULT_PERIOD: &str = "Tahunan";

/// The two axes of the 9-box matrix.
///
/// Every indicator carries its axis explicitly; membership is never derived
/// from display labels such as "Kinerja (Sumbu Y)".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    #[serde(alias = "kinerja", alias = "KINERJA")]
    Performance,
    #[serde(alias = "potensial", alias = "POTENSIAL")]
    Potential,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Performance, Axis::Potential];

    pub const fn label(self) -> &'static str {
        match self {
            Axis::Performance => "Kinerja (Sumbu Y)",
            Axis::Potential => "Potensial (Sumbu X)",
        }
    }

    /// Parses the tag used in imports: `kinerja`/`performance` or `potensial`/`potential`.
    pub fn from_tag(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "kinerja" | "performance" => Some(Axis::Performance),
            "potensial" | "potential" => Some(Axis::Potential),
            _ => None,
        }
    }
}

/// A single weighted metric feeding one axis.
///
/// `component_weight` is the component's share of its axis and
/// `indicator_weight` the indicator's share of its component, both in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub axis: Axis,
    pub component: String,
    pub component_weight: f64,
    pub indicator: String,
    pub indicator_weight: f64,
    pub raw_score: f64,
}

impl Indicator {
    pub fn new(
        axis: Axis,
        component: impl Into<String>,
        component_weight: f64,
        indicator: impl Into<String>,
        indicator_weight: f64,
        raw_score: f64,
    ) -> Self {
        Self {
            axis,
            component: component.into(),
            component_weight,
            indicator: indicator.into(),
            indicator_weight,
            raw_score,
        }
    }
}

/// Request body for creating an assessment for one employee and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub employee_id: EmployeeId,
    pub year: i32,
    #[serde(default)]
    pub period: Option<String>,
    pub indicators: Vec<Indicator>,
}

impl AssessmentSubmission {
    pub fn period_label(&self) -> String {
        match self.period.as_deref().map(str::trim) {
            Some(period) if !period.is_empty() => period.to_string(),
            _ => DEFAULT_PERIOD.to_string(),
        }
    }
}
