use std::collections::BTreeMap;

use super::domain::{Axis, Indicator};

/// One row of the agency's indicator layout, without a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorTemplate {
    pub key: &'static str,
    pub axis: Axis,
    pub component: &'static str,
    pub component_weight: f64,
    pub indicator: &'static str,
    pub indicator_weight: f64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BlueprintError {
    #[error("missing score for indicator '{0}'")]
    MissingScore(String),
    #[error("unknown indicator key '{0}'")]
    UnknownIndicator(String),
}

/// Indicator layout used when an assessment is generated rather than uploaded.
#[derive(Debug)]
pub struct AssessmentBlueprint {
    templates: Vec<IndicatorTemplate>,
}

impl AssessmentBlueprint {
    pub fn standard() -> Self {
        Self {
            templates: standard_templates(),
        }
    }

    pub fn templates(&self) -> &[IndicatorTemplate] {
        &self.templates
    }

    pub fn templates_for_axis(&self, axis: Axis) -> Vec<&IndicatorTemplate> {
        self.templates
            .iter()
            .filter(|template| template.axis == axis)
            .collect()
    }

    /// Builds indicator rows from raw scores keyed by template key.
    ///
    /// Every template needs a score and every score needs a template.
    pub fn fill(&self, scores: &BTreeMap<String, f64>) -> Result<Vec<Indicator>, BlueprintError> {
        if let Some(unknown) = scores
            .keys()
            .find(|key| !self.templates.iter().any(|template| template.key == key.as_str()))
        {
            return Err(BlueprintError::UnknownIndicator(unknown.clone()));
        }

        self.templates
            .iter()
            .map(|template| {
                let raw_score = scores
                    .get(template.key)
                    .copied()
                    .ok_or_else(|| BlueprintError::MissingScore(template.key.to_string()))?;
                Ok(Indicator::new(
                    template.axis,
                    template.component,
                    template.component_weight,
                    template.indicator,
                    template.indicator_weight,
                    raw_score,
                ))
            })
            .collect()
    }

    /// Placeholder scores used for employees without a recorded assessment.
    pub fn sample_scores() -> BTreeMap<String, f64> {
        [
            ("penilaian_kinerja", 75.0),
            ("penghargaan", 60.0),
            ("penugasan_tim", 70.0),
            ("umpan_balik_360", 65.0),
            ("penilaian_kompetensi", 72.0),
            ("pengembangan_kompetensi", 68.0),
            ("pengalaman_jabatan", 66.0),
            ("penilaian_potensi", 70.0),
            ("tingkat_pendidikan", 85.0),
            ("kesesuaian_bidang", 78.0),
            ("verifikasi_disiplin", 90.0),
        ]
        .into_iter()
        .map(|(key, score)| (key.to_string(), score))
        .collect()
    }
}

// Indicator weights are shares of their component, so each component sums to 100.
fn standard_templates() -> Vec<IndicatorTemplate> {
    vec![
        IndicatorTemplate {
            key: "penilaian_kinerja",
            axis: Axis::Performance,
            component: "Kinerja Utama",
            component_weight: 60.0,
            indicator: "Penilaian Kinerja",
            indicator_weight: 100.0,
        },
        IndicatorTemplate {
            key: "penghargaan",
            axis: Axis::Performance,
            component: "Kinerja Penguat",
            component_weight: 40.0,
            indicator: "Penghargaan",
            indicator_weight: 37.5,
        },
        IndicatorTemplate {
            key: "penugasan_tim",
            axis: Axis::Performance,
            component: "Kinerja Penguat",
            component_weight: 40.0,
            indicator: "Penugasan dalam Tim Kerja",
            indicator_weight: 37.5,
        },
        IndicatorTemplate {
            key: "umpan_balik_360",
            axis: Axis::Performance,
            component: "Kinerja Penguat",
            component_weight: 40.0,
            indicator: "Umpan Balik Kinerja 360 derajat",
            indicator_weight: 25.0,
        },
        IndicatorTemplate {
            key: "penilaian_kompetensi",
            axis: Axis::Potential,
            component: "Kompetensi",
            component_weight: 40.0,
            indicator: "Penilaian Kompetensi",
            indicator_weight: 50.0,
        },
        IndicatorTemplate {
            key: "pengembangan_kompetensi",
            axis: Axis::Potential,
            component: "Kompetensi",
            component_weight: 40.0,
            indicator: "Pengembangan Kompetensi",
            indicator_weight: 25.0,
        },
        IndicatorTemplate {
            key: "pengalaman_jabatan",
            axis: Axis::Potential,
            component: "Kompetensi",
            component_weight: 40.0,
            indicator: "Pengalaman Jabatan",
            indicator_weight: 25.0,
        },
        IndicatorTemplate {
            key: "penilaian_potensi",
            axis: Axis::Potential,
            component: "Potensi",
            component_weight: 25.0,
            indicator: "Penilaian Potensi",
            indicator_weight: 100.0,
        },
        IndicatorTemplate {
            key: "tingkat_pendidikan",
            axis: Axis::Potential,
            component: "Kualifikasi",
            component_weight: 20.0,
            indicator: "Tingkat Pendidikan Formal",
            indicator_weight: 50.0,
        },
        IndicatorTemplate {
            key: "kesesuaian_bidang",
            axis: Axis::Potential,
            component: "Kualifikasi",
            component_weight: 20.0,
            indicator: "Kesesuaian Bidang Ilmu",
            indicator_weight: 50.0,
        },
        IndicatorTemplate {
            key: "verifikasi_disiplin",
            axis: Axis::Potential,
            component: "Integritas & Moralitas",
            component_weight: 15.0,
            indicator: "Verifikasi Rekam Jejak Disiplin",
            indicator_weight: 100.0,
        },
    ]
}
