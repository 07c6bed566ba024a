use serde::{Deserialize, Serialize};

use super::matrix::BoxNumber;
use super::ScoringError;

/// Career actions per box, indexed by `box - 1`. Order is significant.
pub const BOX_RECOMMENDATIONS: [&[&str]; 9] = [
    &["Diproses sesuai ketentuan peraturan perundangan"],
    &[
        "Bimbingan kinerja",
        "Pengembangan kompetensi",
        "Penempatan yang sesuai",
    ],
    &[
        "Bimbingan kinerja",
        "Konseling kinerja",
        "Pengembangan kompetensi",
        "Penempatan yang sesuai",
    ],
    &["Rotasi", "Pengembangan kompetensi"],
    &[
        "Penempatan yang sesuai",
        "Bimbingan kinerja",
        "Pengembangan kompetensi",
    ],
    &[
        "Penempatan yang sesuai",
        "Bimbingan kinerja",
        "Konseling kinerja",
    ],
    &[
        "Dipertahankan",
        "Masuk Kelompok Rencana Suksesi Instansi",
        "Rotasi/Pengayaan jabatan",
        "Pengembangan kompetensi",
        "Tugas belajar",
    ],
    &[
        "Dipertahankan",
        "Masuk Kelompok Rencana Suksesi Instansi",
        "Rotasi/Perluasan jabatan",
        "Bimbingan kinerja",
    ],
    &[
        "Dipromosikan dan dipertahankan",
        "Masuk Kelompok Rencana Suksesi Instansi/Nasional",
        "Penghargaan",
    ],
];

/// Learning modules suggested for each recommendation.
pub const RECOMMENDATION_MODULES: &[(&str, &[&str])] = &[
    (
        "Dipromosikan dan dipertahankan",
        &[
            "Leadership Acceleration Program",
            "Strategic Project Assignment",
        ],
    ),
    (
        "Masuk Kelompok Rencana Suksesi Instansi/Nasional",
        &["Succession Readiness Workshop", "Executive Mentoring"],
    ),
    ("Penghargaan", &["Recognition & Rewards Program"]),
    (
        "Dipertahankan",
        &[
            "On-the-job stretch assignments",
            "Continuous performance coaching",
        ],
    ),
    (
        "Rotasi/Perluasan jabatan",
        &["Rotational Assignment Program", "Cross-functional Training"],
    ),
    (
        "Bimbingan kinerja",
        &["Performance Coaching Sessions", "SMART Goal Setting Course"],
    ),
    (
        "Rotasi/Pengayaan jabatan",
        &["Role Enrichment Projects", "Specialist Track Training"],
    ),
    (
        "Tugas belajar",
        &["Formal Education Support (S2/Sertifikasi)"],
    ),
    (
        "Penempatan yang sesuai",
        &["Role-fit Assessment & Realignment"],
    ),
    (
        "Konseling kinerja",
        &["Employee Assistance & Counseling Program"],
    ),
    (
        "Pengembangan kompetensi",
        &["Technical Upskilling Courses", "Leadership Fundamentals"],
    ),
    (
        "Diproses sesuai ketentuan peraturan perundangan",
        &["HR Review & Compliance Process"],
    ),
];

/// Recommendations and derived learning modules for one box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub box_number: BoxNumber,
    pub recommendations: Vec<String>,
    pub learning_modules: Vec<String>,
}

/// Modules for a recommendation; recommendations without an entry yield none.
pub fn modules_for(recommendation: &str) -> &'static [&'static str] {
    RECOMMENDATION_MODULES
        .iter()
        .find(|(name, _)| *name == recommendation)
        .map(|(_, modules)| *modules)
        .unwrap_or(&[])
}

pub fn recommendations_for(box_number: BoxNumber) -> RecommendationSet {
    let recommendations = BOX_RECOMMENDATIONS[usize::from(box_number.get()) - 1];

    let mut learning_modules: Vec<String> = Vec::new();
    for module in recommendations
        .iter()
        .flat_map(|recommendation| modules_for(recommendation))
    {
        if !learning_modules.iter().any(|seen| seen == module) {
            learning_modules.push((*module).to_string());
        }
    }

    RecommendationSet {
        box_number,
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        learning_modules,
    }
}

/// Resolves a raw box number. Anything outside 1..=9 is an upstream classification bug.
pub fn resolve(box_number: u8) -> Result<RecommendationSet, ScoringError> {
    let box_number = BoxNumber::try_from(box_number)?;
    Ok(recommendations_for(box_number))
}
