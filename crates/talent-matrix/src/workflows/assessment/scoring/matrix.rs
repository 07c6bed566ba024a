use std::fmt;

use serde::{Deserialize, Serialize};

use super::ScoringError;

pub const MID_BAND_FLOOR: f64 = 60.0;
pub const HIGH_BAND_FLOOR: f64 = 80.0;

/// Three-level banding applied independently to each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    /// Lower bounds are inclusive: 60.0 is Mid and 80.0 is High. NaN lands in Low.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_BAND_FLOOR {
            Band::High
        } else if score >= MID_BAND_FLOOR {
            Band::Mid
        } else {
            Band::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Band::Low => "Rendah",
            Band::Mid => "Menengah",
            Band::High => "Tinggi",
        }
    }

    const fn index(self) -> usize {
        match self {
            Band::Low => 0,
            Band::Mid => 1,
            Band::High => 2,
        }
    }
}

/// Box numbers by `[potential][performance]`, both indexed Low, Mid, High.
///
/// The numbering follows the agency's priority ordering and is not row-major.
pub const BOX_MATRIX: [[u8; 3]; 3] = [
    [1, 2, 4], // potential Low
    [3, 5, 7], // potential Mid
    [6, 8, 9], // potential High
];

const BANDS: [Band; 3] = [Band::Low, Band::Mid, Band::High];

/// A validated 9-box category in 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BoxNumber(u8);

impl BoxNumber {
    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn from_bands(performance: Band, potential: Band) -> Self {
        BoxNumber(BOX_MATRIX[potential.index()][performance.index()])
    }

    /// The (performance, potential) bands that map to this box.
    pub fn bands(self) -> (Band, Band) {
        for potential in BANDS {
            for performance in BANDS {
                if BOX_MATRIX[potential.index()][performance.index()] == self.0 {
                    return (performance, potential);
                }
            }
        }
        unreachable!("box numbers are constructed from BOX_MATRIX or validated against 1..=9")
    }
}

impl TryFrom<u8> for BoxNumber {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=9).contains(&value) {
            Ok(BoxNumber(value))
        } else {
            Err(ScoringError::InvalidBox(value))
        }
    }
}

impl From<BoxNumber> for u8 {
    fn from(value: BoxNumber) -> Self {
        value.0
    }
}

impl fmt::Display for BoxNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bands and resulting box for one pair of axis scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxClassification {
    pub performance_band: Band,
    pub potential_band: Band,
    pub box_number: BoxNumber,
}

pub fn classify(performance: f64, potential: f64) -> BoxClassification {
    let performance_band = Band::from_score(performance);
    let potential_band = Band::from_score(potential);
    BoxClassification {
        performance_band,
        potential_band,
        box_number: BoxNumber::from_bands(performance_band, potential_band),
    }
}

/// Display copy for a box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxDescription {
    pub title: String,
    pub text: String,
}

const BOX_DESCRIPTIONS: [(&str, &str); 9] = [
    (
        "Kotak 1 (Potensi rendah / Kinerja di bawah ekspektasi)",
        "Individu yang saat ini belum menunjukkan kinerja yang diharapkan dan juga tidak memiliki indikasi potensi besar untuk berkembang ke level yang lebih tinggi. Kategori ini perlu perhatian serius: apakah salah penempatan, kurang dukungan, atau sebaiknya dipertimbangkan peran lain atau pemisahan.",
    ),
    (
        "Kotak 2 (Potensi rendah / Kinerja sesuai ekspektasi)",
        "Individu yang “cukup” melakukan tugasnya sesuai ekspektasi namun tidak menunjukkan potensi yang kuat untuk naik ke peran yang lebih kompleks. Mereka mungkin tetap sangat bernilai sebagai “kontributor stabil” di posisi saat ini, namun bukan calon pimpinan jangka panjang.",
    ),
    (
        "Kotak 3 (Potensi menengah / Kinerja di bawah ekspektasi)",
        "Individu yang punya potensi yang cukup baik, namun saat ini belum memenuhi ekspektasi kinerja. Mungkin karena belum mendapatkan pelatihan yang cukup, role kurang cocok, atau ada hambatan lainnya. Perlu pengembangan, mentoring, atau pindah posisi agar potensi itu terwujud.",
    ),
    (
        "Kotak 4 (Potensi rendah / Kinerja di atas ekspektasi)",
        "Individu yang performanya sangat baik di posisi sekarang, tetapi untuk berbagai alasan (kemungkinan kompetensi kepemimpinan, keinginan naik, atau faktor lainnya) tidak menunjukkan potensi besar untuk naik ke peran yang lebih besar. Strateginya: beri penghargaan, coba jalur spesialisasi atau peran mendukung, bukan promosi besar-besaran.",
    ),
    (
        "Kotak 5 (Potensi menengah / Kinerja sesuai ekspektasi)",
        "Individu yang melakukan pekerjaannya dengan baik dan memiliki potensi untuk berkembang lebih jauh jika diberi kesempatan. Strategi pengembangan moderat: stretch assignment, pelatihan kepemimpinan, penguatan kompetensi agar naik ke tingkat berikutnya.",
    ),
    (
        "Kotak 6 (Potensi tinggi / Kinerja di bawah ekspektasi)",
        "Kelompok yang menarik: potensi besar tetapi kinerjanya belum memuaskan. Mungkin karena sudah berada di posisi yang salah, kurang motivasi, atau transisi baru. Strategi: evaluasi penyebab rendahnya kinerja, beri coaching/mentoring, mungkin perlu role shift agar bisa “bebas” menunjukkan potensi itu.",
    ),
    (
        "Kotak 7 (Potensi menengah / Kinerja di atas ekspektasi)",
        "Individu yang unggul di pekerjaan sekarang dan menunjukkan potensi yang cukup baik. Mereka bisa ditargetkan untuk naik ke level lebih tinggi dalam waktu menengah. Perlu pengembangan yang lebih agresif dibanding kotak 5.",
    ),
    (
        "Kotak 8 (Potensi tinggi / Kinerja sesuai ekspektasi)",
        "Individu yang kinerjanya bagus sesuai ekspektasi sekarang dan memiliki potensi tinggi untuk naik ke level lebih besar. Ini adalah jalur utama untuk pengembangan, suksesi, dan pelatihan kepemimpinan. Organisasi harus menyiapkan jalur karier dan proyek-pengalaman yang memacu.",
    ),
    (
        "Kotak 9 (Potensi tinggi / Kinerja di atas ekspektasi)",
        "“Bintang” atau “top talent” – kinerja tinggi, potensi tinggi. Kandidat utama untuk promosi, tanggung-jawab lebih besar, dan peran strategis di masa depan. Organisasi harus “fast track” mereka, dengan program akselerasi, mentoring senior, tugas-strategis, suksesi.",
    ),
];

impl BoxNumber {
    pub fn description(self) -> BoxDescription {
        let (title, text) = BOX_DESCRIPTIONS[usize::from(self.0) - 1];
        BoxDescription {
            title: title.to_string(),
            text: text.to_string(),
        }
    }
}
