use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{Axis, Indicator};

#[derive(Debug, thiserror::Error)]
pub enum IndicatorImportError {
    #[error("failed to read indicator file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid indicator CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown axis '{value}' (expected kinerja/performance or potensial/potential)")]
    UnknownAxis { row: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct IndicatorRow {
    axis: String,
    component: String,
    component_weight: f64,
    indicator: String,
    indicator_weight: f64,
    raw_score: f64,
}

/// Reads `axis,component,component_weight,indicator,indicator_weight,raw_score` rows.
///
/// Range checks are left to the scoring engine so CSV and JSON inputs fail the same way.
pub fn parse_indicators<R: Read>(reader: R) -> Result<Vec<Indicator>, IndicatorImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut indicators = Vec::new();

    for (index, record) in csv_reader.deserialize::<IndicatorRow>().enumerate() {
        let row = record?;
        let axis = Axis::from_tag(&row.axis).ok_or_else(|| IndicatorImportError::UnknownAxis {
            // header is line 1
            row: index + 2,
            value: row.axis.clone(),
        })?;

        indicators.push(Indicator::new(
            axis,
            row.component,
            row.component_weight,
            row.indicator,
            row.indicator_weight,
            row.raw_score,
        ));
    }

    Ok(indicators)
}

pub fn read_indicators(path: impl AsRef<Path>) -> Result<Vec<Indicator>, IndicatorImportError> {
    let file = std::fs::File::open(path)?;
    parse_indicators(file)
}
