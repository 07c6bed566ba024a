use serde::{Deserialize, Serialize};

use super::super::domain::Axis;
use super::indicators::ScoredIndicator;

/// Per-axis totals. Values above 100 are kept as-is; they indicate misconfigured weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTotals {
    pub performance: f64,
    pub potential: f64,
    pub overall: f64,
}

impl AxisTotals {
    pub fn new(performance: f64, potential: f64) -> Self {
        Self {
            performance,
            potential,
            overall: performance + potential,
        }
    }

    pub fn for_axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Performance => self.performance,
            Axis::Potential => self.potential,
        }
    }
}

pub fn aggregate(rows: &[ScoredIndicator]) -> AxisTotals {
    let total_for = |axis: Axis| -> f64 {
        rows.iter()
            .filter(|row| row.axis() == axis)
            .map(|row| row.contrib_value)
            .sum()
    };

    AxisTotals::new(total_for(Axis::Performance), total_for(Axis::Potential))
}
