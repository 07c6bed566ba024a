use serde::{Deserialize, Serialize};

use super::super::domain::{Axis, Indicator};
use super::ScoringError;

pub const MAX_PERCENT: f64 = 100.0;

/// Derived share of an indicator in its axis total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub overall_pct: f64,
    pub contrib_value: f64,
}

impl Indicator {
    pub fn contribution(&self) -> Contribution {
        let overall_pct = self.component_weight * self.indicator_weight / MAX_PERCENT;
        Contribution {
            overall_pct,
            contrib_value: overall_pct * self.raw_score / MAX_PERCENT,
        }
    }
}

/// An indicator row together with its computed contribution, as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredIndicator {
    #[serde(flatten)]
    pub indicator: Indicator,
    pub overall_pct: f64,
    pub contrib_value: f64,
}

impl ScoredIndicator {
    pub fn axis(&self) -> Axis {
        self.indicator.axis
    }
}

/// Rejects rows whose weights or scores fall outside [0, 100] or whose names are blank.
pub fn validate_indicators(indicators: &[Indicator]) -> Result<(), ScoringError> {
    if indicators.is_empty() {
        return Err(ScoringError::EmptyIndicatorSet);
    }

    for row in indicators {
        if row.component.trim().is_empty() {
            return Err(ScoringError::BlankName { field: "component" });
        }
        if row.indicator.trim().is_empty() {
            return Err(ScoringError::BlankName { field: "indicator" });
        }

        for (field, value) in [
            ("component_weight", row.component_weight),
            ("indicator_weight", row.indicator_weight),
            ("raw_score", row.raw_score),
        ] {
            if !value.is_finite() || !(0.0..=MAX_PERCENT).contains(&value) {
                return Err(ScoringError::MalformedIndicator {
                    indicator: row.indicator.clone(),
                    field,
                    value,
                });
            }
        }
    }

    Ok(())
}

pub(crate) fn score_rows(indicators: &[Indicator]) -> Vec<ScoredIndicator> {
    indicators
        .iter()
        .map(|indicator| {
            let Contribution {
                overall_pct,
                contrib_value,
            } = indicator.contribution();
            ScoredIndicator {
                indicator: indicator.clone(),
                overall_pct,
                contrib_value,
            }
        })
        .collect()
}

/// Weight-sum findings. These are reported, never corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightWarning {
    ComponentWeights {
        axis: Axis,
        total: f64,
    },
    IndicatorWeights {
        axis: Axis,
        component: String,
        total: f64,
    },
    InconsistentComponentWeight {
        axis: Axis,
        component: String,
        expected: f64,
        found: f64,
    },
}

impl WeightWarning {
    pub fn summary(&self) -> String {
        match self {
            WeightWarning::ComponentWeights { axis, total } => format!(
                "component weights on {} sum to {:.2} instead of 100",
                axis.label(),
                total
            ),
            WeightWarning::IndicatorWeights {
                axis,
                component,
                total,
            } => format!(
                "indicator weights in {} ({}) sum to {:.2} instead of 100",
                component,
                axis.label(),
                total
            ),
            WeightWarning::InconsistentComponentWeight {
                axis,
                component,
                expected,
                found,
            } => format!(
                "component {} ({}) declared with weight {:.2} and {:.2}",
                component,
                axis.label(),
                expected,
                found
            ),
        }
    }
}

struct ComponentTally<'a> {
    axis: Axis,
    name: &'a str,
    component_weight: f64,
    indicator_total: f64,
}

/// Checks that indicator weights sum to 100 within each component and component
/// weights sum to 100 within each axis. Findings come back in first-seen order.
pub fn check_weight_sums(indicators: &[Indicator], tolerance: f64) -> Vec<WeightWarning> {
    let mut warnings = Vec::new();
    let mut tallies: Vec<ComponentTally<'_>> = Vec::new();

    for row in indicators {
        let name = row.component.trim();
        match tallies
            .iter_mut()
            .find(|tally| tally.axis == row.axis && tally.name == name)
        {
            Some(tally) => {
                if (tally.component_weight - row.component_weight).abs() > tolerance {
                    warnings.push(WeightWarning::InconsistentComponentWeight {
                        axis: row.axis,
                        component: name.to_string(),
                        expected: tally.component_weight,
                        found: row.component_weight,
                    });
                }
                tally.indicator_total += row.indicator_weight;
            }
            None => tallies.push(ComponentTally {
                axis: row.axis,
                name,
                component_weight: row.component_weight,
                indicator_total: row.indicator_weight,
            }),
        }
    }

    for tally in &tallies {
        if (tally.indicator_total - MAX_PERCENT).abs() > tolerance {
            warnings.push(WeightWarning::IndicatorWeights {
                axis: tally.axis,
                component: tally.name.to_string(),
                total: tally.indicator_total,
            });
        }
    }

    for axis in Axis::ALL {
        let total: f64 = tallies
            .iter()
            .filter(|tally| tally.axis == axis)
            .map(|tally| tally.component_weight)
            .sum();
        if (total - MAX_PERCENT).abs() > tolerance {
            warnings.push(WeightWarning::ComponentWeights { axis, total });
        }
    }

    warnings
}
