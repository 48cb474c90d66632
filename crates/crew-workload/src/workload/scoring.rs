//! Weighted, normalized workload score.
//!
//! Each enabled metric's raw value is clamped to `[0, max_value]`, divided by
//! its cap and weighted by its share of the total enabled weight. The sum is
//! scaled to `[0, 100]`. Integrity problems in a configuration never abort a
//! calculation: the offending metric contributes nothing and the fault is
//! returned with the score.

use super::configuration::MetricConfiguration;
use super::domain::{CrewId, CrewSnapshot, Period};
use super::metrics::Metric;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

pub const MAX_SCORE: f64 = 100.0;

/// Non-fatal configuration problem observed while scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fault", rename_all = "snake_case")]
pub enum IntegrityFault {
    NonPositiveMaxValue { metric: String, max_value: f64 },
    InvalidWeight { metric: String, weight: f64 },
    NoEnabledWeight,
}

impl fmt::Display for IntegrityFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityFault::NonPositiveMaxValue { metric, max_value } => write!(
                f,
                "metric '{metric}' has normalization cap {max_value}; contribution treated as 0"
            ),
            IntegrityFault::InvalidWeight { metric, weight } => write!(
                f,
                "metric '{metric}' has weight {weight}; excluded from the score"
            ),
            IntegrityFault::NoEnabledWeight => {
                write!(f, "no enabled metric carries weight; score treated as 0")
            }
        }
    }
}

/// Contribution of one enabled metric to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricContribution {
    pub metric_id: String,
    pub name: String,
    pub unit: String,
    pub raw_value: f64,
    pub max_value: f64,
    pub normalized: f64,
    pub weight: f64,
    /// Points out of 100 this metric adds to the score.
    pub contribution: f64,
}

/// Score for one crew member and period under one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadScore {
    pub crew_id: CrewId,
    pub period: Period,
    pub configuration_id: String,
    pub value: f64,
    pub breakdown: Vec<MetricContribution>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<IntegrityFault>,
}

impl WorkloadScore {
    pub fn is_degraded(&self) -> bool {
        !self.faults.is_empty()
    }
}

/// Workload score in `[0, 100]`.
pub fn score(crew: &CrewSnapshot, period: Period, config: &MetricConfiguration) -> f64 {
    evaluate(crew, period, config).value
}

/// Per-metric contributions for the enabled metrics, in configuration order.
pub fn breakdown(
    crew: &CrewSnapshot,
    period: Period,
    config: &MetricConfiguration,
) -> Vec<MetricContribution> {
    evaluate(crew, period, config).breakdown
}

/// Full evaluation: the score, its breakdown and any integrity faults.
pub fn evaluate(crew: &CrewSnapshot, period: Period, config: &MetricConfiguration) -> WorkloadScore {
    let mut faults = Vec::new();

    let usable: Vec<&Metric> = config
        .enabled_metrics()
        .filter(|metric| {
            let valid = metric.weight.is_finite() && metric.weight > 0.0;
            if !valid {
                faults.push(IntegrityFault::InvalidWeight {
                    metric: metric.id.clone(),
                    weight: metric.weight,
                });
            }
            valid
        })
        .collect();

    let total_weight: f64 = usable.iter().map(|metric| metric.weight).sum();

    let mut breakdown = Vec::with_capacity(usable.len());
    let mut weighted = 0.0;

    if total_weight > 0.0 {
        for metric in usable {
            let raw_value = sanitize(metric.value(crew, period));
            let normalized = if metric.max_value.is_finite() && metric.max_value > 0.0 {
                (raw_value / metric.max_value).min(1.0)
            } else {
                faults.push(IntegrityFault::NonPositiveMaxValue {
                    metric: metric.id.clone(),
                    max_value: metric.max_value,
                });
                0.0
            };

            let share = normalized * metric.weight / total_weight;
            weighted += share;
            breakdown.push(MetricContribution {
                metric_id: metric.id.clone(),
                name: metric.name.clone(),
                unit: metric.unit.clone(),
                raw_value,
                max_value: metric.max_value,
                normalized,
                weight: metric.weight,
                contribution: share * MAX_SCORE,
            });
        }
    } else {
        faults.push(IntegrityFault::NoEnabledWeight);
    }

    for fault in &faults {
        warn!(
            crew_id = %crew.id,
            period = %period,
            configuration_id = %config.id,
            %fault,
            "workload score degraded"
        );
    }

    WorkloadScore {
        crew_id: crew.id.clone(),
        period,
        configuration_id: config.id.clone(),
        value: (weighted * MAX_SCORE).clamp(0.0, MAX_SCORE),
        breakdown,
        faults,
    }
}

/// Missing, negative and non-finite readings count as zero.
fn sanitize(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

/// Display band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadBand {
    Normal,
    Elevated,
    High,
    Critical,
}

impl WorkloadBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::Critical
        } else if score >= 75.0 {
            Self::High
        } else if score >= 65.0 {
            Self::Elevated
        } else {
            Self::Normal
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}
