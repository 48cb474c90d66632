mod catalog;
mod formulas;

pub use catalog::{builtin_metrics, DUTY_HOURS, RON_DAYS, STANDBY_DAYS, TRIP_DAYS};
pub use formulas::known_formulas;

use super::domain::{CrewSnapshot, Period};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Time,
    Duty,
    Travel,
    Custom,
}

impl MetricCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Time => "Time",
            Self::Duty => "Duty",
            Self::Travel => "Travel",
            Self::Custom => "Custom",
        }
    }
}

/// Which roster figure a metric reads.
///
/// Custom metrics name a formula id resolved through the formula table; an
/// unknown id behaves as a placeholder that always reads zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "formula", rename_all = "snake_case")]
pub enum MetricKind {
    TripDays,
    DutyHours,
    RonDays,
    StandbyDays,
    Custom(String),
}

impl MetricKind {
    /// Raw value for the crew member and period, zero when the period has no data.
    pub fn value(&self, crew: &CrewSnapshot, period: Period) -> f64 {
        let Some(record) = crew.period(period) else {
            return 0.0;
        };

        match self {
            MetricKind::TripDays => f64::from(record.trip_days),
            MetricKind::DutyHours => record.duty_hours,
            MetricKind::RonDays => f64::from(record.ron_days),
            MetricKind::StandbyDays => f64::from(record.standby_days),
            MetricKind::Custom(formula) => formulas::lookup(formula)
                .map(|accessor| accessor(record))
                .unwrap_or(0.0),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, MetricKind::Custom(formula) if formulas::lookup(formula).is_none())
    }
}

/// A weighted workload metric within a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: MetricCategory,
    pub unit: String,
    /// Normalization cap; a raw value at or above it saturates the metric.
    pub max_value: f64,
    /// Importance expressed in days, not a percentage.
    pub weight: f64,
    pub enabled: bool,
    pub kind: MetricKind,
}

impl Metric {
    pub fn value(&self, crew: &CrewSnapshot, period: Period) -> f64 {
        self.kind.value(crew, period)
    }
}

/// User supplied definition for a custom metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit: String,
    pub max_value: f64,
    pub weight: f64,
    #[serde(default)]
    pub formula: Option<String>,
}

impl MetricDraft {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, max_value: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            unit: unit.into(),
            max_value,
            weight: 5.0,
            formula: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::domain::{CrewPosition, PeriodRecord};

    fn crew() -> CrewSnapshot {
        CrewSnapshot::new("c-1", "Emily Davis", CrewPosition::FlightAttendant, "MIA").with_period(
            Period::Current,
            PeriodRecord {
                trip_days: 14,
                ron_days: 6,
                standby_days: 2,
                training_days: 1,
                duty_hours: 96.5,
                flight_hours: 61.0,
                ..PeriodRecord::default()
            },
        )
    }

    #[test]
    fn builtin_kinds_read_their_fields() {
        let crew = crew();
        assert_eq!(MetricKind::TripDays.value(&crew, Period::Current), 14.0);
        assert_eq!(MetricKind::DutyHours.value(&crew, Period::Current), 96.5);
        assert_eq!(MetricKind::RonDays.value(&crew, Period::Current), 6.0);
        assert_eq!(MetricKind::StandbyDays.value(&crew, Period::Current), 2.0);
    }

    #[test]
    fn custom_kind_dispatches_through_formula_table() {
        let crew = crew();
        let kind = MetricKind::Custom("flight-hours".to_string());
        assert_eq!(kind.value(&crew, Period::Current), 61.0);
        assert!(!kind.is_placeholder());

        let total = MetricKind::Custom("total-duty-days".to_string());
        assert_eq!(total.value(&crew, Period::Current), 17.0);
    }

    #[test]
    fn unknown_formula_is_a_zero_placeholder() {
        let crew = crew();
        let kind = MetricKind::Custom("jetlag-index".to_string());
        assert!(kind.is_placeholder());
        assert_eq!(kind.value(&crew, Period::Current), 0.0);
    }

    #[test]
    fn missing_period_reads_zero() {
        let crew = crew();
        assert_eq!(MetricKind::TripDays.value(&crew, Period::TwoMonthsOut), 0.0);
    }
}
