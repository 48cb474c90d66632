use super::{Metric, MetricCategory, MetricKind};

pub const TRIP_DAYS: &str = "trip-days";
pub const DUTY_HOURS: &str = "duty-hours";
pub const RON_DAYS: &str = "ron-days";
pub const STANDBY_DAYS: &str = "standby-days";

/// Built-in metrics at their default weights, caps sized to a realistic month.
pub fn builtin_metrics() -> Vec<Metric> {
    vec![
        Metric {
            id: TRIP_DAYS.to_string(),
            name: "Trip Days".to_string(),
            description: "Number of days crew member is assigned to trips".to_string(),
            category: MetricCategory::Time,
            unit: "days".to_string(),
            max_value: 25.0,
            weight: 10.0,
            enabled: true,
            kind: MetricKind::TripDays,
        },
        Metric {
            id: DUTY_HOURS.to_string(),
            name: "Duty Hours".to_string(),
            description: "Total duty hours accumulated".to_string(),
            category: MetricCategory::Duty,
            unit: "hours".to_string(),
            max_value: 120.0,
            weight: 7.0,
            enabled: true,
            kind: MetricKind::DutyHours,
        },
        Metric {
            id: RON_DAYS.to_string(),
            name: "RON Days".to_string(),
            description: "Remain Over Night days away from base".to_string(),
            category: MetricCategory::Travel,
            unit: "days".to_string(),
            max_value: 15.0,
            weight: 5.0,
            enabled: true,
            kind: MetricKind::RonDays,
        },
        Metric {
            id: STANDBY_DAYS.to_string(),
            name: "Standby Days".to_string(),
            description: "Days on standby duty".to_string(),
            category: MetricCategory::Duty,
            unit: "days".to_string(),
            max_value: 10.0,
            weight: 3.0,
            enabled: true,
            kind: MetricKind::StandbyDays,
        },
    ]
}
