use chrono::{DateTime, TimeZone, Utc};

use crate::workload::domain::{CrewPosition, CrewSnapshot, CrewStatus, Period, PeriodRecord};
use crate::workload::MetricConfiguration;

pub(super) fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, minute, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn default_configuration() -> MetricConfiguration {
    MetricConfiguration::default_at(at(0))
}

pub(super) fn record(trip_days: u32, duty_hours: f64, ron_days: u32, standby_days: u32) -> PeriodRecord {
    PeriodRecord {
        trip_days,
        duty_hours,
        ron_days,
        standby_days,
        ..PeriodRecord::default()
    }
}

/// Captain with current-period data only.
pub(super) fn crew(id: &str, current: PeriodRecord) -> CrewSnapshot {
    CrewSnapshot::new(id, format!("Crew {id}"), CrewPosition::Captain, "LAX")
        .with_period(Period::Current, current)
}

pub(super) fn crew_with_trips(id: &str, name: &str, trip_days: u32) -> CrewSnapshot {
    CrewSnapshot::new(id, name, CrewPosition::FirstOfficer, "JFK")
        .with_period(Period::Current, record(trip_days, 0.0, 0, 0))
}

pub(super) fn excluded(mut crew: CrewSnapshot) -> CrewSnapshot {
    crew.exclude_from_metrics = true;
    crew
}

pub(super) fn with_status(mut crew: CrewSnapshot, status: CrewStatus) -> CrewSnapshot {
    crew.status = status;
    crew
}

/// Five crew across positions with data for every period.
pub(super) fn roster() -> Vec<CrewSnapshot> {
    let member = |id: &str, name: &str, position: CrewPosition, base: &str, trips: [u32; 4]| {
        let mut snapshot = CrewSnapshot::new(id, name, position, base);
        for (period, trip_days) in Period::ordered().into_iter().zip(trips) {
            snapshot = snapshot.with_period(
                period,
                PeriodRecord {
                    trip_days,
                    ron_days: trip_days / 3,
                    standby_days: 2,
                    duty_hours: f64::from(trip_days) * 7.0,
                    ..PeriodRecord::default()
                },
            );
        }
        snapshot
    };

    vec![
        member("c-1", "Sarah Johnson", CrewPosition::Captain, "LAX", [12, 14, 15, 11]),
        member("c-2", "Michael Chen", CrewPosition::FirstOfficer, "JFK", [9, 8, 10, 9]),
        member("c-3", "Emily Davis", CrewPosition::FlightAttendant, "MIA", [10, 10, 10, 10]),
        member("c-4", "David Wilson", CrewPosition::Captain, "DFW", [18, 20, 16, 14]),
        member("c-5", "Lisa Anderson", CrewPosition::FlightAttendant, "ORD", [6, 6, 8, 9]),
    ]
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
