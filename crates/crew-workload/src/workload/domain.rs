use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier wrapper for roster entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CrewId(pub String);

impl CrewId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CrewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rostering window a snapshot carries data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    Previous,
    Current,
    Next,
    TwoMonthsOut,
}

impl Period {
    pub const fn ordered() -> [Self; 4] {
        [Self::Previous, Self::Current, Self::Next, Self::TwoMonthsOut]
    }

    /// Periods that carry projected rather than flown data.
    pub const fn projections() -> [Self; 2] {
        [Self::Next, Self::TwoMonthsOut]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Previous => "Previous Month",
            Self::Current => "Current Month",
            Self::Next => "Next Month",
            Self::TwoMonthsOut => "2 Months Out",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Previous => "previous",
            Self::Current => "current",
            Self::Next => "next",
            Self::TwoMonthsOut => "twoMonthsOut",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "previous" | "previousmonth" | "prev" => Some(Self::Previous),
            "current" | "currentmonth" => Some(Self::Current),
            "next" | "nextmonth" => Some(Self::Next),
            "twomonthsout" | "twomonths" | "2monthsout" => Some(Self::TwoMonthsOut),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewPosition {
    Captain,
    FirstOfficer,
    FlightAttendant,
}

impl CrewPosition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Captain => "Captain",
            Self::FirstOfficer => "First Officer",
            Self::FlightAttendant => "Flight Attendant",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "captain" | "cpt" => Some(Self::Captain),
            "first officer" | "fo" => Some(Self::FirstOfficer),
            "flight attendant" | "fa" => Some(Self::FlightAttendant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrewStatus {
    Active,
    OnLeave,
    Training,
    Reserve,
}

impl CrewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On Leave",
            Self::Training => "Training",
            Self::Reserve => "Reserve",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "active" => Some(Self::Active),
            "on-leave" | "leave" => Some(Self::OnLeave),
            "training" => Some(Self::Training),
            "reserve" => Some(Self::Reserve),
            _ => None,
        }
    }
}

/// Day counts and hour totals for one crew member in one period.
///
/// Duty and rest totals are derived on read so they can never drift from
/// their components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodRecord {
    pub flight_days: u32,
    pub trip_days: u32,
    pub trips: u32,
    pub international_trips: u32,
    pub ron_days: u32,
    pub position_days: u32,
    pub weekend_days: u32,
    pub standby_days: u32,
    pub misc_duty: u32,
    pub training_days: u32,
    pub other_duty_days: u32,
    pub stop_scheduled: u32,
    pub stop_worked_days: u32,
    pub payback_stop_days: u32,
    pub vacation_days: u32,
    pub misc_off_days: u32,
    pub off_days: u32,
    pub unscheduled_available: u32,
    pub scheduled_trips: u32,
    pub duty_hours: f64,
    pub flight_hours: f64,
}

impl PeriodRecord {
    /// Saturates at `u32::MAX` for oversized imports.
    pub fn total_duty_days(&self) -> u32 {
        [
            self.standby_days,
            self.training_days,
            self.misc_duty,
            self.other_duty_days,
        ]
        .into_iter()
        .fold(self.trip_days, u32::saturating_add)
    }

    pub fn total_rest_days(&self) -> u32 {
        [self.vacation_days, self.misc_off_days]
            .into_iter()
            .fold(self.off_days, u32::saturating_add)
    }
}

/// One crew member's operational data across the rostering periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewSnapshot {
    pub id: CrewId,
    pub name: String,
    pub position: CrewPosition,
    pub base: String,
    pub status: CrewStatus,
    #[serde(default)]
    pub exclude_from_metrics: bool,
    #[serde(default)]
    pub periods: BTreeMap<Period, PeriodRecord>,
}

impl CrewSnapshot {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: CrewPosition,
        base: impl Into<String>,
    ) -> Self {
        Self {
            id: CrewId::new(id),
            name: name.into(),
            position,
            base: base.into(),
            status: CrewStatus::Active,
            exclude_from_metrics: false,
            periods: BTreeMap::new(),
        }
    }

    pub fn with_period(mut self, period: Period, record: PeriodRecord) -> Self {
        self.periods.insert(period, record);
        self
    }

    pub fn period(&self, period: Period) -> Option<&PeriodRecord> {
        self.periods.get(&period)
    }

    /// Trip days for the period, zero when the roster has no data for it.
    pub fn trip_days(&self, period: Period) -> u32 {
        self.period(period).map(|record| record.trip_days).unwrap_or(0)
    }

    pub fn ron_days(&self, period: Period) -> u32 {
        self.period(period).map(|record| record.ron_days).unwrap_or(0)
    }

    pub fn standby_days(&self, period: Period) -> u32 {
        self.period(period)
            .map(|record| record.standby_days)
            .unwrap_or(0)
    }

    /// Whether the crew member contributes to averages, distributions and totals.
    pub fn counts_toward_metrics(&self) -> bool {
        !self.exclude_from_metrics
    }

    pub fn toggle_exclusion(&mut self) -> bool {
        self.exclude_from_metrics = !self.exclude_from_metrics;
        self.exclude_from_metrics
    }

    /// Replace one period's data from a roster refresh.
    pub fn refresh_period(&mut self, period: Period, record: PeriodRecord) {
        self.periods.insert(period, record);
    }
}

/// Iterate only the crew members that contribute to aggregates.
pub fn metric_crew(roster: &[CrewSnapshot]) -> impl Iterator<Item = &CrewSnapshot> {
    roster.iter().filter(|crew| crew.counts_toward_metrics())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_are_derived_from_components() {
        let record = PeriodRecord {
            trip_days: 12,
            standby_days: 3,
            training_days: 2,
            misc_duty: 1,
            other_duty_days: 1,
            off_days: 8,
            vacation_days: 2,
            misc_off_days: 1,
            ..PeriodRecord::default()
        };

        assert_eq!(record.total_duty_days(), 19);
        assert_eq!(record.total_rest_days(), 11);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let record = PeriodRecord {
            trip_days: u32::MAX,
            standby_days: 1,
            off_days: u32::MAX - 1,
            vacation_days: 5,
            ..PeriodRecord::default()
        };

        assert_eq!(record.total_duty_days(), u32::MAX);
        assert_eq!(record.total_rest_days(), u32::MAX);
    }

    #[test]
    fn missing_period_reads_as_zero() {
        let crew = CrewSnapshot::new("c-1", "Sarah Johnson", CrewPosition::Captain, "LAX");
        assert_eq!(crew.trip_days(Period::Next), 0);
        assert!(crew.period(Period::Current).is_none());
    }

    #[test]
    fn parses_period_aliases() {
        assert_eq!(Period::parse("twoMonthsOut"), Some(Period::TwoMonthsOut));
        assert_eq!(Period::parse("2 Months Out"), Some(Period::TwoMonthsOut));
        assert_eq!(Period::parse("Current Month"), Some(Period::Current));
        assert_eq!(Period::parse("someday"), None);
    }

    #[test]
    fn toggle_exclusion_flips_flag() {
        let mut crew = CrewSnapshot::new("c-2", "Michael Chen", CrewPosition::FirstOfficer, "JFK");
        assert!(crew.counts_toward_metrics());
        assert!(crew.toggle_exclusion());
        assert!(!crew.counts_toward_metrics());
        assert!(!crew.toggle_exclusion());
    }
}
