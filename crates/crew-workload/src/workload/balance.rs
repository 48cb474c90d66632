use super::domain::{metric_crew, CrewId, CrewPosition, CrewSnapshot, Period};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const CRITICAL_DEVIATION_PCT: f64 = 20.0;
const WARNING_DEVIATION_PCT: f64 = 10.0;

/// Utilization policy. The target is a policy choice and is never replaced by
/// the observed fleet average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePolicy {
    pub target_average: f64,
    pub utilization_capacity_days: f64,
}

impl Default for BalancePolicy {
    fn default() -> Self {
        Self {
            target_average: 10.0,
            utilization_capacity_days: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceStatus {
    CriticalOver,
    WarningOver,
    Balanced,
    Under,
    CriticalUnder,
}

impl BalanceStatus {
    /// First match wins, over-utilization checked before under-utilization.
    pub fn from_deviation_percent(deviation_percent: f64) -> Self {
        if deviation_percent > CRITICAL_DEVIATION_PCT {
            Self::CriticalOver
        } else if deviation_percent > WARNING_DEVIATION_PCT {
            Self::WarningOver
        } else if deviation_percent < -CRITICAL_DEVIATION_PCT {
            Self::CriticalUnder
        } else if deviation_percent < -WARNING_DEVIATION_PCT {
            Self::Under
        } else {
            Self::Balanced
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CriticalOver => "Critical Over",
            Self::WarningOver => "Warning Over",
            Self::Balanced => "Balanced",
            Self::Under => "Under",
            Self::CriticalUnder => "Critical Under",
        }
    }

    pub const fn is_balanced(self) -> bool {
        matches!(self, Self::Balanced)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub crew_id: CrewId,
    pub crew_name: String,
    pub position: CrewPosition,
    pub trip_days: u32,
    pub ron_days: u32,
    pub standby_days: u32,
    pub utilization_percent: f64,
    pub target_average: f64,
    /// Mean trip days of the fleet the entry was classified in.
    pub actual_fleet_average: f64,
    pub deviation: f64,
    pub deviation_percent: f64,
    pub status: BalanceStatus,
}

/// Classify one crew member's trip days against the target.
///
/// Classified alone, the crew member is its own fleet; [`BalanceTable`]
/// fills in the real fleet average.
pub fn classify(crew: &CrewSnapshot, period: Period, target_average: f64) -> BalanceEntry {
    classify_with(crew, period, &BalancePolicy {
        target_average,
        ..BalancePolicy::default()
    })
}

pub fn classify_with(crew: &CrewSnapshot, period: Period, policy: &BalancePolicy) -> BalanceEntry {
    let trip_days = crew.trip_days(period);
    let target_average = policy.target_average;
    let deviation = f64::from(trip_days) - target_average;
    let deviation_percent = if target_average > 0.0 {
        deviation * 100.0 / target_average
    } else {
        0.0
    };

    BalanceEntry {
        crew_id: crew.id.clone(),
        crew_name: crew.name.clone(),
        position: crew.position,
        trip_days,
        ron_days: crew.ron_days(period),
        standby_days: crew.standby_days(period),
        utilization_percent: utilization_percent(trip_days, policy.utilization_capacity_days),
        target_average,
        actual_fleet_average: f64::from(trip_days),
        deviation,
        deviation_percent,
        status: BalanceStatus::from_deviation_percent(deviation_percent),
    }
}

pub(crate) fn utilization_percent(trip_days: u32, capacity_days: f64) -> f64 {
    if capacity_days > 0.0 {
        f64::from(trip_days) / capacity_days * 100.0
    } else {
        0.0
    }
}

/// Mean trip days over crew that count toward metrics; zero for an empty fleet.
pub fn fleet_average(roster: &[CrewSnapshot], period: Period) -> f64 {
    let (sum, count) = metric_crew(roster).fold((0u64, 0usize), |(sum, count), crew| {
        (sum + u64::from(crew.trip_days(period)), count + 1)
    });

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceFilter {
    #[default]
    All,
    Over,
    Under,
}

impl BalanceFilter {
    fn admits(self, entry: &BalanceEntry) -> bool {
        match self {
            Self::All => true,
            Self::Over => entry.deviation_percent > WARNING_DEVIATION_PCT,
            Self::Under => entry.deviation_percent < -WARNING_DEVIATION_PCT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSort {
    #[default]
    Overutilized,
    Underutilized,
    Name,
}

/// Balance table for one period over non-excluded crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceTable {
    pub period: Period,
    pub target_average: f64,
    pub actual_fleet_average: f64,
    pub entries: Vec<BalanceEntry>,
}

impl BalanceTable {
    pub fn build(
        roster: &[CrewSnapshot],
        period: Period,
        policy: &BalancePolicy,
        filter: BalanceFilter,
        sort: BalanceSort,
    ) -> Self {
        let actual_fleet_average = fleet_average(roster, period);
        let mut entries: Vec<BalanceEntry> = metric_crew(roster)
            .map(|crew| BalanceEntry {
                actual_fleet_average,
                ..classify_with(crew, period, policy)
            })
            .filter(|entry| filter.admits(entry))
            .collect();

        match sort {
            BalanceSort::Overutilized => entries.sort_by(|a, b| {
                b.deviation_percent
                    .partial_cmp(&a.deviation_percent)
                    .unwrap_or(Ordering::Equal)
            }),
            BalanceSort::Underutilized => entries.sort_by(|a, b| {
                a.deviation_percent
                    .partial_cmp(&b.deviation_percent)
                    .unwrap_or(Ordering::Equal)
            }),
            BalanceSort::Name => entries.sort_by(|a, b| a.crew_name.cmp(&b.crew_name)),
        }

        Self {
            period,
            target_average: policy.target_average,
            actual_fleet_average,
            entries,
        }
    }

    pub fn count(&self, status: BalanceStatus) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    }
}
