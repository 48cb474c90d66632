//! Crew workload scoring, utilization balance and configuration impact.

pub mod balance;
mod board;
pub mod configuration;
mod coordinator;
pub mod domain;
pub mod impact;
pub mod metrics;
pub mod report;
pub mod roster;
pub mod scoring;

#[cfg(test)]
mod tests;

use chrono::Utc;

pub use balance::{
    classify, classify_with, fleet_average, BalanceEntry, BalanceFilter, BalancePolicy,
    BalanceSort, BalanceStatus, BalanceTable,
};
pub use board::ScoreBoard;
pub use configuration::{
    ConfigurationStore, MetricConfiguration, Preset, StoreError, ValidationError,
    DEFAULT_CONFIGURATION_ID,
};
pub use coordinator::{
    ChangeCoordinator, CoordinatorError, CoordinatorHandle, CoordinatorSettings, ImpactFeed,
};
pub use domain::{CrewId, CrewPosition, CrewSnapshot, CrewStatus, Period, PeriodRecord};
pub use impact::{ImpactReport, ImpactThresholds};
pub use metrics::{Metric, MetricCategory, MetricDraft, MetricKind};
pub use report::WorkloadSummary;
pub use roster::{RosterImportError, RosterImporter};
pub use scoring::{
    breakdown, evaluate, score, IntegrityFault, MetricContribution, WorkloadBand, WorkloadScore,
};

/// Built-in configuration stamped with the current time.
pub fn create_default_configuration() -> MetricConfiguration {
    MetricConfiguration::default_at(Utc::now())
}
