use super::super::domain::Period;
use super::super::scoring::WorkloadBand;
use serde::Serialize;

/// One bar of the score distribution histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBucket {
    pub label: &'static str,
    pub count: usize,
}

/// Average day counts for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTrendPoint {
    pub period: Period,
    pub period_label: &'static str,
    pub trip_days: f64,
    pub ron_days: f64,
    pub standby_days: f64,
}

/// Fleet utilization for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationTrendPoint {
    pub period: Period,
    pub period_label: &'static str,
    pub fleet_average: f64,
    pub over_utilized: usize,
    pub under_utilized: usize,
    pub balanced: usize,
}

/// Row of the crew score table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrewScoreView {
    pub crew_id: String,
    pub name: String,
    pub position: &'static str,
    pub base: String,
    pub status: &'static str,
    pub excluded: bool,
    pub score: f64,
    pub band: WorkloadBand,
    pub band_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadSummaryView {
    pub total_crew: usize,
    pub active_crew: usize,
    pub excluded_crew: usize,
    pub current_utilization: u32,
    pub projected_utilization: u32,
    pub imbalance_alerts: usize,
    pub avg_trip_days_per_crew: f64,
    pub avg_ron_days_per_crew: f64,
    pub avg_standby_days_per_crew: f64,
}
