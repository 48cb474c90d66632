use super::super::balance::{classify_with, BalancePolicy};
use super::super::domain::{CrewId, CrewSnapshot, CrewStatus, Period};
use super::super::scoring::WorkloadBand;
use super::views::{CrewScoreView, WorkloadSummaryView};
use std::collections::BTreeMap;

/// Fleet headline figures.
///
/// Only crew that are active and not excluded count toward utilization and
/// averages; the totals still report everyone on the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadSummary {
    pub total_crew: usize,
    pub active_crew: usize,
    pub excluded_crew: usize,
    pub current_trip_days: u64,
    pub projected_trip_days: u64,
    pub current_ron_days: u64,
    pub current_standby_days: u64,
    pub imbalance_alerts: usize,
    pub utilization_capacity_days: f64,
}

impl WorkloadSummary {
    pub fn compute(roster: &[CrewSnapshot], policy: &BalancePolicy) -> Self {
        let active: Vec<&CrewSnapshot> = roster
            .iter()
            .filter(|crew| crew.status == CrewStatus::Active && crew.counts_toward_metrics())
            .collect();

        let sum = |period: Period, pick: fn(&CrewSnapshot, Period) -> u32| -> u64 {
            active
                .iter()
                .copied()
                .map(|crew| u64::from(pick(crew, period)))
                .sum()
        };

        let imbalance_alerts = active
            .iter()
            .copied()
            .filter(|crew| !classify_with(crew, Period::Current, policy).status.is_balanced())
            .count();

        Self {
            total_crew: roster.len(),
            active_crew: active.len(),
            excluded_crew: roster
                .iter()
                .filter(|crew| crew.exclude_from_metrics)
                .count(),
            current_trip_days: sum(Period::Current, CrewSnapshot::trip_days),
            projected_trip_days: sum(Period::Next, CrewSnapshot::trip_days),
            current_ron_days: sum(Period::Current, CrewSnapshot::ron_days),
            current_standby_days: sum(Period::Current, CrewSnapshot::standby_days),
            imbalance_alerts,
            utilization_capacity_days: policy.utilization_capacity_days,
        }
    }

    pub fn current_utilization(&self) -> u32 {
        self.utilization(self.current_trip_days)
    }

    pub fn projected_utilization(&self) -> u32 {
        self.utilization(self.projected_trip_days)
    }

    fn utilization(&self, trip_days: u64) -> u32 {
        let capacity = self.active_crew as f64 * self.utilization_capacity_days;
        if capacity > 0.0 {
            (trip_days as f64 / capacity * 100.0).round() as u32
        } else {
            0
        }
    }

    fn average(&self, total: u64) -> f64 {
        if self.active_crew == 0 {
            0.0
        } else {
            (total as f64 / self.active_crew as f64 * 10.0).round() / 10.0
        }
    }

    pub fn view(&self) -> WorkloadSummaryView {
        WorkloadSummaryView {
            total_crew: self.total_crew,
            active_crew: self.active_crew,
            excluded_crew: self.excluded_crew,
            current_utilization: self.current_utilization(),
            projected_utilization: self.projected_utilization(),
            imbalance_alerts: self.imbalance_alerts,
            avg_trip_days_per_crew: self.average(self.current_trip_days),
            avg_ron_days_per_crew: self.average(self.current_ron_days),
            avg_standby_days_per_crew: self.average(self.current_standby_days),
        }
    }
}

/// Score table rows, highest score first. Excluded crew are listed only on request.
pub fn crew_score_table(
    roster: &[CrewSnapshot],
    scores: &BTreeMap<CrewId, f64>,
    include_excluded: bool,
) -> Vec<CrewScoreView> {
    let mut rows: Vec<CrewScoreView> = roster
        .iter()
        .filter(|crew| include_excluded || crew.counts_toward_metrics())
        .map(|crew| {
            let score = scores.get(&crew.id).copied().unwrap_or(0.0);
            let band = WorkloadBand::from_score(score);
            CrewScoreView {
                crew_id: crew.id.to_string(),
                name: crew.name.clone(),
                position: crew.position.label(),
                base: crew.base.clone(),
                status: crew.status.label(),
                excluded: crew.exclude_from_metrics,
                score,
                band,
                band_label: band.label(),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.score.total_cmp(&a.score));
    rows
}
