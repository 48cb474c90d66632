use std::collections::BTreeMap;

use super::common::*;
use crate::workload::balance::BalancePolicy;
use crate::workload::domain::{CrewId, CrewStatus, Period};
use crate::workload::report::{
    crew_score_table, period_trends, score_distribution, utilization_trend, WorkloadSummary,
};
use crate::workload::scoring::WorkloadBand;

fn score_map(entries: &[(&str, f64)]) -> BTreeMap<CrewId, f64> {
    entries
        .iter()
        .map(|(id, score)| (CrewId::new(*id), *score))
        .collect()
}

#[test]
fn summary_counts_active_non_excluded_crew() {
    let mut roster = roster();
    roster.push(excluded(crew_with_trips("c-6", "Excluded Crew", 30)));
    roster.push(with_status(
        crew_with_trips("c-7", "On Leave Crew", 0),
        CrewStatus::OnLeave,
    ));

    let summary = WorkloadSummary::compute(&roster, &BalancePolicy::default());

    assert_eq!(summary.total_crew, 7);
    assert_eq!(summary.active_crew, 5);
    assert_eq!(summary.excluded_crew, 1);
    assert_eq!(summary.current_trip_days, 58);
    assert_eq!(summary.projected_trip_days, 59);
    assert_eq!(summary.current_utilization(), 58);
    assert_eq!(summary.projected_utilization(), 59);
    assert_eq!(summary.imbalance_alerts, 4);

    let view = summary.view();
    assert_close(view.avg_trip_days_per_crew, 11.6);
    assert_close(view.avg_ron_days_per_crew, 3.4);
    assert_close(view.avg_standby_days_per_crew, 2.0);
}

#[test]
fn summary_of_empty_roster_is_zeroed() {
    let summary = WorkloadSummary::compute(&[], &BalancePolicy::default());
    assert_eq!(summary.current_utilization(), 0);
    assert_eq!(summary.view().avg_trip_days_per_crew, 0.0);
}

#[test]
fn distribution_buckets_non_excluded_scores() {
    let mut roster = roster();
    roster.push(excluded(crew_with_trips("c-6", "Excluded Crew", 30)));
    let scores = score_map(&[
        ("c-1", 40.0),
        ("c-2", 50.0),
        ("c-3", 50.5),
        ("c-4", 86.0),
        ("c-6", 99.0),
    ]);

    let buckets = score_distribution(&roster, &scores);

    let counts: Vec<(&str, usize)> = buckets.iter().map(|b| (b.label, b.count)).collect();
    assert_eq!(
        counts,
        vec![("0-50", 3), ("51-65", 1), ("66-75", 0), ("76-85", 0), ("86-100", 1)]
    );
}

#[test]
fn period_trends_average_each_period() {
    let trends = period_trends(&roster());

    assert_eq!(trends.len(), 4);
    assert_eq!(trends[0].period, Period::Previous);
    assert_close(trends[0].trip_days, 11.0);
    assert_close(trends[1].trip_days, 11.6);
    assert_close(trends[1].standby_days, 2.0);
    assert_eq!(trends[3].period_label, "2 Months Out");
}

#[test]
fn utilization_trend_counts_over_and_under() {
    let trend = utilization_trend(&roster(), 20.0);

    assert_eq!(trend.len(), 3);
    let current = &trend[0];
    assert_eq!(current.period, Period::Current);
    assert_close(current.fleet_average, 58.0);
    assert_eq!(current.over_utilized, 1);
    assert_eq!(current.under_utilized, 3);
    assert_eq!(current.balanced, 1);
}

#[test]
fn score_table_orders_by_score_and_hides_excluded_by_default() {
    let roster = vec![
        crew_with_trips("c-1", "Sarah Johnson", 10),
        excluded(crew_with_trips("c-2", "Michael Chen", 10)),
        crew_with_trips("c-3", "Emily Davis", 10),
    ];
    let scores = score_map(&[("c-1", 62.0), ("c-2", 91.0), ("c-3", 77.0)]);

    let visible = crew_score_table(&roster, &scores, false);
    let ids: Vec<&str> = visible.iter().map(|row| row.crew_id.as_str()).collect();
    assert_eq!(ids, vec!["c-3", "c-1"]);
    assert_eq!(visible[0].band, WorkloadBand::High);
    assert_eq!(visible[1].band_label, "Normal");

    let everyone = crew_score_table(&roster, &scores, true);
    assert_eq!(everyone[0].crew_id, "c-2");
    assert!(everyone[0].excluded);
}
