use std::collections::BTreeMap;

use super::common::*;
use crate::workload::domain::{CrewId, Period};
use crate::workload::impact::{ImpactReport, ImpactThresholds};
use crate::workload::metrics::{DUTY_HOURS, TRIP_DAYS};
use crate::workload::{scoring, ScoreBoard};

fn scores(entries: &[(&str, f64)]) -> BTreeMap<CrewId, f64> {
    entries
        .iter()
        .map(|(id, score)| (CrewId::new(*id), *score))
        .collect()
}

#[test]
fn report_counts_only_large_moves_as_significant() {
    let before = scores(&[("A", 40.0), ("B", 82.0)]);
    let after = scores(&[("A", 46.0), ("B", 95.0)]);

    let report = ImpactReport::from_scores("cfg-1", &before, &after, &ImpactThresholds::default());

    assert_eq!(report.significant_changes, 1);
    assert_close(report.avg_change, 9.5);
    assert_close(report.highest_increase, 13.0);
    assert_eq!(report.highest_decrease, 0.0);
    assert_eq!(report.delta_for(&CrewId::new("A")), Some(6.0));
    assert!(report.has_significant_changes());
    assert_eq!(
        report.summary,
        "Configuration change affected 1 crew member significantly. \
         Average workload score change: 9.5 points."
    );
}

#[test]
fn summary_calls_out_swings_beyond_fifteen_points() {
    let before = scores(&[("A", 30.0), ("B", 70.0), ("C", 50.0)]);
    let after = scores(&[("A", 52.0), ("B", 51.0), ("C", 50.0)]);

    let report = ImpactReport::from_scores("cfg-2", &before, &after, &ImpactThresholds::default());

    assert_eq!(report.significant_changes, 2);
    assert_close(report.highest_increase, 22.0);
    assert_close(report.highest_decrease, -19.0);
    assert_eq!(
        report.summary,
        "Configuration change affected 2 crew members significantly. \
         Average workload score change: 13.7 points. \
         Largest increase: +22.0 points. Largest decrease: -19.0 points."
    );
}

#[test]
fn exactly_ten_points_is_not_significant() {
    let report = ImpactReport::from_scores(
        "cfg-3",
        &scores(&[("A", 50.0)]),
        &scores(&[("A", 60.0)]),
        &ImpactThresholds::default(),
    );
    assert_eq!(report.significant_changes, 0);
    assert!(!report.has_significant_changes());
}

#[test]
fn empty_fleet_reports_zero_average() {
    let report = ImpactReport::from_scores(
        "cfg-4",
        &BTreeMap::new(),
        &BTreeMap::new(),
        &ImpactThresholds::default(),
    );

    assert_eq!(report.significant_changes, 0);
    assert_eq!(report.avg_change, 0.0);
    assert_eq!(report.highest_increase, 0.0);
    assert_eq!(report.highest_decrease, 0.0);
    assert!(report.summary.starts_with("Configuration change affected 0 crew members"));
}

#[test]
fn custom_thresholds_change_what_counts() {
    let thresholds = ImpactThresholds {
        significant_change: 5.0,
        notable_swing: 5.0,
    };
    let report = ImpactReport::from_scores(
        "cfg-5",
        &scores(&[("A", 40.0)]),
        &scores(&[("A", 46.0)]),
        &thresholds,
    );

    assert_eq!(report.significant_changes, 1);
    assert!(report.summary.ends_with("Largest increase: +6.0 points."));
}

#[test]
fn board_leaves_excluded_crew_out_of_the_report() {
    let roster = vec![
        crew("c-1", record(20, 100.0, 5, 2)),
        excluded(crew("c-2", record(25, 120.0, 15, 10))),
    ];
    let config = default_configuration();
    let mut board = ScoreBoard::load(roster, config.clone()).expect("valid configuration");

    // Excluded crew keep a score for display.
    assert!(board.score_of(&CrewId::new("c-2")).is_some());
    assert_eq!(board.metric_scores().len(), 1);

    let next = config
        .set_weight(TRIP_DAYS, 30.0, at(1))
        .expect("positive weight");
    let report = board.apply_configuration(next, &ImpactThresholds::default());

    assert_eq!(report.per_crew_delta.len(), 1);
    assert!(report.delta_for(&CrewId::new("c-2")).is_none());
    assert_eq!(board.active().modified_at, at(1));
}

#[test]
fn board_recomputes_against_the_new_configuration() {
    let member = crew("c-1", record(20, 30.0, 3, 1));
    let config = default_configuration();
    let mut board = ScoreBoard::load(vec![member.clone()], config.clone()).expect("valid");
    let before = board.score_of(&member.id).expect("scored");

    let next = config.toggle_metric(DUTY_HOURS, at(2)).expect("known metric");
    let expected = scoring::score(&member, Period::Current, &next);
    let report = board.apply_configuration(next, &ImpactThresholds::default());

    assert_close(board.score_of(&member.id).expect("scored"), expected);
    assert_close(report.delta_for(&member.id).expect("delta"), expected - before);
    assert_close(report.scores[&member.id], expected);
}

#[test]
fn toggling_exclusion_moves_crew_out_of_metric_scores() {
    let mut board = ScoreBoard::load(roster(), default_configuration()).expect("valid");
    assert_eq!(board.metric_scores().len(), 5);

    assert_eq!(board.toggle_exclusion(&CrewId::new("c-4")), Some(true));
    assert_eq!(board.metric_scores().len(), 4);
    assert_eq!(board.toggle_exclusion(&CrewId::new("c-99")), None);
}
