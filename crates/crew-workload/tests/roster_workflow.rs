use chrono::{TimeZone, Utc};
use crew_workload::workload::metrics::TRIP_DAYS;
use crew_workload::workload::{
    score, BalanceFilter, BalancePolicy, BalanceSort, BalanceStatus, BalanceTable, CrewId,
    CrewStatus, ImpactThresholds, MetricConfiguration, Period, Preset, RosterImporter,
    ScoreBoard, WorkloadSummary,
};

fn fixture_path() -> String {
    format!("{}/tests/fixtures/roster.csv", env!("CARGO_MANIFEST_DIR"))
}

fn configuration() -> MetricConfiguration {
    let at = Utc
        .with_ymd_and_hms(2025, 3, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    MetricConfiguration::default_at(at)
}

#[test]
fn imported_roster_feeds_balance_and_summary() {
    let roster = RosterImporter::from_path(fixture_path()).expect("fixture imports");

    assert_eq!(roster.len(), 5);
    let reserve = roster
        .iter()
        .find(|crew| crew.id.as_str() == "c-5")
        .expect("reserve crew present");
    assert_eq!(reserve.status, CrewStatus::Reserve);
    assert!(reserve.exclude_from_metrics);

    let table = BalanceTable::build(
        &roster,
        Period::Current,
        &BalancePolicy::default(),
        BalanceFilter::All,
        BalanceSort::Overutilized,
    );
    assert_eq!(table.entries.len(), 4, "excluded crew stay out of the table");
    assert_eq!(table.actual_fleet_average, 13.0);
    assert_eq!(table.target_average, 10.0);
    assert_eq!(table.entries[0].crew_id, CrewId::new("c-4"));
    assert_eq!(table.count(BalanceStatus::CriticalOver), 2);
    assert_eq!(table.count(BalanceStatus::Under), 1);

    let summary = WorkloadSummary::compute(&roster, &BalancePolicy::default());
    assert_eq!(summary.active_crew, 4);
    assert_eq!(summary.excluded_crew, 1);
    assert_eq!(summary.current_utilization(), 65);
    assert_eq!(summary.projected_utilization(), 64);
}

#[test]
fn preset_change_reports_deltas_for_counted_crew() {
    let roster = RosterImporter::from_path(fixture_path()).expect("fixture imports");
    let before_config = configuration();
    let after_config = before_config.apply_preset(Preset::FlightFocused, before_config.created_at);

    let mut board = ScoreBoard::load(roster.clone(), before_config.clone()).expect("valid");
    let thresholds = ImpactThresholds::default();
    let report = board.apply_configuration(after_config.clone(), &thresholds);

    assert_eq!(report.per_crew_delta.len(), 4);
    assert!(report.delta_for(&CrewId::new("c-5")).is_none());

    for crew in roster.iter().filter(|crew| crew.counts_toward_metrics()) {
        let expected = score(crew, Period::Current, &after_config)
            - score(crew, Period::Current, &before_config);
        let delta = report.delta_for(&crew.id).expect("delta present");
        assert!((delta - expected).abs() < 1e-9, "delta for {}", crew.id);
    }

    let significant = report
        .per_crew_delta
        .values()
        .filter(|delta| delta.abs() > thresholds.significant_change)
        .count();
    assert_eq!(report.significant_changes, significant);
    assert_eq!(board.active().name, "Flight-focused Configuration");
    assert_eq!(
        board.active().metric(TRIP_DAYS).map(|metric| metric.weight),
        Some(15.0)
    );
}

#[test]
fn projections_are_scored_on_demand() {
    let roster = RosterImporter::from_path(fixture_path()).expect("fixture imports");
    let board = ScoreBoard::load(roster, configuration()).expect("valid");

    let next = board
        .evaluate(&CrewId::new("c-1"), Period::Next)
        .expect("crew present");
    assert_eq!(next.period, Period::Next);
    assert!(next.value > 0.0);
    assert!(!next.is_degraded());

    let empty = board
        .evaluate(&CrewId::new("c-2"), Period::TwoMonthsOut)
        .expect("crew present");
    assert_eq!(empty.value, 0.0);
    assert!(board.evaluate(&CrewId::new("c-99"), Period::Current).is_none());
}
