use crew_workload::error::AppError;
use crew_workload::workload::report::views::{
    CrewScoreView, DistributionBucket, PeriodTrendPoint, UtilizationTrendPoint,
    WorkloadSummaryView,
};
use crew_workload::workload::{
    BalanceStatus, BalanceTable, CrewId, CrewSnapshot, ImpactReport, MetricConfiguration, Period,
    WorkloadScore,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub(crate) struct SummaryPayload<'a> {
    pub(crate) configuration_id: &'a str,
    pub(crate) summary: &'a WorkloadSummaryView,
    pub(crate) distribution: &'a [DistributionBucket],
    pub(crate) period_trends: &'a [PeriodTrendPoint],
    pub(crate) utilization_trend: &'a [UtilizationTrendPoint],
}

#[derive(Serialize)]
pub(crate) struct ImpactPayload<'a> {
    pub(crate) configuration: &'a MetricConfiguration,
    pub(crate) saved_as: Option<&'a str>,
    pub(crate) report: &'a ImpactReport,
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_source(configuration: &MetricConfiguration, imported: bool) {
    println!(
        "Configuration: {} ({})",
        configuration.name, configuration.id
    );
    if imported {
        println!("Data source: roster CSV import");
    } else {
        println!("Data source: sample roster (no roster export provided)");
    }
}

pub(crate) fn render_scores(
    configuration: &MetricConfiguration,
    period: Period,
    imported: bool,
    rows: &[CrewScoreView],
) {
    println!("Crew workload scores - {}", period.label());
    print_source(configuration, imported);
    println!();

    if rows.is_empty() {
        println!("No crew members to score");
        return;
    }

    for row in rows {
        println!(
            "- {:<16} {:<17} {:<4} {:>5.1}  {}{}",
            row.name,
            row.position,
            row.base,
            row.score,
            row.band_label,
            if row.excluded { " (excluded)" } else { "" }
        );
    }
}

pub(crate) fn render_breakdown(crew: &CrewSnapshot, score: &WorkloadScore) {
    println!(
        "{} ({}) - {} workload score {:.1}",
        crew.name,
        crew.id,
        score.period.label(),
        score.value
    );
    println!("Configuration: {}", score.configuration_id);

    for contribution in &score.breakdown {
        println!(
            "  - {}: {:.1} {} of {:.0} (weight {:.1}) -> {:.1} points",
            contribution.name,
            contribution.raw_value,
            contribution.unit,
            contribution.max_value,
            contribution.weight,
            contribution.contribution
        );
    }

    if !score.faults.is_empty() {
        println!("Configuration warnings:");
        for fault in &score.faults {
            println!("  - {fault}");
        }
    }
}

pub(crate) fn render_balance(table: &BalanceTable) {
    println!("Workload balance - {}", table.period.label());
    println!(
        "Target {:.1} trip days | fleet average {:.1}",
        table.target_average, table.actual_fleet_average
    );
    println!(
        "Critical over {} | warning over {} | balanced {} | under {} | critical under {}",
        table.count(BalanceStatus::CriticalOver),
        table.count(BalanceStatus::WarningOver),
        table.count(BalanceStatus::Balanced),
        table.count(BalanceStatus::Under),
        table.count(BalanceStatus::CriticalUnder)
    );
    println!();

    if table.entries.is_empty() {
        println!("No crew members match the filter");
        return;
    }

    for entry in &table.entries {
        println!(
            "- {:<16} {:>3} trip days | {:>+6.1}% | {:>5.1}% utilized | {}",
            entry.crew_name,
            entry.trip_days,
            entry.deviation_percent,
            entry.utilization_percent,
            entry.status.label()
        );
    }
}

pub(crate) fn render_summary(
    configuration: &MetricConfiguration,
    imported: bool,
    summary: &WorkloadSummaryView,
    distribution: &[DistributionBucket],
    trends: &[PeriodTrendPoint],
    utilization: &[UtilizationTrendPoint],
) {
    println!("Crew workload summary");
    print_source(configuration, imported);
    println!(
        "- {} crew | {} active | {} excluded from metrics",
        summary.total_crew, summary.active_crew, summary.excluded_crew
    );
    println!(
        "- Utilization {}% current | {}% projected",
        summary.current_utilization, summary.projected_utilization
    );
    println!(
        "- Averages per crew: {:.1} trip | {:.1} RON | {:.1} standby days",
        summary.avg_trip_days_per_crew,
        summary.avg_ron_days_per_crew,
        summary.avg_standby_days_per_crew
    );
    println!("- Imbalance alerts: {}", summary.imbalance_alerts);

    println!("\nScore distribution");
    for bucket in distribution {
        println!("  {:<7} {}", bucket.label, bucket.count);
    }

    println!("\nPeriod trends (average days)");
    for point in trends {
        println!(
            "  {:<14} trip {:>5.1} | RON {:>4.1} | standby {:>4.1}",
            point.period_label, point.trip_days, point.ron_days, point.standby_days
        );
    }

    println!("\nUtilization trend");
    for point in utilization {
        println!(
            "  {:<14} {:>5.1}% | {} over | {} balanced | {} under",
            point.period_label,
            point.fleet_average,
            point.over_utilized,
            point.balanced,
            point.under_utilized
        );
    }
}

pub(crate) fn render_impact(
    previous: &MetricConfiguration,
    active: &MetricConfiguration,
    report: &ImpactReport,
    names: &BTreeMap<CrewId, String>,
    significant_change: f64,
    all_deltas: bool,
    saved: Option<&MetricConfiguration>,
) {
    println!("Configuration impact");
    println!("From: {} ({})", previous.name, previous.id);
    println!("To:   {}", active.name);

    println!("\nMetric weights");
    for metric in &active.metrics {
        let before = previous.metric(&metric.id);
        let was = before
            .map(|m| format!("{:.1}", m.weight))
            .unwrap_or_else(|| "new".to_string());
        println!(
            "  - {:<14} {:>5} -> {:>5.1}{}",
            metric.name,
            was,
            metric.weight,
            if metric.enabled { "" } else { " (disabled)" }
        );
    }
    for removed in previous
        .metrics
        .iter()
        .filter(|metric| active.metric(&metric.id).is_none())
    {
        println!("  - {:<14} removed", removed.name);
    }

    println!("\n{}", report.summary);

    let mut deltas: Vec<(&CrewId, f64)> = report
        .per_crew_delta
        .iter()
        .map(|(crew_id, delta)| (crew_id, *delta))
        .filter(|(_, delta)| all_deltas || delta.abs() > significant_change)
        .collect();
    deltas.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

    if !deltas.is_empty() {
        println!(
            "\n{}",
            if all_deltas {
                "Score changes"
            } else {
                "Significant score changes"
            }
        );
        for (crew_id, delta) in deltas {
            let name = names.get(crew_id).map(String::as_str).unwrap_or("unknown");
            let score = report.scores.get(crew_id).copied().unwrap_or(0.0);
            println!("  - {:<16} {:>+6.1} -> {:>5.1}", name, delta, score);
        }
    }

    if let Some(saved) = saved {
        println!("\nSaved as '{}' ({})", saved.name, saved.id);
    }
}
