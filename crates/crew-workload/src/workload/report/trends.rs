use super::super::balance::utilization_percent;
use super::super::domain::{metric_crew, CrewId, CrewSnapshot, Period};
use super::views::{DistributionBucket, PeriodTrendPoint, UtilizationTrendPoint};
use std::collections::BTreeMap;

const OVER_UTILIZED_PCT: f64 = 80.0;
const UNDER_UTILIZED_PCT: f64 = 60.0;

/// Upper bound (inclusive) and label of each histogram bucket.
const SCORE_BUCKETS: [(f64, &str); 5] = [
    (50.0, "0-50"),
    (65.0, "51-65"),
    (75.0, "66-75"),
    (85.0, "76-85"),
    (f64::INFINITY, "86-100"),
];

/// Histogram of current scores over crew that count toward metrics.
pub fn score_distribution(
    roster: &[CrewSnapshot],
    scores: &BTreeMap<CrewId, f64>,
) -> Vec<DistributionBucket> {
    let mut counts = [0usize; SCORE_BUCKETS.len()];

    for crew in metric_crew(roster) {
        let score = scores.get(&crew.id).copied().unwrap_or(0.0);
        if let Some(index) = SCORE_BUCKETS.iter().position(|(upper, _)| score <= *upper) {
            counts[index] += 1;
        }
    }

    SCORE_BUCKETS
        .iter()
        .zip(counts)
        .map(|((_, label), count)| DistributionBucket {
            label: *label,
            count,
        })
        .collect()
}

/// Average trip, RON and standby days per period.
pub fn period_trends(roster: &[CrewSnapshot]) -> Vec<PeriodTrendPoint> {
    let crew: Vec<&CrewSnapshot> = metric_crew(roster).collect();
    let mean = |values: &mut dyn Iterator<Item = u32>| -> f64 {
        if crew.is_empty() {
            0.0
        } else {
            values.map(f64::from).sum::<f64>() / crew.len() as f64
        }
    };

    Period::ordered()
        .into_iter()
        .map(|period| PeriodTrendPoint {
            period,
            period_label: period.label(),
            trip_days: mean(&mut crew.iter().map(|c| c.trip_days(period))),
            ron_days: mean(&mut crew.iter().map(|c| c.ron_days(period))),
            standby_days: mean(&mut crew.iter().map(|c| c.standby_days(period))),
        })
        .collect()
}

/// Fleet utilization and over/under counts for the current and projected periods.
pub fn utilization_trend(roster: &[CrewSnapshot], capacity_days: f64) -> Vec<UtilizationTrendPoint> {
    let crew: Vec<&CrewSnapshot> = metric_crew(roster).collect();

    [Period::Current, Period::Next, Period::TwoMonthsOut]
        .into_iter()
        .map(|period| {
            let mut total = 0.0;
            let (mut over, mut under, mut balanced) = (0, 0, 0);
            for member in &crew {
                let utilization = utilization_percent(member.trip_days(period), capacity_days);
                total += utilization;
                if utilization > OVER_UTILIZED_PCT {
                    over += 1;
                } else if utilization < UNDER_UTILIZED_PCT {
                    under += 1;
                } else {
                    balanced += 1;
                }
            }

            UtilizationTrendPoint {
                period,
                period_label: period.label(),
                fleet_average: if crew.is_empty() {
                    0.0
                } else {
                    total / crew.len() as f64
                },
                over_utilized: over,
                under_utilized: under,
                balanced,
            }
        })
        .collect()
}
