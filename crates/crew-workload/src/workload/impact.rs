use super::domain::CrewId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cut-offs used when summarizing a configuration change.
///
/// The defaults (10 and 15 points) carry over from the dashboard this engine
/// serves and still await confirmation from the scheduling office.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactThresholds {
    /// A crew member whose score moves by more than this is significantly affected.
    pub significant_change: f64,
    /// Largest single increase/decrease is only called out beyond this magnitude.
    pub notable_swing: f64,
}

impl Default for ImpactThresholds {
    fn default() -> Self {
        Self {
            significant_change: 10.0,
            notable_swing: 15.0,
        }
    }
}

/// Before/after comparison of workload scores across one configuration change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub configuration_id: String,
    pub significant_changes: usize,
    pub avg_change: f64,
    pub highest_increase: f64,
    pub highest_decrease: f64,
    pub summary: String,
    pub per_crew_delta: BTreeMap<CrewId, f64>,
    /// Recomputed scores the deltas were taken against.
    pub scores: BTreeMap<CrewId, f64>,
}

impl ImpactReport {
    /// Compare scores for the crew present in `after`. A crew member without a
    /// `before` score is treated as having scored zero.
    pub fn from_scores(
        configuration_id: impl Into<String>,
        before: &BTreeMap<CrewId, f64>,
        after: &BTreeMap<CrewId, f64>,
        thresholds: &ImpactThresholds,
    ) -> Self {
        let per_crew_delta: BTreeMap<CrewId, f64> = after
            .iter()
            .map(|(crew_id, score)| {
                let previous = before.get(crew_id).copied().unwrap_or(0.0);
                (crew_id.clone(), score - previous)
            })
            .collect();

        let significant_changes = per_crew_delta
            .values()
            .filter(|delta| delta.abs() > thresholds.significant_change)
            .count();

        let avg_change = if per_crew_delta.is_empty() {
            0.0
        } else {
            per_crew_delta.values().map(|delta| delta.abs()).sum::<f64>()
                / per_crew_delta.len() as f64
        };

        let highest_increase = per_crew_delta.values().copied().fold(0.0, f64::max);
        let highest_decrease = per_crew_delta.values().copied().fold(0.0, f64::min);

        let summary = summarize(
            significant_changes,
            avg_change,
            highest_increase,
            highest_decrease,
            thresholds,
        );

        Self {
            configuration_id: configuration_id.into(),
            significant_changes,
            avg_change,
            highest_increase,
            highest_decrease,
            summary,
            per_crew_delta,
            scores: after.clone(),
        }
    }

    pub fn has_significant_changes(&self) -> bool {
        self.significant_changes > 0
    }

    pub fn delta_for(&self, crew_id: &CrewId) -> Option<f64> {
        self.per_crew_delta.get(crew_id).copied()
    }
}

fn summarize(
    significant_changes: usize,
    avg_change: f64,
    highest_increase: f64,
    highest_decrease: f64,
    thresholds: &ImpactThresholds,
) -> String {
    let mut parts = vec![
        format!(
            "Configuration change affected {significant_changes} crew member{} significantly.",
            if significant_changes == 1 { "" } else { "s" }
        ),
        format!("Average workload score change: {avg_change:.1} points."),
    ];

    if highest_increase > thresholds.notable_swing {
        parts.push(format!("Largest increase: +{highest_increase:.1} points."));
    }
    if highest_decrease < -thresholds.notable_swing {
        parts.push(format!("Largest decrease: {highest_decrease:.1} points."));
    }

    parts.join(" ")
}
