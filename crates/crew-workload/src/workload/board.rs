use super::configuration::{MetricConfiguration, ValidationError};
use super::domain::{CrewId, CrewSnapshot, Period};
use super::impact::{ImpactReport, ImpactThresholds};
use super::scoring::{self, WorkloadScore};
use std::collections::BTreeMap;
use tracing::info;

/// Roster, active configuration and the current-period scores derived from them.
///
/// Scores are kept for every crew member so excluded crew can still be shown;
/// aggregates and impact reports only read the crew that count toward metrics.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    roster: Vec<CrewSnapshot>,
    active: MetricConfiguration,
    scores: BTreeMap<CrewId, f64>,
}

impl ScoreBoard {
    /// Initial load. Scores computed here are the baseline for the first change.
    pub fn load(
        roster: Vec<CrewSnapshot>,
        configuration: MetricConfiguration,
    ) -> Result<Self, ValidationError> {
        configuration.validate()?;
        let scores = current_scores(&roster, &configuration);
        info!(
            crew = roster.len(),
            configuration_id = %configuration.id,
            "workload scores loaded"
        );
        Ok(Self {
            roster,
            active: configuration,
            scores,
        })
    }

    pub fn roster(&self) -> &[CrewSnapshot] {
        &self.roster
    }

    pub fn active(&self) -> &MetricConfiguration {
        &self.active
    }

    /// Current-period score for every crew member, excluded crew included.
    pub fn scores(&self) -> &BTreeMap<CrewId, f64> {
        &self.scores
    }

    pub fn score_of(&self, crew_id: &CrewId) -> Option<f64> {
        self.scores.get(crew_id).copied()
    }

    /// Scores restricted to crew that count toward metrics.
    pub fn metric_scores(&self) -> BTreeMap<CrewId, f64> {
        self.roster
            .iter()
            .filter(|crew| crew.counts_toward_metrics())
            .filter_map(|crew| {
                self.scores
                    .get(&crew.id)
                    .map(|score| (crew.id.clone(), *score))
            })
            .collect()
    }

    /// Score any period on demand; projections are not kept on the board.
    pub fn evaluate(&self, crew_id: &CrewId, period: Period) -> Option<WorkloadScore> {
        self.roster
            .iter()
            .find(|crew| &crew.id == crew_id)
            .map(|crew| scoring::evaluate(crew, period, &self.active))
    }

    /// Swap in a new configuration and report how scores moved.
    pub fn apply_configuration(
        &mut self,
        configuration: MetricConfiguration,
        thresholds: &ImpactThresholds,
    ) -> ImpactReport {
        let before = self.metric_scores();
        self.scores = current_scores(&self.roster, &configuration);
        self.active = configuration;
        let after = self.metric_scores();

        let report = ImpactReport::from_scores(&self.active.id, &before, &after, thresholds);
        info!(
            configuration_id = %self.active.id,
            significant_changes = report.significant_changes,
            avg_change = report.avg_change,
            "workload scores recomputed"
        );
        report
    }

    /// Replace roster data from the roster source and rebaseline scores.
    pub fn replace_roster(&mut self, roster: Vec<CrewSnapshot>) {
        self.scores = current_scores(&roster, &self.active);
        self.roster = roster;
    }

    /// Flip a crew member's exclusion flag, returning the new value.
    pub fn toggle_exclusion(&mut self, crew_id: &CrewId) -> Option<bool> {
        self.roster
            .iter_mut()
            .find(|crew| &crew.id == crew_id)
            .map(CrewSnapshot::toggle_exclusion)
    }
}

fn current_scores(
    roster: &[CrewSnapshot],
    configuration: &MetricConfiguration,
) -> BTreeMap<CrewId, f64> {
    roster
        .iter()
        .map(|crew| {
            (
                crew.id.clone(),
                scoring::score(crew, Period::Current, configuration),
            )
        })
        .collect()
}
