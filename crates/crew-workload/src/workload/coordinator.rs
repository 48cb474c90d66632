//! Debounced recomputation on configuration change.
//!
//! Edits arrive on a single stream. The coordinator holds on to the latest
//! configuration until the stream has been quiet for the configured period,
//! then recomputes current-period scores once and emits one [`ImpactReport`].
//! Configurations superseded inside the window are dropped, not queued.

use super::board::ScoreBoard;
use super::configuration::{MetricConfiguration, ValidationError};
use super::domain::{CrewId, CrewSnapshot};
use super::impact::{ImpactReport, ImpactThresholds};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatorSettings {
    pub quiet_period: Duration,
    pub thresholds: ImpactThresholds,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(100),
            thresholds: ImpactThresholds::default(),
        }
    }
}

#[derive(Debug)]
enum CoordinatorEvent {
    Configuration(MetricConfiguration),
    Roster(Vec<CrewSnapshot>),
    ToggleExclusion(CrewId),
}

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("configuration change coordinator has stopped")]
    Stopped,
}

/// Sending side of the configuration change stream.
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    events: mpsc::UnboundedSender<CoordinatorEvent>,
}

impl CoordinatorHandle {
    /// Queue a new active configuration. Invalid configurations are rejected here.
    pub fn submit(&self, configuration: MetricConfiguration) -> Result<(), CoordinatorError> {
        configuration.validate()?;
        self.send(CoordinatorEvent::Configuration(configuration))
    }

    pub fn refresh_roster(&self, roster: Vec<CrewSnapshot>) -> Result<(), CoordinatorError> {
        self.send(CoordinatorEvent::Roster(roster))
    }

    pub fn toggle_exclusion(&self, crew_id: CrewId) -> Result<(), CoordinatorError> {
        self.send(CoordinatorEvent::ToggleExclusion(crew_id))
    }

    fn send(&self, event: CoordinatorEvent) -> Result<(), CoordinatorError> {
        self.events
            .send(event)
            .map_err(|_| CoordinatorError::Stopped)
    }
}

/// Receiving side for impact reports. Each report is delivered once.
#[derive(Debug)]
pub struct ImpactFeed {
    reports: mpsc::UnboundedReceiver<ImpactReport>,
}

impl ImpactFeed {
    pub async fn next(&mut self) -> Option<ImpactReport> {
        self.reports.recv().await
    }

    pub fn try_next(&mut self) -> Option<ImpactReport> {
        self.reports.try_recv().ok()
    }
}

pub struct ChangeCoordinator;

impl ChangeCoordinator {
    /// Run the coordinator on the current tokio runtime.
    ///
    /// The task ends once every [`CoordinatorHandle`] is dropped (after
    /// flushing a pending configuration) or the [`ImpactFeed`] is dropped. It
    /// yields the final board.
    pub fn spawn(
        board: ScoreBoard,
        settings: CoordinatorSettings,
    ) -> (CoordinatorHandle, ImpactFeed, JoinHandle<ScoreBoard>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (report_tx, report_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(board, event_rx, report_tx, settings));

        (
            CoordinatorHandle { events: event_tx },
            ImpactFeed { reports: report_rx },
            task,
        )
    }
}

async fn run(
    mut board: ScoreBoard,
    mut events: mpsc::UnboundedReceiver<CoordinatorEvent>,
    reports: mpsc::UnboundedSender<ImpactReport>,
    settings: CoordinatorSettings,
) -> ScoreBoard {
    while let Some(first) = events.recv().await {
        let mut pending = None;
        let mut closed = false;
        absorb(&mut board, &mut pending, first);

        loop {
            tokio::select! {
                next = events.recv() => match next {
                    Some(event) => absorb(&mut board, &mut pending, event),
                    None => {
                        closed = true;
                        break;
                    }
                },
                _ = tokio::time::sleep(settings.quiet_period) => break,
            }
        }

        if let Some(configuration) = pending {
            let report = board.apply_configuration(configuration, &settings.thresholds);
            if reports.send(report).is_err() {
                debug!("impact feed dropped; stopping coordinator");
                break;
            }
        }

        if closed {
            break;
        }
    }

    board
}

fn absorb(
    board: &mut ScoreBoard,
    pending: &mut Option<MetricConfiguration>,
    event: CoordinatorEvent,
) {
    match event {
        CoordinatorEvent::Configuration(configuration) => {
            if let Some(superseded) = pending.replace(configuration) {
                debug!(
                    configuration_id = %superseded.id,
                    modified_at = %superseded.modified_at,
                    "configuration superseded before settling"
                );
            }
        }
        CoordinatorEvent::Roster(roster) => board.replace_roster(roster),
        CoordinatorEvent::ToggleExclusion(crew_id) => {
            if board.toggle_exclusion(&crew_id).is_none() {
                debug!(%crew_id, "exclusion toggle for unknown crew member ignored");
            }
        }
    }
}
