use crate::cli::{BalanceArgs, ImpactArgs, ScoresArgs, SourceArgs};
use crate::infra::{load_configuration, load_roster, FileConfigurationStore};
use crate::render;
use chrono::Utc;
use crew_workload::config::{AppConfig, WorkloadConfig};
use crew_workload::error::AppError;
use crew_workload::workload::report::{
    crew_score_table, period_trends, score_distribution, utilization_trend,
};
use crew_workload::workload::{
    create_default_configuration, evaluate, BalanceTable, ChangeCoordinator, ConfigurationStore,
    CoordinatorError, CrewId, CrewSnapshot, MetricConfiguration, ScoreBoard, WorkloadSummary,
};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Inputs shared by every subcommand.
pub(crate) struct Context {
    roster: Vec<CrewSnapshot>,
    imported: bool,
    configuration: MetricConfiguration,
    workload: WorkloadConfig,
    store: FileConfigurationStore,
    json: bool,
}

impl Context {
    pub(crate) fn load(source: SourceArgs, config: AppConfig) -> Result<Self, AppError> {
        let store = FileConfigurationStore::new(source.store);
        let configuration = load_configuration(source.config.as_deref(), &store)?
            .unwrap_or_else(create_default_configuration);
        let (roster, imported) = load_roster(source.roster.as_deref())?;

        info!(
            crew = roster.len(),
            imported,
            configuration_id = %configuration.id,
            environment = ?config.environment,
            "workload inputs loaded"
        );

        Ok(Self {
            roster,
            imported,
            configuration,
            workload: config.workload,
            store,
            json: source.json,
        })
    }

    fn board(&self) -> Result<ScoreBoard, AppError> {
        Ok(ScoreBoard::load(
            self.roster.clone(),
            self.configuration.clone(),
        )?)
    }
}

pub(crate) fn run_scores(context: &Context, args: ScoresArgs) -> Result<(), AppError> {
    let ScoresArgs {
        period,
        include_excluded,
        breakdown,
    } = args;

    if let Some(crew_id) = breakdown {
        let crew_id = CrewId::new(crew_id);
        let crew = context
            .roster
            .iter()
            .find(|crew| crew.id == crew_id)
            .ok_or_else(|| AppError::Usage(format!("unknown crew member '{crew_id}'")))?;
        let score = evaluate(crew, period, &context.configuration);
        if context.json {
            return render::print_json(&score);
        }
        render::render_breakdown(crew, &score);
        return Ok(());
    }

    let scores: BTreeMap<CrewId, f64> = context
        .roster
        .iter()
        .map(|crew| {
            (
                crew.id.clone(),
                evaluate(crew, period, &context.configuration).value,
            )
        })
        .collect();
    let rows = crew_score_table(&context.roster, &scores, include_excluded);

    if context.json {
        return render::print_json(&rows);
    }
    render::render_scores(&context.configuration, period, context.imported, &rows);
    Ok(())
}

pub(crate) fn run_balance(context: &Context, args: BalanceArgs) -> Result<(), AppError> {
    let mut policy = context.workload.balance_policy();
    if let Some(target) = args.target {
        if !target.is_finite() || target <= 0.0 {
            return Err(AppError::Usage(format!(
                "target average must be greater than zero (got {target})"
            )));
        }
        policy.target_average = target;
    }

    let table = BalanceTable::build(&context.roster, args.period, &policy, args.filter, args.sort);

    if context.json {
        return render::print_json(&table);
    }
    render::render_balance(&table);
    Ok(())
}

pub(crate) fn run_summary(context: &Context) -> Result<(), AppError> {
    let policy = context.workload.balance_policy();
    let board = context.board()?;

    let summary = WorkloadSummary::compute(&context.roster, &policy).view();
    let distribution = score_distribution(&context.roster, board.scores());
    let trends = period_trends(&context.roster);
    let utilization = utilization_trend(&context.roster, policy.utilization_capacity_days);

    if context.json {
        return render::print_json(&render::SummaryPayload {
            configuration_id: &board.active().id,
            summary: &summary,
            distribution: &distribution,
            period_trends: &trends,
            utilization_trend: &utilization,
        });
    }

    render::render_summary(
        board.active(),
        context.imported,
        &summary,
        &distribution,
        &trends,
        &utilization,
    );
    Ok(())
}

/// Apply the requested edits in order through the change coordinator and
/// report the settled result.
pub(crate) async fn run_impact(context: Context, args: ImpactArgs) -> Result<(), AppError> {
    let ImpactArgs {
        reset,
        preset,
        weights,
        toggles,
        removals,
        save_as,
        all_deltas,
    } = args;

    let mut edits = Vec::new();
    let mut current = context.configuration.clone();
    if reset {
        current = create_default_configuration();
        edits.push(current.clone());
    }
    if let Some(preset) = preset {
        current = current.apply_preset(preset, Utc::now());
        edits.push(current.clone());
    }
    for (metric_id, weight) in weights {
        current = current.set_weight(&metric_id, weight, Utc::now())?;
        edits.push(current.clone());
    }
    for metric_id in toggles {
        current = current.toggle_metric(&metric_id, Utc::now())?;
        edits.push(current.clone());
    }
    for metric_id in removals {
        current = current.remove_metric(&metric_id, Utc::now());
        edits.push(current.clone());
    }

    if edits.is_empty() {
        return Err(AppError::Usage(
            "impact needs at least one --reset, --preset, --weight, --toggle or --remove".to_string(),
        ));
    }

    let board = context.board()?;
    let names: BTreeMap<CrewId, String> = board
        .roster()
        .iter()
        .map(|crew| (crew.id.clone(), crew.name.clone()))
        .collect();

    let (handle, mut feed, task) =
        ChangeCoordinator::spawn(board, context.workload.coordinator_settings());
    for edit in edits {
        handle.submit(edit)?;
    }
    // Closing the stream flushes the last edit without waiting out the quiet period.
    drop(handle);

    let report = feed.next().await.ok_or(CoordinatorError::Stopped)?;
    let board = task.await.map_err(|err| {
        warn!(error = %err, "change coordinator task failed");
        CoordinatorError::Stopped
    })?;

    let saved = match save_as {
        Some(name) => {
            let saved = board.active().save_as(name, Utc::now());
            context.store.save(saved.clone())?;
            Some(saved)
        }
        None => None,
    };

    if context.json {
        return render::print_json(&render::ImpactPayload {
            configuration: board.active(),
            saved_as: saved.as_ref().map(|configuration| configuration.id.as_str()),
            report: &report,
        });
    }

    render::render_impact(
        &context.configuration,
        board.active(),
        &report,
        &names,
        context.workload.significant_change,
        all_deltas,
        saved.as_ref(),
    );
    Ok(())
}
