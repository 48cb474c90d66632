use crate::commands::{run_balance, run_impact, run_scores, run_summary, Context};
use crate::infra::{parse_filter, parse_period, parse_preset, parse_sort, parse_weight};
use clap::{Args, Parser, Subcommand};
use crew_workload::config::AppConfig;
use crew_workload::error::AppError;
use crew_workload::telemetry;
use crew_workload::workload::{BalanceFilter, BalanceSort, Period, Preset};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Crew Workload",
    about = "Score crew workload, classify utilization balance and preview configuration changes",
    version
)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
pub(crate) struct SourceArgs {
    /// Roster CSV export. The bundled sample roster is used when omitted.
    #[arg(long, global = true)]
    pub(crate) roster: Option<PathBuf>,
    /// Metric configuration to score with: a JSON file or an id saved in the store.
    #[arg(long, global = true)]
    pub(crate) config: Option<String>,
    /// Directory holding saved configurations
    #[arg(long, global = true, default_value = "configurations")]
    pub(crate) store: PathBuf,
    /// Emit JSON instead of the text report
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Workload scores per crew member
    Scores(ScoresArgs),
    /// Trip-day balance against the target average
    Balance(BalanceArgs),
    /// Fleet summary, score distribution and trends
    Summary,
    /// Apply configuration edits and report how scores move
    Impact(ImpactArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ScoresArgs {
    /// Period to score (previous, current, next, twoMonthsOut)
    #[arg(long, value_parser = parse_period, default_value = "current")]
    pub(crate) period: Period,
    /// Include crew excluded from metrics
    #[arg(long)]
    pub(crate) include_excluded: bool,
    /// Show the per-metric breakdown for one crew member
    #[arg(long)]
    pub(crate) breakdown: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct BalanceArgs {
    #[arg(long, value_parser = parse_period, default_value = "current")]
    pub(crate) period: Period,
    /// all, over or under
    #[arg(long, value_parser = parse_filter, default_value = "all")]
    pub(crate) filter: BalanceFilter,
    /// overutilized, underutilized or name
    #[arg(long, value_parser = parse_sort, default_value = "overutilized")]
    pub(crate) sort: BalanceSort,
    /// Override the configured target trip days
    #[arg(long)]
    pub(crate) target: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ImpactArgs {
    /// Start from the default configuration instead of the loaded one
    #[arg(long)]
    pub(crate) reset: bool,
    /// Reweight with a named preset before any other edit
    #[arg(long, value_parser = parse_preset)]
    pub(crate) preset: Option<Preset>,
    /// Set a metric weight, as METRIC_ID=WEIGHT (repeatable)
    #[arg(long = "weight", value_parser = parse_weight)]
    pub(crate) weights: Vec<(String, f64)>,
    /// Enable or disable a metric (repeatable)
    #[arg(long = "toggle")]
    pub(crate) toggles: Vec<String>,
    /// Remove a metric (repeatable)
    #[arg(long = "remove")]
    pub(crate) removals: Vec<String>,
    /// Save the edited configuration to the store under this name
    #[arg(long)]
    pub(crate) save_as: Option<String>,
    /// List every crew member's delta, not only significant ones
    #[arg(long)]
    pub(crate) all_deltas: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let context = Context::load(cli.source, config)?;

    match cli.command {
        Command::Scores(args) => run_scores(&context, args),
        Command::Balance(args) => run_balance(&context, args),
        Command::Summary => run_summary(&context),
        Command::Impact(args) => run_impact(context, args).await,
    }
}
