mod cli;
mod commands;
mod infra;
mod render;

use crew_workload::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
