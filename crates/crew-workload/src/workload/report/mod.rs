mod summary;
mod trends;
pub mod views;

pub use summary::{crew_score_table, WorkloadSummary};
pub use trends::{period_trends, score_distribution, utilization_trend};
