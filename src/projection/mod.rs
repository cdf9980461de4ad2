//! Scenario forecast engine and its output

mod engine;
mod periods;

pub use engine::{
    project, ForecastConfig, ForecastEngine, ScenarioImpact, DEFAULT_LOW_BALANCE_THRESHOLD,
};
pub use periods::{BalanceStatus, ForecastResult, ForecastSummary, ProjectedPeriod};
