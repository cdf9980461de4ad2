//! Cash Flow Forecast - What-if projection engine for a treasury dashboard
//!
//! This library provides:
//! - Base monthly income/expense series with an opening balance
//! - Togglable scenarios (recurring expense, one-off expense/income, payment delay)
//! - Cumulative balance projection with low/negative flags and cash-crunch detection
//! - Per-scenario impact analysis, CSV/JSON export and euro display formatting

pub mod error;
pub mod format;
pub mod projection;
pub mod scenario;
pub mod series;

// Re-export commonly used types
pub use error::{ForecastError, LoadError, PlacementError};
pub use projection::{ForecastConfig, ForecastEngine, ForecastResult, ProjectedPeriod};
pub use scenario::{Scenario, ScenarioKind, ScenarioSet};
pub use series::{BaseSeries, MonthlyPeriod};
