//! Base series data structures and CSV loading

mod data;
pub mod loader;

pub use data::{BaseSeries, MonthlyPeriod, validate_periods};
pub use loader::{load_series, load_series_from_reader};
