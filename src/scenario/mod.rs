//! What-if scenarios: definitions, toggle state and JSON loading

mod types;
mod set;
pub mod loader;

pub use types::{Adjustment, Scenario, ScenarioKind};
pub use set::ScenarioSet;
pub use loader::{load_scenarios, load_scenarios_from_reader};
