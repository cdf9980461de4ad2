//! Collection of scenarios keyed by id, with toggle state

use serde::{Deserialize, Serialize};

use super::types::{Scenario, ScenarioKind};
use crate::error::ForecastError;

/// Ordered scenario collection with unique ids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Scenario>", into = "Vec<Scenario>")]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set, rejecting duplicate ids and unusable amounts
    pub fn from_scenarios(scenarios: Vec<Scenario>) -> Result<Self, ForecastError> {
        let mut set = Self::new();
        for scenario in scenarios {
            set.insert(scenario)?;
        }
        Ok(set)
    }

    /// The four dashboard scenarios, all inactive
    pub fn reference() -> Self {
        Self {
            scenarios: vec![
                Scenario::new("hiring", ScenarioKind::RecurringExpense { start_index: 2 }, 4_500.0)
                    .with_label("Recrutement Dev Senior", "Coût mensuel chargé (Jan+)"),
                Scenario::new(
                    "late_payment",
                    ScenarioKind::PaymentDelay { source_index: 1, destination_index: 3 },
                    8_000.0,
                )
                .with_label("Retard Client Majeur", "Décalage paiement TechSolutions de Déc à Fév"),
                Scenario::new("invest", ScenarioKind::OneOffExpense { index: 1 }, 3_000.0)
                    .with_label("Achat Matériel", "Investissement unique en Décembre"),
                Scenario::new("grant", ScenarioKind::OneOffIncome { index: 4 }, 10_000.0)
                    .with_label("Subvention Innovation", "Encaissement prévu en Mars"),
            ],
        }
    }

    pub fn insert(&mut self, scenario: Scenario) -> Result<(), ForecastError> {
        if self.get(&scenario.id).is_some() {
            return Err(ForecastError::DuplicateScenario(scenario.id));
        }
        scenario.validate_amount()?;
        self.scenarios.push(scenario);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Scenario, ForecastError> {
        self.scenarios
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ForecastError::UnknownScenario(id.to_string()))
    }

    /// Flip a scenario's toggle, returning its new state
    pub fn toggle(&mut self, id: &str) -> Result<bool, ForecastError> {
        let scenario = self.get_mut(id)?;
        scenario.active = !scenario.active;
        log::debug!("Scenario '{}' toggled {}", id, if scenario.active { "on" } else { "off" });
        Ok(scenario.active)
    }

    pub fn set_active(&mut self, id: &str, active: bool) -> Result<(), ForecastError> {
        self.get_mut(id)?.active = active;
        Ok(())
    }

    pub fn activate_all(&mut self) {
        for scenario in &mut self.scenarios {
            scenario.active = true;
        }
    }

    pub fn deactivate_all(&mut self) {
        for scenario in &mut self.scenarios {
            scenario.active = false;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(|s| s.active)
    }

    pub fn as_slice(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl AsRef<[Scenario]> for ScenarioSet {
    fn as_ref(&self) -> &[Scenario] {
        &self.scenarios
    }
}

impl TryFrom<Vec<Scenario>> for ScenarioSet {
    type Error = ForecastError;

    fn try_from(scenarios: Vec<Scenario>) -> Result<Self, Self::Error> {
        Self::from_scenarios(scenarios)
    }
}

impl From<ScenarioSet> for Vec<Scenario> {
    fn from(set: ScenarioSet) -> Self {
        set.scenarios
    }
}
