//! What-if scenario definitions and their per-period effect

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Placement rule of a scenario, one variant per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Extra expense on every period from `start_index` to the end of the series
    RecurringExpense { start_index: usize },
    /// Extra expense on a single period
    OneOffExpense { index: usize },
    /// Extra income on a single period
    OneOffIncome { index: usize },
    /// Income moved from `source_index` to the later `destination_index`
    PaymentDelay {
        source_index: usize,
        destination_index: usize,
    },
}

impl ScenarioKind {
    /// Whether the scenario adds an expense (shown with a minus sign)
    pub fn is_expense(&self) -> bool {
        matches!(
            self,
            ScenarioKind::RecurringExpense { .. } | ScenarioKind::OneOffExpense { .. }
        )
    }

    /// Short display name of the kind
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::RecurringExpense { .. } | ScenarioKind::OneOffExpense { .. } => "Dépense",
            ScenarioKind::OneOffIncome { .. } => "Revenu",
            ScenarioKind::PaymentDelay { .. } => "Décalage",
        }
    }
}

/// Income and expense deltas applied to one period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub income: f64,
    pub expense: f64,
}

impl Adjustment {
    pub fn income(amount: f64) -> Self {
        Self { income: amount, expense: 0.0 }
    }

    pub fn expense(amount: f64) -> Self {
        Self { income: 0.0, expense: amount }
    }

    pub fn is_zero(&self) -> bool {
        self.income == 0.0 && self.expense == 0.0
    }

    /// Effect of the adjustment on the period's net flow
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }

    /// Sum adjustments independently of their order.
    ///
    /// Each component is summed in ascending value order, so any permutation
    /// of `deltas` yields bit-identical totals.
    pub fn total(deltas: &[Adjustment]) -> Self {
        fn ordered_sum(mut values: Vec<f64>) -> f64 {
            values.sort_by(f64::total_cmp);
            values.into_iter().fold(0.0, |acc, v| acc + v)
        }

        Self {
            income: ordered_sum(deltas.iter().map(|d| d.income).collect()),
            expense: ordered_sum(deltas.iter().map(|d| d.expense).collect()),
        }
    }
}

/// A togglable what-if adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique identifier within a scenario set
    pub id: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub description: String,

    /// Positive magnitude of the adjustment
    pub amount: f64,

    /// Only active scenarios affect a projection
    #[serde(default)]
    pub active: bool,

    #[serde(flatten)]
    pub kind: ScenarioKind,
}

impl Scenario {
    /// Create an inactive scenario with empty display text
    pub fn new(id: impl Into<String>, kind: ScenarioKind, amount: f64) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            description: String::new(),
            amount,
            active: false,
            kind,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>, description: impl Into<String>) -> Self {
        self.label = label.into();
        self.description = description.into();
        self
    }

    pub fn activated(mut self) -> Self {
        self.active = true;
        self
    }

    /// Amount must be a positive, finite number
    pub fn validate_amount(&self) -> Result<(), ForecastError> {
        if self.amount.is_finite() && self.amount > 0.0 {
            Ok(())
        } else {
            Err(ForecastError::invalid_amount(format!("scenario {} amount", self.id), self.amount))
        }
    }

    /// Check that every index the scenario touches exists in a series of `len` periods
    pub fn validate_placement(&self, len: usize) -> Result<(), ForecastError> {
        let check = |index: usize| {
            if index < len {
                Ok(())
            } else {
                Err(ForecastError::out_of_range(&self.id, index, len))
            }
        };

        match self.kind {
            ScenarioKind::RecurringExpense { start_index } => check(start_index),
            ScenarioKind::OneOffExpense { index } | ScenarioKind::OneOffIncome { index } => check(index),
            ScenarioKind::PaymentDelay { source_index, destination_index } => {
                check(source_index)?;
                check(destination_index)?;
                if destination_index < source_index {
                    return Err(ForecastError::delay_reversed(&self.id, source_index, destination_index));
                }
                Ok(())
            }
        }
    }

    /// Adjustment this scenario contributes to period `index`, ignoring `active`
    pub fn adjustment_at(&self, index: usize) -> Adjustment {
        match self.kind {
            ScenarioKind::RecurringExpense { start_index } if index >= start_index => {
                Adjustment::expense(self.amount)
            }
            ScenarioKind::OneOffExpense { index: target } if index == target => {
                Adjustment::expense(self.amount)
            }
            ScenarioKind::OneOffIncome { index: target } if index == target => {
                Adjustment::income(self.amount)
            }
            // Same source and destination nets to zero
            ScenarioKind::PaymentDelay { source_index, destination_index }
                if source_index == destination_index =>
            {
                Adjustment::default()
            }
            ScenarioKind::PaymentDelay { source_index, .. } if index == source_index => {
                Adjustment::income(-self.amount)
            }
            ScenarioKind::PaymentDelay { destination_index, .. } if index == destination_index => {
                Adjustment::income(self.amount)
            }
            _ => Adjustment::default(),
        }
    }
}
