//! Scenario forecast engine: base series + active scenarios -> projected balances

use crate::error::ForecastError;
use crate::scenario::{Adjustment, Scenario, ScenarioSet};
use crate::series::{validate_periods, BaseSeries, MonthlyPeriod};
use super::periods::{ForecastResult, ProjectedPeriod};
use serde::{Deserialize, Serialize};

/// Balance under which a non-negative period is flagged as low
pub const DEFAULT_LOW_BALANCE_THRESHOLD: f64 = 5_000.0;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Periods with `0 <= balance < low_balance_threshold` are flagged low
    pub low_balance_threshold: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            low_balance_threshold: DEFAULT_LOW_BALANCE_THRESHOLD,
        }
    }
}

/// Effect of one scenario projected on its own against the baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioImpact {
    pub scenario_id: String,
    pub label: String,
    /// Change in closing balance versus the no-scenario projection
    pub closing_balance_delta: f64,
    /// Change in lowest balance versus the no-scenario projection
    pub lowest_balance_delta: f64,
    /// Lowest balance with only this scenario active
    pub lowest_balance: f64,
    /// Whether this scenario alone produces a cash crunch
    pub has_cash_crunch: bool,
}

/// Stateless projection engine
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Project a base series under the active scenarios of `scenarios`.
    ///
    /// Returns one `ProjectedPeriod` per base period, in input order. Inactive
    /// scenarios are ignored entirely, including their placement.
    pub fn project(
        &self,
        base: &[MonthlyPeriod],
        scenarios: &[Scenario],
    ) -> Result<ForecastResult, ForecastError> {
        let threshold = self.config.low_balance_threshold;
        if !threshold.is_finite() {
            return Err(ForecastError::InvalidThreshold(threshold));
        }
        validate_periods(base)?;

        let active: Vec<&Scenario> = scenarios.iter().filter(|s| s.active).collect();
        for scenario in &active {
            scenario.validate_amount()?;
            scenario.validate_placement(base.len())?;
        }

        for period in base.iter().skip(1).filter(|p| p.initial_balance.is_some()) {
            log::warn!("Ignoring initial balance on {}: only the first period opens the series", period.month);
        }

        let opening_balance = base[0].initial_balance.unwrap_or(0.0);
        let mut balance = opening_balance;
        let mut periods = Vec::with_capacity(base.len());

        for (index, period) in base.iter().enumerate() {
            let mut deltas = Vec::with_capacity(active.len());
            for scenario in &active {
                let delta = scenario.adjustment_at(index);
                if !delta.is_zero() {
                    log::debug!(
                        "{}: scenario '{}' income {:+.2} expense {:+.2}",
                        period.month, scenario.id, delta.income, delta.expense
                    );
                    deltas.push(delta);
                }
            }
            // Scenarios commute: the total must not depend on their order
            let adjustment = Adjustment::total(&deltas);

            let income = period.income + adjustment.income;
            let expense = period.expense + adjustment.expense;
            balance += income - expense;

            log::debug!(
                "{}: income {:.2} expense {:.2} balance {:.2}",
                period.month, income, expense, balance
            );
            periods.push(ProjectedPeriod::new(period.month.clone(), income, expense, balance, threshold));
        }

        let result = ForecastResult::new(opening_balance, threshold, periods);
        log::info!(
            "Projected {} periods with {} active scenarios: closing balance {:.2}, lowest {:.2}",
            result.len(),
            active.len(),
            result.closing_balance(),
            result.lowest_balance
        );
        if result.has_cash_crunch {
            log::warn!("Cash crunch: projected balance falls to {:.2}", result.lowest_balance);
        }

        Ok(result)
    }

    /// Project a validated series under a scenario set
    pub fn project_series(
        &self,
        series: &BaseSeries,
        scenarios: &ScenarioSet,
    ) -> Result<ForecastResult, ForecastError> {
        self.project(series.periods(), scenarios.as_slice())
    }

    /// Project every scenario alone, regardless of its toggle, against the baseline
    pub fn scenario_impacts(
        &self,
        base: &[MonthlyPeriod],
        scenarios: &[Scenario],
    ) -> Result<Vec<ScenarioImpact>, ForecastError> {
        let baseline = self.project(base, &[])?;

        scenarios
            .iter()
            .map(|scenario| {
                let alone = Scenario { active: true, ..scenario.clone() };
                let result = self.project(base, std::slice::from_ref(&alone))?;
                Ok(ScenarioImpact {
                    scenario_id: scenario.id.clone(),
                    label: scenario.label.clone(),
                    closing_balance_delta: result.closing_balance() - baseline.closing_balance(),
                    lowest_balance_delta: result.lowest_balance - baseline.lowest_balance,
                    lowest_balance: result.lowest_balance,
                    has_cash_crunch: result.has_cash_crunch,
                })
            })
            .collect()
    }
}

/// Project with the default configuration
pub fn project(base: &[MonthlyPeriod], scenarios: &[Scenario]) -> Result<ForecastResult, ForecastError> {
    ForecastEngine::default().project(base, scenarios)
}
