//! Base forecast series: monthly income and expense before scenarios

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// One month of the un-adjusted forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPeriod {
    /// Display label for the month (e.g. "Nov")
    pub month: String,

    /// Expected receipts before scenario adjustment
    pub income: f64,

    /// Expected payments before scenario adjustment
    pub expense: f64,

    /// Opening cash balance, carried by the first period only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_balance: Option<f64>,
}

impl MonthlyPeriod {
    pub fn new(month: impl Into<String>, income: f64, expense: f64) -> Self {
        Self {
            month: month.into(),
            income,
            expense,
            initial_balance: None,
        }
    }

    /// Attach an opening balance (only meaningful on the first period)
    pub fn with_initial_balance(mut self, balance: f64) -> Self {
        self.initial_balance = Some(balance);
        self
    }

    /// Net flow of the period before any scenario
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Check that a series is non-empty and that every amount is usable.
///
/// Income and expense must be finite and non-negative; the opening balance
/// must be finite but may be negative (an overdrawn starting position).
pub fn validate_periods(periods: &[MonthlyPeriod]) -> Result<(), ForecastError> {
    if periods.is_empty() {
        return Err(ForecastError::EmptyBaseSeries);
    }

    for period in periods {
        if !period.income.is_finite() || period.income < 0.0 {
            return Err(ForecastError::invalid_amount(
                format!("{} income", period.month),
                period.income,
            ));
        }
        if !period.expense.is_finite() || period.expense < 0.0 {
            return Err(ForecastError::invalid_amount(
                format!("{} expense", period.month),
                period.expense,
            ));
        }
        if let Some(balance) = period.initial_balance {
            if !balance.is_finite() {
                return Err(ForecastError::invalid_amount(
                    format!("{} initial balance", period.month),
                    balance,
                ));
            }
        }
    }

    Ok(())
}

/// Ordered, validated sequence of monthly periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MonthlyPeriod>", into = "Vec<MonthlyPeriod>")]
pub struct BaseSeries {
    periods: Vec<MonthlyPeriod>,
}

impl BaseSeries {
    /// Build a series, rejecting empty input and unusable amounts
    pub fn new(periods: Vec<MonthlyPeriod>) -> Result<Self, ForecastError> {
        validate_periods(&periods)?;
        Ok(Self { periods })
    }

    /// Six-month mock forecast used by the dashboard (Nov through Avr)
    pub fn reference() -> Self {
        Self {
            periods: vec![
                MonthlyPeriod::new("Nov", 22_000.0, 16_000.0).with_initial_balance(24_500.0),
                MonthlyPeriod::new("Déc", 28_000.0, 19_000.0),
                MonthlyPeriod::new("Jan", 18_000.0, 15_000.0),
                MonthlyPeriod::new("Fév", 21_000.0, 16_000.0),
                MonthlyPeriod::new("Mar", 25_000.0, 17_000.0),
                MonthlyPeriod::new("Avr", 23_000.0, 16_000.0),
            ],
        }
    }

    pub fn periods(&self) -> &[MonthlyPeriod] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Opening balance from the first period (zero when absent)
    pub fn opening_balance(&self) -> f64 {
        self.periods
            .first()
            .and_then(|p| p.initial_balance)
            .unwrap_or(0.0)
    }

    /// Position of a month label, if present
    pub fn index_of(&self, month: &str) -> Option<usize> {
        self.periods.iter().position(|p| p.month == month)
    }
}

impl AsRef<[MonthlyPeriod]> for BaseSeries {
    fn as_ref(&self) -> &[MonthlyPeriod] {
        &self.periods
    }
}

impl TryFrom<Vec<MonthlyPeriod>> for BaseSeries {
    type Error = ForecastError;

    fn try_from(periods: Vec<MonthlyPeriod>) -> Result<Self, Self::Error> {
        Self::new(periods)
    }
}

impl From<BaseSeries> for Vec<MonthlyPeriod> {
    fn from(series: BaseSeries) -> Self {
        series.periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_series() {
        let series = BaseSeries::reference();
        assert_eq!(series.len(), 6);
        assert_eq!(series.opening_balance(), 24_500.0);
        assert_eq!(series.index_of("Fév"), Some(3));
        assert!(series.periods()[1..].iter().all(|p| p.initial_balance.is_none()));
        assert!(validate_periods(series.periods()).is_ok());
    }

    #[test]
    fn test_empty_series_rejected() {
        assert_eq!(BaseSeries::new(Vec::new()), Err(ForecastError::EmptyBaseSeries));
    }

    #[test]
    fn test_negative_expense_rejected() {
        let err = BaseSeries::new(vec![MonthlyPeriod::new("Nov", 1_000.0, -5.0)]).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidAmount { ref field, .. } if field == "Nov expense"));
    }

    #[test]
    fn test_missing_opening_balance_defaults_to_zero() {
        let series = BaseSeries::new(vec![MonthlyPeriod::new("Nov", 1_000.0, 500.0)]).unwrap();
        assert_eq!(series.opening_balance(), 0.0);
        assert_eq!(series.periods()[0].net(), 500.0);
    }

    #[test]
    fn test_negative_opening_balance_allowed() {
        let series = BaseSeries::new(vec![
            MonthlyPeriod::new("Nov", 0.0, 0.0).with_initial_balance(-2_000.0),
        ]);
        assert!(series.is_ok());
    }
}
