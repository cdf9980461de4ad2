//! Projection output structures

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Colour band of a projected balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceStatus {
    /// Balance below zero
    Negative,
    /// Balance in `[0, threshold)`
    Low,
    Healthy,
}

/// A single projected month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPeriod {
    pub month: String,
    pub projected_income: f64,
    pub projected_expense: f64,
    /// Cumulative balance after this period's flows
    pub projected_balance: f64,
    pub is_negative: bool,
    pub is_low: bool,
}

impl ProjectedPeriod {
    /// Build a period, deriving both flags from the balance and threshold
    pub fn new(
        month: impl Into<String>,
        projected_income: f64,
        projected_expense: f64,
        projected_balance: f64,
        low_balance_threshold: f64,
    ) -> Self {
        Self {
            month: month.into(),
            projected_income,
            projected_expense,
            projected_balance,
            is_negative: projected_balance < 0.0,
            is_low: projected_balance >= 0.0 && projected_balance < low_balance_threshold,
        }
    }

    pub fn net_flow(&self) -> f64 {
        self.projected_income - self.projected_expense
    }

    pub fn status(&self) -> BalanceStatus {
        if self.is_negative {
            BalanceStatus::Negative
        } else if self.is_low {
            BalanceStatus::Low
        } else {
            BalanceStatus::Healthy
        }
    }
}

/// Complete projection over a base series
///
/// Serialize-only: the crunch flag and lowest balance are derived from
/// `periods` in `ForecastResult::new` and never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Balance before the first period's flows
    pub opening_balance: f64,

    pub low_balance_threshold: f64,

    /// One entry per base period, same order
    pub periods: Vec<ProjectedPeriod>,

    /// Minimum projected balance over all periods
    pub lowest_balance: f64,

    /// True when any projected balance is below zero
    pub has_cash_crunch: bool,
}

impl ForecastResult {
    pub fn new(opening_balance: f64, low_balance_threshold: f64, periods: Vec<ProjectedPeriod>) -> Self {
        let lowest_balance = periods
            .iter()
            .map(|p| p.projected_balance)
            .fold(f64::INFINITY, f64::min);
        // An empty projection has no lowest point; report the opening balance
        let lowest_balance = if periods.is_empty() { opening_balance } else { lowest_balance };

        Self {
            opening_balance,
            low_balance_threshold,
            has_cash_crunch: !periods.is_empty() && lowest_balance < 0.0,
            lowest_balance,
            periods,
        }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// First period reaching the lowest balance
    pub fn lowest_period(&self) -> Option<&ProjectedPeriod> {
        self.periods
            .iter()
            .find(|p| p.projected_balance == self.lowest_balance)
    }

    pub fn closing_balance(&self) -> f64 {
        self.periods
            .last()
            .map(|p| p.projected_balance)
            .unwrap_or(self.opening_balance)
    }

    pub fn balances(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.projected_balance).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ForecastSummary {
        let total_income: f64 = self.periods.iter().map(|p| p.projected_income).sum();
        let total_expense: f64 = self.periods.iter().map(|p| p.projected_expense).sum();

        ForecastSummary {
            total_periods: self.periods.len(),
            total_income,
            total_expense,
            opening_balance: self.opening_balance,
            closing_balance: self.closing_balance(),
            lowest_balance: self.lowest_balance,
            lowest_month: self.lowest_period().map(|p| p.month.clone()),
            low_periods: self.periods.iter().filter(|p| p.is_low).count(),
            negative_periods: self.periods.iter().filter(|p| p.is_negative).count(),
            first_negative_month: self
                .periods
                .iter()
                .find(|p| p.is_negative)
                .map(|p| p.month.clone()),
            has_cash_crunch: self.has_cash_crunch,
        }
    }

    /// Write one CSV row per projected period
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for period in &self.periods {
            csv_writer.serialize(period)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub total_periods: usize,
    pub total_income: f64,
    pub total_expense: f64,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub lowest_balance: f64,
    pub lowest_month: Option<String>,
    pub low_periods: usize,
    pub negative_periods: usize,
    pub first_negative_month: Option<String>,
    pub has_cash_crunch: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn period(month: &str, balance: f64) -> ProjectedPeriod {
        ProjectedPeriod::new(month, 0.0, 0.0, balance, 5_000.0)
    }

    #[test]
    fn test_flags_are_exclusive() {
        for balance in [-0.01, -5_000.0, 0.0, 4_999.99, 5_000.0, 30_500.0] {
            let p = period("Nov", balance);
            assert!(!(p.is_negative && p.is_low), "both flags set for {}", balance);
        }
        assert_eq!(period("Nov", -1.0).status(), BalanceStatus::Negative);
        assert_eq!(period("Nov", 0.0).status(), BalanceStatus::Low);
        assert_eq!(period("Nov", 4_999.0).status(), BalanceStatus::Low);
        assert_eq!(period("Nov", 5_000.0).status(), BalanceStatus::Healthy);
    }

    #[test]
    fn test_lowest_point_and_summary() {
        let result = ForecastResult::new(
            1_000.0,
            5_000.0,
            vec![period("Nov", 3_000.0), period("Déc", -2_000.0), period("Jan", 6_000.0)],
        );
        assert!(result.has_cash_crunch);
        assert_relative_eq!(result.lowest_balance, -2_000.0);
        assert_eq!(result.lowest_period().map(|p| p.month.as_str()), Some("Déc"));

        let summary = result.summary();
        assert_eq!(summary.total_periods, 3);
        assert_eq!(summary.low_periods, 1);
        assert_eq!(summary.negative_periods, 1);
        assert_eq!(summary.first_negative_month.as_deref(), Some("Déc"));
        assert_relative_eq!(summary.closing_balance, 6_000.0);
    }

    #[test]
    fn test_json_flags_match_periods() {
        let result = ForecastResult::new(
            0.0,
            5_000.0,
            vec![period("Nov", 2_000.0), period("Déc", -500.0)],
        );
        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(json["has_cash_crunch"], serde_json::Value::Bool(true));
        assert_eq!(json["lowest_balance"].as_f64(), Some(-500.0));
        assert_eq!(json["periods"][1]["is_negative"], serde_json::Value::Bool(true));
        assert_eq!(json["periods"][0]["is_low"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_write_csv() {
        let result = ForecastResult::new(0.0, 5_000.0, vec![
            ProjectedPeriod::new("Nov", 22_000.0, 16_000.0, 30_500.0, 5_000.0),
        ]);
        let mut buf = Vec::new();
        result.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("month,projected_income,projected_expense,projected_balance,is_negative,is_low")
        );
        assert_eq!(lines.next(), Some("Nov,22000.0,16000.0,30500.0,false,false"));
    }
}
