//! Load a base series from CSV
//!
//! Expected columns: `month,income,expense,initial_balance`, with
//! `initial_balance` filled on the first row only.

use super::{BaseSeries, MonthlyPeriod};
use crate::error::LoadError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    month: String,
    income: f64,
    expense: f64,
    #[serde(default)]
    initial_balance: Option<f64>,
}

impl CsvRow {
    fn to_period(self, record: usize) -> Result<MonthlyPeriod, LoadError> {
        let month = self.month.trim().to_string();
        if month.is_empty() {
            return Err(LoadError::Malformed {
                record,
                message: "month label is empty".to_string(),
            });
        }
        if record > 1 && self.initial_balance.is_some() {
            return Err(LoadError::Malformed {
                record,
                message: format!("initial_balance is only allowed on the first period, found on {}", month),
            });
        }

        Ok(MonthlyPeriod {
            month,
            income: self.income,
            expense: self.expense,
            initial_balance: self.initial_balance,
        })
    }
}

/// Load a base series from a CSV file
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<BaseSeries, LoadError> {
    let reader = Reader::from_path(path)?;
    read_series(reader)
}

/// Load a base series from any reader (e.g., string buffer)
pub fn load_series_from_reader<R: std::io::Read>(reader: R) -> Result<BaseSeries, LoadError> {
    read_series(Reader::from_reader(reader))
}

fn read_series<R: std::io::Read>(mut reader: Reader<R>) -> Result<BaseSeries, LoadError> {
    let mut periods = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        periods.push(row.to_period(i + 1)?);
    }

    let series = BaseSeries::new(periods)?;
    log::info!(
        "Loaded base series: {} periods, opening balance {:.2}",
        series.len(),
        series.opening_balance()
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    const SERIES_CSV: &str = "\
month,income,expense,initial_balance
Nov,22000,16000,24500
Déc,28000,19000,
Jan,18000,15000,
";

    #[test]
    fn test_load_series() {
        let series = load_series_from_reader(SERIES_CSV.as_bytes()).expect("Failed to load series");
        assert_eq!(series.len(), 3);
        assert_eq!(series.opening_balance(), 24_500.0);

        let dec = &series.periods()[1];
        assert_eq!(dec.month, "Déc");
        assert_eq!(dec.income, 28_000.0);
        assert_eq!(dec.expense, 19_000.0);
        assert_eq!(dec.initial_balance, None);
    }

    #[test]
    fn test_reference_file_matches_builtin() {
        let series = load_series("data/reference_series.csv").expect("Failed to load reference series");
        assert_eq!(series, BaseSeries::reference());
    }

    #[test]
    fn test_header_only_is_empty_series() {
        let err = load_series_from_reader("month,income,expense,initial_balance\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Forecast(ForecastError::EmptyBaseSeries)));
    }

    #[test]
    fn test_opening_balance_on_later_row_rejected() {
        let csv = "month,income,expense,initial_balance\nNov,1,1,10\nDéc,1,1,20\n";
        let err = load_series_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { record: 2, .. }));
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        let csv = "month,income,expense,initial_balance\nNov,abc,1,10\n";
        let err = load_series_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
