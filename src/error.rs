//! Error types for forecasting and input loading

use thiserror::Error;

/// Why a scenario's placement could not be applied to a series
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Index lies outside `[0, len)`
    #[error("period index {index} is outside a series of {len} periods")]
    OutOfRange { index: usize, len: usize },

    /// Payment delay whose destination precedes its source
    #[error("destination index {destination_index} precedes source index {source_index}")]
    DelayReversed { source_index: usize, destination_index: usize },
}

/// Errors raised while projecting a forecast or managing scenarios
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("base series has no periods")]
    EmptyBaseSeries,

    #[error("scenario '{scenario_id}' has an invalid placement: {reason}")]
    InvalidScenarioPlacement {
        scenario_id: String,
        #[source]
        reason: PlacementError,
    },

    #[error("invalid amount for {field}: {value}")]
    InvalidAmount { field: String, value: f64 },

    #[error("low-balance threshold must be finite, got {0}")]
    InvalidThreshold(f64),

    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("scenario '{0}' is already defined")]
    DuplicateScenario(String),
}

impl ForecastError {
    pub(crate) fn out_of_range(scenario_id: &str, index: usize, len: usize) -> Self {
        ForecastError::InvalidScenarioPlacement {
            scenario_id: scenario_id.to_string(),
            reason: PlacementError::OutOfRange { index, len },
        }
    }

    pub(crate) fn delay_reversed(scenario_id: &str, source_index: usize, destination_index: usize) -> Self {
        ForecastError::InvalidScenarioPlacement {
            scenario_id: scenario_id.to_string(),
            reason: PlacementError::DelayReversed { source_index, destination_index },
        }
    }

    pub(crate) fn invalid_amount(field: impl Into<String>, value: f64) -> Self {
        ForecastError::InvalidAmount { field: field.into(), value }
    }
}

/// Errors raised while reading series or scenario files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("malformed input at record {record}: {message}")]
    Malformed { record: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_messages() {
        let err = ForecastError::out_of_range("grant", 9, 6);
        assert_eq!(
            err.to_string(),
            "scenario 'grant' has an invalid placement: period index 9 is outside a series of 6 periods"
        );

        let err = ForecastError::delay_reversed("late_payment", 3, 1);
        assert!(err.to_string().contains("destination index 1 precedes source index 3"));
    }

    #[test]
    fn test_placement_reason_is_error_source() {
        use std::error::Error;

        let err = ForecastError::delay_reversed("late_payment", 3, 1);
        let source = err.source().expect("placement error should expose its reason");
        assert_eq!(source.to_string(), "destination index 1 precedes source index 3");
        assert_eq!(
            source.downcast_ref::<PlacementError>(),
            Some(&PlacementError::DelayReversed { source_index: 3, destination_index: 1 })
        );
    }
}
