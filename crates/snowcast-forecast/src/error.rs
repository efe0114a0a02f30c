use std::error::Error;
use std::fmt;

/// Custom error type for forecaster precondition failures
#[derive(Debug)]
pub enum ForecastError {
    ModelNotTrained,
    DatasetNotLoaded,
    UnknownTimestamp(String),
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ForecastError::ModelNotTrained => {
                write!(f, "No model has been trained yet; call train() first")
            }
            ForecastError::DatasetNotLoaded => {
                write!(f, "No dataset has been loaded yet; call train() first")
            }
            ForecastError::UnknownTimestamp(timestamp) => {
                write!(f, "Timestamp '{}' is not present in the loaded dataset", timestamp)
            }
        }
    }
}

impl Error for ForecastError {}
