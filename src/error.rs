// src/error.rs

use thiserror::Error;

/// Failure kinds raised by the forecasting engine.
///
/// An empty record set is not an error: it produces all-zero figures.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// A customer record is out of domain (non-positive frequency, negative units).
    #[error("invalid record '{name}': {reason}")]
    InvalidRecord { name: String, reason: String },

    /// A what-if adjustment drove a rate or duration out of domain.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// A derived figure could not be represented (NaN or infinity).
    #[error("invalid computation of {quantity}: {value}")]
    InvalidComputation { quantity: &'static str, value: f64 },

    /// Supply-chain, review-policy or engine settings are out of domain.
    #[error("invalid configuration '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;

impl ForecastError {
    pub(crate) fn record(name: &str, reason: impl Into<String>) -> Self {
        ForecastError::InvalidRecord {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(field: &str, reason: impl Into<String>) -> Self {
        ForecastError::InvalidConfiguration {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Rejects NaN and infinities produced by a derived quantity.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ForecastError::InvalidComputation { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite_rejects_nan() {
        assert!(ensure_finite("daily_demand", 3.5).is_ok());
        let err = ensure_finite("daily_demand", f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InvalidComputation {
                quantity: "daily_demand",
                ..
            }
        ));
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = ForecastError::record("Acme", "consumption frequency must be positive");
        assert_eq!(
            err.to_string(),
            "invalid record 'Acme': consumption frequency must be positive"
        );
    }
}
