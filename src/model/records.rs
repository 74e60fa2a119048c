// src/model/records.rs

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// One customer's present and projected consumption per cycle.
///
/// `current_units` and `future_units` are the two endpoints of a linear demand
/// ramp; `consumption_frequency_days` is the length of one consumption cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDemandRecord {
    pub name: String,
    pub current_units: f64,
    pub future_units: f64,
    pub consumption_frequency_days: f64,
}

impl CustomerDemandRecord {
    pub fn new(
        name: impl Into<String>,
        current_units: f64,
        future_units: f64,
        consumption_frequency_days: f64,
    ) -> Self {
        Self {
            name: name.into(),
            current_units,
            future_units,
            consumption_frequency_days,
        }
    }

    /// Checks the record against its domain.
    pub fn validate(&self) -> Result<()> {
        if !self.current_units.is_finite() || self.current_units < 0.0 {
            return Err(ForecastError::record(
                &self.name,
                format!("current units must be >= 0 (got {})", self.current_units),
            ));
        }
        if !self.future_units.is_finite() || self.future_units < 0.0 {
            return Err(ForecastError::record(
                &self.name,
                format!("future units must be >= 0 (got {})", self.future_units),
            ));
        }
        if !self.consumption_frequency_days.is_finite() || self.consumption_frequency_days <= 0.0
        {
            return Err(ForecastError::record(
                &self.name,
                format!(
                    "consumption frequency must be > 0 days (got {})",
                    self.consumption_frequency_days
                ),
            ));
        }
        Ok(())
    }

    /// Average of the current and future endpoints, spread over one cycle.
    pub fn daily_demand(&self) -> f64 {
        (self.current_units + self.future_units) / (2.0 * self.consumption_frequency_days)
    }
}

/// Validates a whole batch. The first bad record rejects the batch.
pub fn validate_records(records: &[CustomerDemandRecord]) -> Result<()> {
    records.iter().try_for_each(CustomerDemandRecord::validate)
}
