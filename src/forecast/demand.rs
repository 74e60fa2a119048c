// src/forecast/demand.rs

use crate::error::{ensure_finite, Result};
use crate::model::records::{validate_records, CustomerDemandRecord};
use crate::model::review::TimeFrame;
use serde::Serialize;
use tracing::debug;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Scalar demand figures for a batch of customers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DemandSummary {
    pub daily_demand: f64,
    pub annual_demand: f64,
}

/// Aggregates per-customer demand into daily and annual totals.
///
/// Each customer contributes `(current + future) / (2 * frequency)` units per
/// day. The whole batch is rejected if any record is invalid; an empty batch
/// yields zero demand.
pub fn compute_demand(records: &[CustomerDemandRecord]) -> Result<DemandSummary> {
    validate_records(records)?;

    let daily_demand: f64 = records.iter().map(CustomerDemandRecord::daily_demand).sum();
    let daily_demand = ensure_finite("daily_demand", daily_demand)?;

    debug!(
        customers = records.len(),
        daily_demand, "aggregated customer demand"
    );

    Ok(DemandSummary {
        daily_demand,
        annual_demand: daily_demand * DAYS_PER_YEAR,
    })
}

/// Total expected demand over one time frame. Rounding is left to the caller.
pub fn demand_over(records: &[CustomerDemandRecord], frame: TimeFrame) -> Result<f64> {
    let summary = compute_demand(records)?;
    Ok(summary.daily_demand * frame.days() as f64)
}

/// Per-customer demand over a time frame, split by endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerTrend {
    pub name: String,
    pub current: f64,
    pub future: f64,
}

/// Current vs. future demand for every customer over `frame`.
///
/// Customers without a name are labelled by their 1-based position.
pub fn demand_trend(records: &[CustomerDemandRecord], frame: TimeFrame) -> Result<Vec<CustomerTrend>> {
    validate_records(records)?;
    let days = frame.days() as f64;

    Ok(records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let name = if record.name.trim().is_empty() {
                format!("Customer {}", index + 1)
            } else {
                record.name.clone()
            };
            CustomerTrend {
                name,
                current: record.current_units / record.consumption_frequency_days * days,
                future: record.future_units / record.consumption_frequency_days * days,
            }
        })
        .collect())
}
