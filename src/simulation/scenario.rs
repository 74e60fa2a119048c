// src/simulation/scenario.rs

use crate::error::{ForecastError, Result};
use crate::model::records::{validate_records, CustomerDemandRecord};
use crate::model::supply_chain::SupplyChainModel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What-if perturbations, all in percent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParams {
    /// Scales every customer's future units.
    pub demand_delta_pct: f64,
    /// Scales the mean days of `target_stage` only.
    pub lead_time_delta_pct: f64,
    pub target_stage: Option<String>,
    /// Positive means consumption happens more often (shorter cycle).
    pub consumption_rate_delta_pct: f64,
}

impl ScenarioParams {
    fn factor(pct: f64) -> f64 {
        1.0 + pct / 100.0
    }
}

/// Applies a scenario to copies of the inputs. The originals are only borrowed.
pub fn apply_scenario(
    records: &[CustomerDemandRecord],
    model: &SupplyChainModel,
    params: &ScenarioParams,
) -> Result<(Vec<CustomerDemandRecord>, SupplyChainModel)> {
    validate_records(records)?;
    model.validate()?;

    let demand_factor = ScenarioParams::factor(params.demand_delta_pct);
    if !demand_factor.is_finite() || demand_factor < 0.0 {
        return Err(ForecastError::InvalidScenario(format!(
            "demand adjustment of {}% makes future units negative",
            params.demand_delta_pct
        )));
    }

    let rate_factor = ScenarioParams::factor(params.consumption_rate_delta_pct);
    if !rate_factor.is_finite() || rate_factor <= 0.0 {
        return Err(ForecastError::InvalidScenario(format!(
            "consumption rate adjustment of {}% drives consumption frequency to <= 0",
            params.consumption_rate_delta_pct
        )));
    }

    let adjusted_records = records
        .iter()
        .map(|record| {
            let consumption_frequency_days = record.consumption_frequency_days / rate_factor;
            if !consumption_frequency_days.is_finite() || consumption_frequency_days <= 0.0 {
                return Err(ForecastError::InvalidScenario(format!(
                    "consumption frequency of '{}' becomes {}",
                    record.name, consumption_frequency_days
                )));
            }
            Ok(CustomerDemandRecord {
                future_units: record.future_units * demand_factor,
                consumption_frequency_days,
                ..record.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut adjusted_model = model.clone();
    if let Some(target) = &params.target_stage {
        let lead_factor = ScenarioParams::factor(params.lead_time_delta_pct);
        if !lead_factor.is_finite() || lead_factor < 0.0 {
            return Err(ForecastError::InvalidScenario(format!(
                "lead time adjustment of {}% makes '{}' negative",
                params.lead_time_delta_pct, target
            )));
        }
        let stage = adjusted_model.stage_mut(target).ok_or_else(|| {
            ForecastError::InvalidScenario(format!("unknown supply stage '{}'", target))
        })?;
        stage.mean_days *= lead_factor;
    } else if params.lead_time_delta_pct != 0.0 {
        return Err(ForecastError::InvalidScenario(
            "lead time adjustment needs a target stage".to_string(),
        ));
    }

    debug!(?params, customers = adjusted_records.len(), "applied scenario");
    Ok((adjusted_records, adjusted_model))
}
