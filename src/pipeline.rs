// src/pipeline.rs

//! Explicit recomputation entry point.
//!
//! Callers invoke [`recompute`] whenever any input changes; nothing is cached
//! and nothing is updated incrementally.

use crate::error::Result;
use crate::forecast::demand::{compute_demand, DemandSummary};
use crate::forecast::lead_time::{aggregate_lead_time, LeadTime};
use crate::model::records::CustomerDemandRecord;
use crate::model::review::ReviewPolicy;
use crate::model::supply_chain::SupplyChainModel;
use crate::simulation::config::ForecastConfig;
use crate::simulation::engine::{simulate, SimulationRun};
use crate::simulation::kpi::{compute_kpis, KpiSummary};
use crate::simulation::scenario::{apply_scenario, ScenarioParams};
use crate::simulation::timeline::{build_timeline, TimelineTask};
use crate::strategy::optimization::{compute_policy, ReorderPolicy};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{info, warn};

/// Everything the engine reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastInputs {
    pub records: Vec<CustomerDemandRecord>,
    pub supply_chain: SupplyChainModel,
    pub review: ReviewPolicy,
    pub scenario: Option<ScenarioParams>,
}

/// Headline figures of one forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastResult {
    pub annual_demand: f64,
    pub daily_demand: f64,
    pub total_lead_time_days: f64,
    pub reorder_point: u64,
    pub order_quantity: u64,
    pub average_inventory: f64,
    pub days_of_supply: Option<f64>,
}

/// Non-fatal findings raised while computing a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ComputationFlag {
    NegativeReorderPointClamped { raw: f64 },
    LowConfidenceServiceLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub result: ForecastResult,
    pub demand: DemandSummary,
    pub lead_time: LeadTime,
    pub policy: ReorderPolicy,
    pub kpis: KpiSummary,
    pub simulation: SimulationRun,
    pub timeline: Vec<TimelineTask>,
    pub flags: Vec<ComputationFlag>,
}

/// Runs the full chain: scenario, demand, lead time, policy, simulation, KPIs.
pub fn recompute(inputs: &ForecastInputs, config: &ForecastConfig) -> Result<ForecastReport> {
    config.validate()?;
    inputs.review.validate()?;

    let (records, supply_chain): (Cow<[CustomerDemandRecord]>, Cow<SupplyChainModel>) =
        match &inputs.scenario {
            Some(params) => {
                let (records, model) =
                    apply_scenario(&inputs.records, &inputs.supply_chain, params)?;
                (Cow::Owned(records), Cow::Owned(model))
            }
            None => (
                Cow::Borrowed(inputs.records.as_slice()),
                Cow::Borrowed(&inputs.supply_chain),
            ),
        };

    let demand = compute_demand(&records)?;
    let lead_time = aggregate_lead_time(&supply_chain)?;
    let policy = compute_policy(&demand, &lead_time, &inputs.review, config)?;
    let kpis = compute_kpis(&demand, &policy, config)?;

    let trigger = config.trigger.build();
    let simulation = simulate(
        demand.daily_demand,
        policy.reorder_point as f64,
        policy.order_quantity as f64,
        &inputs.review,
        trigger.as_ref(),
        config.horizon_days,
    )?;

    let timeline = build_timeline(
        &records,
        &supply_chain,
        policy.order_quantity as f64,
        &config.production,
    )?;

    let mut flags = Vec::new();
    if let Some(raw) = policy.clamped_reorder_point {
        flags.push(ComputationFlag::NegativeReorderPointClamped { raw });
    }
    if kpis.service_level.low_confidence {
        warn!("safety buffer near zero; service level estimate is low confidence");
        flags.push(ComputationFlag::LowConfidenceServiceLevel);
    }

    info!(
        customers = records.len(),
        annual_demand = demand.annual_demand,
        reorder_point = policy.reorder_point,
        order_quantity = policy.order_quantity,
        basis = ?policy.safety_stock.basis,
        review = %inputs.review.label,
        "forecast recomputed"
    );

    Ok(ForecastReport {
        result: ForecastResult {
            annual_demand: demand.annual_demand,
            daily_demand: demand.daily_demand,
            total_lead_time_days: lead_time.total_days,
            reorder_point: policy.reorder_point,
            order_quantity: policy.order_quantity,
            average_inventory: kpis.average_inventory,
            days_of_supply: kpis.days_of_supply,
        },
        demand,
        lead_time,
        policy,
        kpis,
        simulation,
        timeline,
        flags,
    })
}

/// Evaluates several what-if scenarios against the same base inputs.
///
/// Each run is independent; one failing scenario does not affect the others.
pub fn run_scenarios(
    base: &ForecastInputs,
    scenarios: &[ScenarioParams],
    config: &ForecastConfig,
) -> Vec<Result<ForecastReport>> {
    scenarios
        .iter()
        .map(|params| {
            let inputs = ForecastInputs {
                scenario: Some(params.clone()),
                ..base.clone()
            };
            recompute(&inputs, config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    fn inputs() -> ForecastInputs {
        ForecastInputs {
            records: vec![
                CustomerDemandRecord::new("Acme", 300.0, 450.0, 30.0),
                CustomerDemandRecord::new("Globex", 70.0, 70.0, 7.0),
            ],
            supply_chain: SupplyChainModel::default_pipeline(),
            review: ReviewPolicy::monthly(),
            scenario: None,
        }
    }

    #[test]
    fn test_result_mirrors_components() {
        let report = recompute(&inputs(), &ForecastConfig::default()).unwrap();
        assert_eq!(report.result.reorder_point, report.policy.reorder_point);
        assert_eq!(report.result.total_lead_time_days, 44.0);
        assert_eq!(report.simulation.points.len(), 366);
        assert!(report.flags.is_empty());
    }

    #[test]
    fn test_scenario_failure_is_isolated() {
        let scenarios = vec![
            ScenarioParams {
                demand_delta_pct: 20.0,
                ..ScenarioParams::default()
            },
            ScenarioParams {
                consumption_rate_delta_pct: -150.0,
                ..ScenarioParams::default()
            },
            ScenarioParams::default(),
        ];
        let config = ForecastConfig::default();
        let results = run_scenarios(&inputs(), &scenarios, &config);

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ForecastError::InvalidScenario(_))));
        let baseline = recompute(&inputs(), &config).unwrap();
        assert_eq!(results[2].as_ref().unwrap(), &baseline);
    }

    #[test]
    fn test_zero_demand_raises_low_confidence_flag() {
        let inputs = ForecastInputs {
            records: Vec::new(),
            ..inputs()
        };
        let report = recompute(&inputs, &ForecastConfig::default()).unwrap();
        assert_eq!(report.result.reorder_point, 0);
        assert_eq!(report.flags, vec![ComputationFlag::LowConfidenceServiceLevel]);
    }
}
