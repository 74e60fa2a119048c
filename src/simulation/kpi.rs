// src/simulation/kpi.rs

use crate::error::{ensure_finite, Result};
use crate::forecast::demand::{DemandSummary, DAYS_PER_YEAR};
use crate::simulation::config::ForecastConfig;
use crate::strategy::optimization::{economic_order_quantity, ReorderPolicy};
use serde::Serialize;

/// Smallest safety buffer the service-level ratio divides by.
pub const SERVICE_LEVEL_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceLevelEstimate {
    /// Daily demand per unit of buffer above lead-time demand.
    pub ratio: f64,
    /// Set when the buffer was at or near zero and had to be clamped.
    pub low_confidence: bool,
}

/// Dashboard KPIs derived from a reorder policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiSummary {
    pub average_inventory: f64,
    /// `None` when nothing is held on average.
    pub turnover_ratio: Option<f64>,
    pub holding_cost: f64,
    /// `None` when there is no demand to cover.
    pub days_of_supply: Option<f64>,
    pub service_level: ServiceLevelEstimate,
    pub z_score: f64,
    pub target_service_level: Option<f64>,
    /// Only present when a per-order cost is configured.
    pub economic_order_quantity: Option<f64>,
}

/// Half a cycle's order plus the safety buffer.
pub fn average_inventory(policy: &ReorderPolicy) -> f64 {
    policy.order_quantity as f64 / 2.0 + policy.safety_stock.units
}

pub fn service_level(daily_demand: f64, policy: &ReorderPolicy) -> ServiceLevelEstimate {
    let buffer = policy.reorder_point as f64 - policy.lead_time_demand;
    ServiceLevelEstimate {
        ratio: daily_demand / buffer.max(SERVICE_LEVEL_EPSILON),
        low_confidence: buffer < SERVICE_LEVEL_EPSILON,
    }
}

pub fn compute_kpis(
    demand: &DemandSummary,
    policy: &ReorderPolicy,
    config: &ForecastConfig,
) -> Result<KpiSummary> {
    let average_inventory = ensure_finite("average_inventory", average_inventory(policy))?;

    let turnover_ratio =
        (average_inventory > 0.0).then(|| demand.annual_demand / average_inventory);
    let days_of_supply = (demand.annual_demand > 0.0)
        .then(|| average_inventory / demand.annual_demand * DAYS_PER_YEAR);

    let economic_order_quantity = config
        .order_cost
        .map(|cost| {
            economic_order_quantity(demand.annual_demand, cost, config.holding_cost_per_unit_year)
        })
        .transpose()?;

    Ok(KpiSummary {
        average_inventory,
        turnover_ratio,
        holding_cost: average_inventory * config.holding_cost_per_unit_year,
        days_of_supply,
        service_level: service_level(demand.daily_demand, policy),
        z_score: config.effective_z_score()?,
        target_service_level: config.service_level,
        economic_order_quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::optimization::{SafetyStock, SafetyStockBasis};

    fn policy(reorder_point: u64, order_quantity: u64, ltd: f64, safety: f64) -> ReorderPolicy {
        ReorderPolicy {
            lead_time_demand: ltd,
            safety_stock: SafetyStock {
                units: safety,
                basis: SafetyStockBasis::FixedHorizon,
            },
            reorder_point,
            order_quantity,
            clamped_reorder_point: None,
        }
    }

    #[test]
    fn test_reference_kpis() {
        let demand = DemandSummary {
            daily_demand: 10.0,
            annual_demand: 3650.0,
        };
        let p = policy(470, 300, 400.0, 70.0);
        let kpis = compute_kpis(&demand, &p, &ForecastConfig::default()).unwrap();

        assert_eq!(kpis.average_inventory, 220.0);
        assert!((kpis.turnover_ratio.unwrap() - 3650.0 / 220.0).abs() < 1e-9);
        assert!((kpis.holding_cost - 11.0).abs() < 1e-9);
        assert!((kpis.days_of_supply.unwrap() - 22.0).abs() < 1e-9);
        assert!((kpis.service_level.ratio - 10.0 / 70.0).abs() < 1e-9);
        assert!(!kpis.service_level.low_confidence);
        assert!(kpis.economic_order_quantity.is_none());
    }

    #[test]
    fn test_zero_buffer_is_low_confidence() {
        let estimate = service_level(5.0, &policy(100, 50, 100.0, 0.0));
        assert!(estimate.low_confidence);
        assert!(estimate.ratio.is_finite());
    }

    #[test]
    fn test_no_demand_leaves_ratios_undefined() {
        let kpis = compute_kpis(
            &DemandSummary::default(),
            &policy(0, 0, 0.0, 0.0),
            &ForecastConfig::default(),
        )
        .unwrap();
        assert_eq!(kpis.average_inventory, 0.0);
        assert!(kpis.turnover_ratio.is_none());
        assert!(kpis.days_of_supply.is_none());
    }

    #[test]
    fn test_eoq_reported_when_order_cost_set() {
        let config = ForecastConfig {
            order_cost: Some(10.0),
            holding_cost_per_unit_year: 0.5,
            ..ForecastConfig::default()
        };
        let demand = DemandSummary {
            daily_demand: 1000.0 / 365.0,
            annual_demand: 1000.0,
        };
        let kpis = compute_kpis(&demand, &policy(10, 10, 5.0, 5.0), &config).unwrap();
        assert!((kpis.economic_order_quantity.unwrap() - 200.0).abs() < 1e-9);
    }
}
