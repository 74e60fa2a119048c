// src/strategy/optimization.rs

//! Reorder-point, safety-stock and order-quantity calculations.

use crate::error::{ensure_finite, ForecastError, Result};
use crate::forecast::demand::DemandSummary;
use crate::forecast::lead_time::LeadTime;
use crate::model::review::ReviewPolicy;
use crate::simulation::config::ForecastConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How the safety stock is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStockMode {
    /// Statistical when the supply chain carries variance data, fixed horizon otherwise.
    #[default]
    Auto,
    Statistical,
    FixedHorizon,
}

/// The formula that actually produced a safety stock figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStockBasis {
    /// `z * sqrt(d^2 * var_L + L^2 * (d * cv)^2)`
    Statistical,
    /// `d * fallback_safety_days`
    FixedHorizon,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafetyStock {
    pub units: f64,
    pub basis: SafetyStockBasis,
}

/// Reorder policy derived from demand, lead time and review cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReorderPolicy {
    pub lead_time_demand: f64,
    pub safety_stock: SafetyStock,
    pub reorder_point: u64,
    pub order_quantity: u64,
    /// Raw value when the reorder point formula went negative and was clamped to 0.
    pub clamped_reorder_point: Option<f64>,
}

/// Approximate inverse CDF of the standard normal distribution.
///
/// Abramowitz and Stegun 26.2.23, absolute error below 4.5e-4.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p >= 1.0 {
        return 5.0;
    }
    if p <= 0.0 {
        return -5.0;
    }
    if p == 0.5 {
        return 0.0;
    }

    // Valid for 0 < q <= 0.5; mirror for the upper half
    let q = if p < 0.5 { p } else { 1.0 - p };
    let t = (-2.0 * q.ln()).sqrt();

    let (c0, c1, c2) = (2.515517, 0.802853, 0.010328);
    let (d1, d2, d3) = (1.432788, 0.189269, 0.001308);

    let numerator = c0 + c1 * t + c2 * t * t;
    let denominator = 1.0 + d1 * t + d2 * t * t + d3 * t * t * t;
    let x = t - numerator / denominator;

    if p < 0.5 {
        -x
    } else {
        x
    }
}

/// Sizes the safety stock for the configured mode.
///
/// # Formula
/// Statistical: `z * sqrt(d^2 * var_L + L^2 * (d * cv)^2)`
/// Fixed horizon: `d * fallback_safety_days`
///
/// # Arguments
/// * `daily_demand` - Mean demand per day (d).
/// * `lead_time` - Total lead time (L) and its summed variance (var_L).
/// * `config` - Mode, z-score, demand coefficient of variation (cv) and fallback days.
///
/// # Returns
/// The buffer in units, tagged with the formula that produced it.
pub fn safety_stock(
    daily_demand: f64,
    lead_time: &LeadTime,
    config: &ForecastConfig,
) -> Result<SafetyStock> {
    let basis = match config.safety_stock_mode {
        SafetyStockMode::Statistical => SafetyStockBasis::Statistical,
        SafetyStockMode::FixedHorizon => SafetyStockBasis::FixedHorizon,
        SafetyStockMode::Auto if lead_time.has_variance() => SafetyStockBasis::Statistical,
        SafetyStockMode::Auto => SafetyStockBasis::FixedHorizon,
    };

    let units = match basis {
        SafetyStockBasis::Statistical => {
            let z = config.effective_z_score()?;
            let demand_sigma = daily_demand * config.demand_variance_factor;
            z * (daily_demand.powi(2) * lead_time.total_variance
                + lead_time.total_days.powi(2) * demand_sigma.powi(2))
            .sqrt()
        }
        SafetyStockBasis::FixedHorizon => daily_demand * config.fallback_safety_days,
    };

    Ok(SafetyStock {
        units: ensure_finite("safety_stock", units)?,
        basis,
    })
}

/// Reorder point, safety stock and order quantity for one review cadence.
///
/// The order quantity is the expected consumption over one review period
/// (order-up-to sizing), not an EOQ.
///
/// # Formula
/// Reorder Point = round(d * L + SafetyStock), clamped at 0
/// Order Quantity = round(d * ReviewPeriod)
///
/// # Arguments
/// * `demand` - Aggregated daily/annual demand.
/// * `lead_time` - Aggregated supply-chain lead time.
/// * `review` - Review cadence; its period sizes the order.
/// * `config` - Safety-stock mode and service-level constants.
///
/// # Returns
/// The policy, with the raw value kept when the reorder point had to be clamped.
pub fn compute_policy(
    demand: &DemandSummary,
    lead_time: &LeadTime,
    review: &ReviewPolicy,
    config: &ForecastConfig,
) -> Result<ReorderPolicy> {
    review.validate()?;
    let daily_demand = ensure_finite("daily_demand", demand.daily_demand)?;

    let lead_time_demand = daily_demand * lead_time.total_days;
    let safety_stock = safety_stock(daily_demand, lead_time, config)?;

    let raw_reorder_point = ensure_finite(
        "reorder_point",
        (lead_time_demand + safety_stock.units).round(),
    )?;
    let clamped_reorder_point = if raw_reorder_point < 0.0 {
        warn!(raw_reorder_point, "negative reorder point clamped to 0");
        Some(raw_reorder_point)
    } else {
        None
    };

    let order_quantity = (daily_demand * review.period_days as f64).round().max(0.0);

    debug!(
        lead_time_demand,
        safety_stock = safety_stock.units,
        basis = ?safety_stock.basis,
        reorder_point = raw_reorder_point.max(0.0),
        order_quantity,
        "computed reorder policy"
    );

    Ok(ReorderPolicy {
        lead_time_demand,
        safety_stock,
        reorder_point: raw_reorder_point.max(0.0) as u64,
        order_quantity: order_quantity as u64,
        clamped_reorder_point,
    })
}

/// Classic EOQ: `sqrt(2 * D * S / H)`.
///
/// Separate from [`compute_policy`]'s order quantity; only meaningful with a
/// fixed per-order cost.
pub fn economic_order_quantity(
    annual_demand: f64,
    order_cost: f64,
    holding_cost_per_unit_year: f64,
) -> Result<f64> {
    if !order_cost.is_finite() || order_cost < 0.0 {
        return Err(ForecastError::config(
            "order_cost",
            format!("must be >= 0 (got {})", order_cost),
        ));
    }
    if !holding_cost_per_unit_year.is_finite() || holding_cost_per_unit_year <= 0.0 {
        return Err(ForecastError::config(
            "holding_cost_per_unit_year",
            format!("must be > 0 for EOQ (got {})", holding_cost_per_unit_year),
        ));
    }
    ensure_finite(
        "economic_order_quantity",
        (2.0 * annual_demand.max(0.0) * order_cost / holding_cost_per_unit_year).sqrt(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(daily: f64) -> DemandSummary {
        DemandSummary {
            daily_demand: daily,
            annual_demand: daily * 365.0,
        }
    }

    fn lead(days: f64, variance: f64) -> LeadTime {
        LeadTime {
            total_days: days,
            total_variance: variance,
        }
    }

    #[test]
    fn test_inverse_normal_cdf_landmarks() {
        assert_eq!(inverse_normal_cdf(0.5), 0.0);
        assert!((inverse_normal_cdf(0.95) - 1.645).abs() < 1e-3);
        assert!((inverse_normal_cdf(0.05) + 1.645).abs() < 1e-3);
        assert_eq!(inverse_normal_cdf(1.0), 5.0);
    }

    #[test]
    fn test_fixed_horizon_reference_case() {
        let config = ForecastConfig::default();
        let policy = compute_policy(
            &demand(100.0 / 30.0),
            &lead(40.0, 0.0),
            &ReviewPolicy::monthly(),
            &config,
        )
        .unwrap();

        assert_eq!(policy.safety_stock.basis, SafetyStockBasis::FixedHorizon);
        assert!((policy.lead_time_demand - 133.333_333).abs() < 1e-5);
        assert!((policy.safety_stock.units - 23.333_333).abs() < 1e-5);
        assert_eq!(policy.reorder_point, 157);
        assert_eq!(policy.order_quantity, 100);
        assert!(policy.clamped_reorder_point.is_none());
    }

    #[test]
    fn test_auto_mode_uses_statistical_with_variance() {
        let config = ForecastConfig::default();
        let daily = 10.0;
        let lt = lead(44.0, 0.65);
        let stock = safety_stock(daily, &lt, &config).unwrap();

        let expected = 1.65 * (100.0 * 0.65 + 44.0f64.powi(2) * 1.0f64.powi(2)).sqrt();
        assert_eq!(stock.basis, SafetyStockBasis::Statistical);
        assert!((stock.units - expected).abs() < 1e-9);
    }

    #[test]
    fn test_forced_statistical_without_variance() {
        let config = ForecastConfig {
            safety_stock_mode: SafetyStockMode::Statistical,
            ..ForecastConfig::default()
        };
        let stock = safety_stock(100.0 / 30.0, &lead(40.0, 0.0), &config).unwrap();
        // 1.65 * 40 * (3.333 * 0.1)
        assert!((stock.units - 22.0).abs() < 1e-9);
        assert_eq!(stock.basis, SafetyStockBasis::Statistical);
    }

    #[test]
    fn test_service_level_overrides_z_score() {
        let config = ForecastConfig {
            safety_stock_mode: SafetyStockMode::Statistical,
            service_level: Some(0.5),
            ..ForecastConfig::default()
        };
        let stock = safety_stock(10.0, &lead(10.0, 0.5), &config).unwrap();
        assert_eq!(stock.units, 0.0);
    }

    #[test]
    fn test_zero_demand_is_zero_policy() {
        let policy = compute_policy(
            &demand(0.0),
            &lead(44.0, 0.65),
            &ReviewPolicy::weekly(),
            &ForecastConfig::default(),
        )
        .unwrap();
        assert_eq!(policy.reorder_point, 0);
        assert_eq!(policy.order_quantity, 0);
    }

    #[test]
    fn test_negative_demand_clamps_reorder_point() {
        let config = ForecastConfig {
            safety_stock_mode: SafetyStockMode::FixedHorizon,
            ..ForecastConfig::default()
        };
        let policy =
            compute_policy(&demand(-2.0), &lead(10.0, 0.0), &ReviewPolicy::weekly(), &config)
                .unwrap();
        assert_eq!(policy.reorder_point, 0);
        assert_eq!(policy.order_quantity, 0);
        assert_eq!(policy.clamped_reorder_point, Some(-34.0));
    }

    #[test]
    fn test_non_finite_demand_is_invalid_computation() {
        let result = compute_policy(
            &demand(f64::INFINITY),
            &lead(10.0, 0.0),
            &ReviewPolicy::weekly(),
            &ForecastConfig::default(),
        );
        assert!(matches!(
            result,
            Err(ForecastError::InvalidComputation { .. })
        ));
    }

    #[test]
    fn test_economic_order_quantity() {
        // sqrt(2 * 1000 * 10 / 0.5) = 200
        assert!((economic_order_quantity(1000.0, 10.0, 0.5).unwrap() - 200.0).abs() < 1e-9);
        assert!(economic_order_quantity(1000.0, 10.0, 0.0).is_err());
        assert!(economic_order_quantity(1000.0, -1.0, 0.5).is_err());
    }
}
