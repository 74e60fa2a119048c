// src/simulation/config.rs

use crate::error::{ForecastError, Result};
use crate::model::review::ReviewPolicy;
use crate::model::supply_chain::SupplyChainModel;
use crate::simulation::engine::MAX_HORIZON_DAYS;
use crate::simulation::scenario::ScenarioParams;
use crate::strategy::implementations::{FixedCadence, LevelTriggered};
use crate::strategy::optimization::{inverse_normal_cdf, SafetyStockMode};
use crate::strategy::traits::ReplenishmentTrigger;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which replenishment rule the simulator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    #[default]
    LevelTriggered,
    FixedCadence,
}

impl TriggerKind {
    pub fn build(self) -> Box<dyn ReplenishmentTrigger> {
        match self {
            TriggerKind::LevelTriggered => Box::new(LevelTriggered),
            TriggerKind::FixedCadence => Box::new(FixedCadence),
        }
    }
}

/// Order-size thresholds that stretch the production stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionThresholds {
    pub min_days: f64,
    pub threshold1: f64,
    pub threshold2: f64,
    pub threshold1_days: f64,
    pub threshold2_days: f64,
}

impl Default for ProductionThresholds {
    fn default() -> Self {
        Self {
            min_days: 15.0,
            threshold1: 15_000.0,
            threshold2: 40_000.0,
            threshold1_days: 20.0,
            threshold2_days: 25.0,
        }
    }
}

/// Engine constants. Every field has a default so partial JSON documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub horizon_days: u32,
    /// Service-level z-score; 1.65 is roughly the 95th percentile.
    pub z_score: f64,
    /// Target probability of not stocking out. Overrides `z_score` when set.
    pub service_level: Option<f64>,
    /// Assumed coefficient of variation on daily demand.
    pub demand_variance_factor: f64,
    /// Days of demand held as safety stock when no variance data is used.
    pub fallback_safety_days: f64,
    pub safety_stock_mode: SafetyStockMode,
    pub trigger: TriggerKind,
    pub holding_cost_per_unit_year: f64,
    /// Fixed cost per order. Enables the EOQ figure.
    pub order_cost: Option<f64>,
    pub production: ProductionThresholds,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 365,
            z_score: 1.65,
            service_level: None,
            demand_variance_factor: 0.1,
            fallback_safety_days: 7.0,
            safety_stock_mode: SafetyStockMode::Auto,
            trigger: TriggerKind::LevelTriggered,
            holding_cost_per_unit_year: 0.05,
            order_cost: None,
            production: ProductionThresholds::default(),
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ForecastError::config(
                "horizon_days",
                format!("must be <= {} (got {})", MAX_HORIZON_DAYS, self.horizon_days),
            ));
        }
        if !self.z_score.is_finite() || self.z_score < 0.0 {
            return Err(ForecastError::config("z_score", "must be a finite value >= 0"));
        }
        if let Some(p) = self.service_level {
            if !(p > 0.0 && p < 1.0) {
                return Err(ForecastError::config(
                    "service_level",
                    format!("must lie strictly between 0 and 1 (got {})", p),
                ));
            }
        }
        if !self.demand_variance_factor.is_finite() || self.demand_variance_factor < 0.0 {
            return Err(ForecastError::config("demand_variance_factor", "must be >= 0"));
        }
        if !self.fallback_safety_days.is_finite() || self.fallback_safety_days < 0.0 {
            return Err(ForecastError::config("fallback_safety_days", "must be >= 0"));
        }
        if !self.holding_cost_per_unit_year.is_finite() || self.holding_cost_per_unit_year < 0.0 {
            return Err(ForecastError::config("holding_cost_per_unit_year", "must be >= 0"));
        }
        Ok(())
    }

    /// The z-score in force: derived from `service_level` when one is set.
    pub fn effective_z_score(&self) -> Result<f64> {
        self.validate()?;
        Ok(match self.service_level {
            Some(p) => inverse_normal_cdf(p),
            None => self.z_score,
        })
    }
}

/// Which review cadence a setup document selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewSelection {
    /// A catalog label such as `"Monthly"`.
    Named(String),
    Custom(ReviewPolicy),
}

impl ReviewSelection {
    pub fn resolve(&self) -> Result<ReviewPolicy> {
        match self {
            ReviewSelection::Named(label) => ReviewPolicy::from_label(label).ok_or_else(|| {
                ForecastError::config("review_policy", format!("unknown cadence '{}'", label))
            }),
            ReviewSelection::Custom(policy) => {
                policy.validate()?;
                Ok(policy.clone())
            }
        }
    }
}

/// Static configuration a caller supplies next to the customer records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSetup {
    pub supply_chain: SupplyChainModel,
    pub review_policy: ReviewSelection,
    pub scenario: Option<ScenarioParams>,
    pub forecast: ForecastConfig,
}

impl Default for EngineSetup {
    fn default() -> Self {
        Self {
            supply_chain: SupplyChainModel::default_pipeline(),
            review_policy: ReviewSelection::Named("Monthly".to_string()),
            scenario: None,
            forecast: ForecastConfig::default(),
        }
    }
}

impl EngineSetup {
    pub fn from_json(json: &str) -> Result<Self> {
        let setup: EngineSetup = serde_json::from_str(json)?;
        setup.supply_chain.validate()?;
        setup.forecast.validate()?;
        setup.review_policy.resolve()?;
        Ok(setup)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
