// src/strategy/implementations.rs

use crate::strategy::traits::ReplenishmentTrigger;

// =========================================================================
// 1. Level-Triggered Review
// =========================================================================

/// Reviews stock on every cadence boundary, but only orders when the level
/// has fallen to the reorder point or below.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelTriggered;

impl ReplenishmentTrigger for LevelTriggered {
    fn should_replenish(
        &self,
        day: u32,
        inventory_level: f64,
        reorder_point: f64,
        period_days: u32,
    ) -> bool {
        inventory_level <= reorder_point && day % period_days == 0
    }

    fn name(&self) -> &'static str {
        "level_triggered"
    }
}

// =========================================================================
// 2. Fixed-Cadence Review
// =========================================================================

/// Orders on every cadence boundary after day 0, whatever the stock level.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCadence;

impl ReplenishmentTrigger for FixedCadence {
    fn should_replenish(
        &self,
        day: u32,
        _inventory_level: f64,
        _reorder_point: f64,
        period_days: u32,
    ) -> bool {
        day > 0 && day % period_days == 0
    }

    fn name(&self) -> &'static str {
        "fixed_cadence"
    }
}
