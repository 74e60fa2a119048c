// src/strategy/traits.rs

use std::fmt::Debug;

/// Decides whether a replenishment lands on a given simulated day.
///
/// `Send + Sync` so independent scenario runs can share a trigger across threads.
pub trait ReplenishmentTrigger: Debug + Send + Sync {
    /// # Arguments
    /// * `day` - Simulated day, starting at 0.
    /// * `inventory_level` - Running on-hand level before the day's check (may be negative).
    /// * `reorder_point` - Level at or below which stock should be reordered.
    /// * `period_days` - Review cadence in days (> 0).
    fn should_replenish(
        &self,
        day: u32,
        inventory_level: f64,
        reorder_point: f64,
        period_days: u32,
    ) -> bool;

    /// Short name recorded alongside simulation output.
    fn name(&self) -> &'static str;
}
