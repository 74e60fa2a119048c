// src/simulation/engine.rs

use crate::error::{ensure_finite, ForecastError, Result};
use crate::model::review::ReviewPolicy;
use crate::strategy::traits::ReplenishmentTrigger;
use serde::Serialize;
use tracing::debug;

/// Longest projection accepted, about a century of days.
pub const MAX_HORIZON_DAYS: u32 = 36_500;

/// One recorded day of the projection. Serialize so it can go straight to CSV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationPoint {
    pub day: u32,
    pub inventory_level: f64,
    pub reorder_point_line: f64,
}

/// Projected series plus the counters derived while stepping it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    pub trigger: &'static str,
    pub points: Vec<SimulationPoint>,
    /// Days whose running level was below zero when recorded.
    pub stockout_days: u32,
    /// Days on which a replenishment was received.
    pub replenishment_days: Vec<u32>,
}

pub struct InventorySimulation<'a> {
    daily_demand: f64,
    reorder_point: f64,
    order_quantity: f64,
    review: &'a ReviewPolicy,
    trigger: &'a dyn ReplenishmentTrigger,

    // Running level; may go negative (backlog) between replenishments
    level: f64,
    current_day: u32,
    run: SimulationRun,
}

impl<'a> InventorySimulation<'a> {
    /// Starts immediately after a replenishment, at `reorder_point + order_quantity`.
    pub fn new(
        daily_demand: f64,
        reorder_point: f64,
        order_quantity: f64,
        review: &'a ReviewPolicy,
        trigger: &'a dyn ReplenishmentTrigger,
    ) -> Result<Self> {
        review.validate()?;
        let daily_demand = ensure_finite("daily_demand", daily_demand)?;
        let reorder_point = ensure_finite("reorder_point", reorder_point)?;
        let order_quantity = ensure_finite("order_quantity", order_quantity)?;

        Ok(Self {
            daily_demand,
            reorder_point,
            order_quantity,
            review,
            trigger,
            level: reorder_point + order_quantity,
            current_day: 0,
            run: SimulationRun {
                trigger: trigger.name(),
                points: Vec::new(),
                stockout_days: 0,
                replenishment_days: Vec::new(),
            },
        })
    }

    /// Steps days `0..=horizon_days` and returns the recorded run.
    pub fn run(mut self, horizon_days: u32) -> SimulationRun {
        self.run
            .points
            .reserve(horizon_days.min(MAX_HORIZON_DAYS) as usize + 1);
        while self.current_day <= horizon_days {
            self.step();
            // Avoid wrapping when horizon_days == u32::MAX
            match self.current_day.checked_add(1) {
                Some(next) => self.current_day = next,
                None => break,
            }
        }

        debug!(
            trigger = self.run.trigger,
            days = self.run.points.len(),
            stockout_days = self.run.stockout_days,
            replenishments = self.run.replenishment_days.len(),
            "simulation finished"
        );
        self.run
    }

    fn step(&mut self) {
        let day = self.current_day;

        // 1. Replenishment check, before the day is recorded
        if self.trigger.should_replenish(
            day,
            self.level,
            self.reorder_point,
            self.review.period_days,
        ) {
            let ceiling = self.reorder_point + self.order_quantity;
            self.level = (self.level + self.order_quantity).min(ceiling);
            self.run.replenishment_days.push(day);
        }

        // 2. Record, floored at zero
        if self.level < 0.0 {
            self.run.stockout_days += 1;
        }
        self.run.points.push(SimulationPoint {
            day,
            inventory_level: if self.level > 0.0 {
                self.level.round()
            } else {
                0.0
            },
            reorder_point_line: self.reorder_point,
        });

        // 3. Consume
        self.level -= self.daily_demand;
    }
}

/// Projects on-hand inventory for `horizon_days + 1` days.
///
/// Each day first checks for a replenishment (capped at
/// `reorder_point + order_quantity`), then records the level floored at zero,
/// then consumes one day of demand.
///
/// # Arguments
/// * `daily_demand` - Units consumed per day.
/// * `reorder_point` - Level drawn as the reorder line and used by level triggers.
/// * `order_quantity` - Units received per replenishment.
/// * `review` - Cadence on which replenishments may land.
/// * `trigger` - Rule deciding whether a review orders.
/// * `horizon_days` - Last simulated day, at most [`MAX_HORIZON_DAYS`].
///
/// # Returns
/// The recorded series (days `0..=horizon_days`) with stockout and
/// replenishment counters.
pub fn simulate(
    daily_demand: f64,
    reorder_point: f64,
    order_quantity: f64,
    review: &ReviewPolicy,
    trigger: &dyn ReplenishmentTrigger,
    horizon_days: u32,
) -> Result<SimulationRun> {
    if horizon_days > MAX_HORIZON_DAYS {
        return Err(ForecastError::config(
            "horizon_days",
            format!("must be <= {} (got {})", MAX_HORIZON_DAYS, horizon_days),
        ));
    }
    Ok(
        InventorySimulation::new(daily_demand, reorder_point, order_quantity, review, trigger)?
            .run(horizon_days),
    )
}
