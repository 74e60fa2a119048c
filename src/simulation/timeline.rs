// src/simulation/timeline.rs

use crate::error::Result;
use crate::model::records::{validate_records, CustomerDemandRecord};
use crate::model::supply_chain::SupplyChainModel;
use crate::simulation::config::ProductionThresholds;
use serde::Serialize;

const PLANNING_DAYS: f64 = 5.0;
const QUALITY_CONTROL_DAYS: f64 = 2.0;
const PACKAGING_DAYS: f64 = 2.0;
const PRODUCTION_STAGE: &str = "production";

/// One bar of the fulfilment schedule, in days from order placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineTask {
    pub name: String,
    pub start_day: f64,
    pub end_day: f64,
    pub depends_on: Option<String>,
}

impl TimelineTask {
    pub fn duration_days(&self) -> f64 {
        self.end_day - self.start_day
    }
}

/// Production time for the larger of current demand and the order size.
pub fn production_days(
    total_current_units: f64,
    order_quantity: f64,
    thresholds: &ProductionThresholds,
) -> f64 {
    let quantity = total_current_units.max(order_quantity);
    if quantity > thresholds.threshold2 {
        thresholds.threshold2_days
    } else if quantity > thresholds.threshold1 {
        thresholds.threshold1_days
    } else {
        thresholds.min_days
    }
}

/// Lays out the sequential fulfilment tasks for one order.
///
/// Planning, production, quality control and packaging come first; every
/// other supply-chain stage follows in model order.
pub fn build_timeline(
    records: &[CustomerDemandRecord],
    model: &SupplyChainModel,
    order_quantity: f64,
    thresholds: &ProductionThresholds,
) -> Result<Vec<TimelineTask>> {
    validate_records(records)?;
    model.validate()?;

    let total_current_units: f64 = records.iter().map(|r| r.current_units).sum();
    let production = production_days(total_current_units, order_quantity, thresholds);

    let mut durations = vec![
        ("Planning".to_string(), PLANNING_DAYS),
        ("Production".to_string(), production),
        ("Quality Control".to_string(), QUALITY_CONTROL_DAYS),
        ("Packaging".to_string(), PACKAGING_DAYS),
    ];
    durations.extend(
        model
            .stages()
            .iter()
            .filter(|s| s.stage_name != PRODUCTION_STAGE)
            .map(|s| (s.stage_name.clone(), s.mean_days)),
    );

    let mut tasks: Vec<TimelineTask> = Vec::with_capacity(durations.len());
    let mut cursor = 0.0;
    for (name, days) in durations {
        let depends_on = tasks.last().map(|t| t.name.clone());
        tasks.push(TimelineTask {
            name,
            start_day: cursor,
            end_day: cursor + days,
            depends_on,
        });
        cursor += days;
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_days_thresholds() {
        let t = ProductionThresholds::default();
        assert_eq!(production_days(1_000.0, 500.0, &t), 15.0);
        assert_eq!(production_days(15_000.0, 0.0, &t), 15.0);
        assert_eq!(production_days(100.0, 20_000.0, &t), 20.0);
        assert_eq!(production_days(40_001.0, 0.0, &t), 25.0);
    }

    #[test]
    fn test_default_pipeline_timeline() {
        let records = vec![CustomerDemandRecord::new("Acme", 500.0, 800.0, 30.0)];
        let tasks = build_timeline(
            &records,
            &SupplyChainModel::default_pipeline(),
            200.0,
            &ProductionThresholds::default(),
        )
        .unwrap();

        let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Planning",
                "Production",
                "Quality Control",
                "Packaging",
                "shipping",
                "customsClearance",
                "inventoryCheck"
            ]
        );
        assert_eq!(tasks[0].depends_on, None);
        assert_eq!(tasks[1].depends_on.as_deref(), Some("Planning"));
        assert_eq!(tasks[1].duration_days(), 15.0);
        // 5 + 15 + 2 + 2 + 25 + 2 + 2
        assert_eq!(tasks.last().unwrap().end_day, 53.0);
    }
}
