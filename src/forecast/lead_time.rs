// src/forecast/lead_time.rs

use crate::error::Result;
use crate::model::supply_chain::SupplyChainModel;
use serde::Serialize;

/// Total lead time across sequential, independent stages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LeadTime {
    pub total_days: f64,
    pub total_variance: f64,
}

impl LeadTime {
    /// True when at least one stage carries variability.
    pub fn has_variance(&self) -> bool {
        self.total_variance > 0.0
    }
}

/// Sums stage means, and the squares of the stage variances.
pub fn aggregate_lead_time(model: &SupplyChainModel) -> Result<LeadTime> {
    model.validate()?;

    Ok(model
        .stages()
        .iter()
        .fold(LeadTime::default(), |acc, stage| LeadTime {
            total_days: acc.total_days + stage.mean_days,
            total_variance: acc.total_variance + stage.relative_variance.powi(2),
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::supply_chain::SupplyStageConfig;

    #[test]
    fn test_default_pipeline_totals() {
        let lead_time = aggregate_lead_time(&SupplyChainModel::default_pipeline()).unwrap();
        assert_eq!(lead_time.total_days, 44.0);
        // 0.04 + 0.09 + 0.36 + 0.16
        assert!((lead_time.total_variance - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_aggregation_is_additive() {
        let a = SupplyStageConfig::new("production", 15.0, 0.2);
        let b = SupplyStageConfig::new("shipping", 25.0, 0.3);
        let c = SupplyStageConfig::new("customs", 2.0, 0.6);

        let ab = SupplyChainModel::new(vec![a.clone(), b.clone()]).unwrap();
        let abc = SupplyChainModel::new(vec![a, b, c.clone()]).unwrap();

        let lt_ab = aggregate_lead_time(&ab).unwrap();
        let lt_abc = aggregate_lead_time(&abc).unwrap();
        assert_eq!(lt_abc.total_days, lt_ab.total_days + c.mean_days);
    }

    #[test]
    fn test_instantaneous_stage_contributes_only_variance() {
        let model = SupplyChainModel::new(vec![SupplyStageConfig::new("check", 0.0, 0.5)]).unwrap();
        let lead_time = aggregate_lead_time(&model).unwrap();
        assert_eq!(lead_time.total_days, 0.0);
        assert_eq!(lead_time.total_variance, 0.25);
        assert!(lead_time.has_variance());
    }

    #[test]
    fn test_empty_model_is_zero() {
        let lead_time = aggregate_lead_time(&SupplyChainModel::default()).unwrap();
        assert_eq!(lead_time, LeadTime::default());
        assert!(!lead_time.has_variance());
    }
}
