// src/model/supply_chain.rs

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Lead-time parameters of one pipeline stage (production, shipping, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyStageConfig {
    pub stage_name: String,
    pub mean_days: f64,
    #[serde(default)]
    pub relative_variance: f64,
}

impl SupplyStageConfig {
    pub fn new(stage_name: impl Into<String>, mean_days: f64, relative_variance: f64) -> Self {
        Self {
            stage_name: stage_name.into(),
            mean_days,
            relative_variance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mean_days.is_finite() || self.mean_days < 0.0 {
            return Err(ForecastError::config(
                &self.stage_name,
                format!("mean days must be >= 0 (got {})", self.mean_days),
            ));
        }
        if !self.relative_variance.is_finite() || self.relative_variance < 0.0 {
            return Err(ForecastError::config(
                &self.stage_name,
                format!(
                    "relative variance must be >= 0 (got {})",
                    self.relative_variance
                ),
            ));
        }
        Ok(())
    }
}

/// Ordered set of stages, keyed by stage name.
///
/// Order only matters for display; aggregation is order-independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplyChainModel {
    stages: Vec<SupplyStageConfig>,
}

impl SupplyChainModel {
    /// Builds a model, rejecting duplicate names and out-of-domain stages.
    pub fn new(stages: Vec<SupplyStageConfig>) -> Result<Self> {
        let model = Self { stages };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, stage) in self.stages.iter().enumerate() {
            stage.validate()?;
            if self.stages[..i]
                .iter()
                .any(|other| other.stage_name == stage.stage_name)
            {
                return Err(ForecastError::config(
                    &stage.stage_name,
                    "duplicate stage name",
                ));
            }
        }
        Ok(())
    }

    /// The dashboard's four-stage pipeline.
    pub fn default_pipeline() -> Self {
        Self {
            stages: vec![
                SupplyStageConfig::new("production", 15.0, 0.2),
                SupplyStageConfig::new("shipping", 25.0, 0.3),
                SupplyStageConfig::new("customsClearance", 2.0, 0.6),
                SupplyStageConfig::new("inventoryCheck", 2.0, 0.4),
            ],
        }
    }

    pub fn stages(&self) -> &[SupplyStageConfig] {
        &self.stages
    }

    pub fn stage(&self, name: &str) -> Option<&SupplyStageConfig> {
        self.stages.iter().find(|s| s.stage_name == name)
    }

    pub(crate) fn stage_mut(&mut self, name: &str) -> Option<&mut SupplyStageConfig> {
        self.stages.iter_mut().find(|s| s.stage_name == name)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_stage_names_are_rejected() {
        let result = SupplyChainModel::new(vec![
            SupplyStageConfig::new("shipping", 10.0, 0.0),
            SupplyStageConfig::new("shipping", 5.0, 0.0),
        ]);
        assert!(matches!(
            result,
            Err(ForecastError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_negative_stage_figures_are_rejected() {
        assert!(SupplyStageConfig::new("a", -1.0, 0.0).validate().is_err());
        assert!(SupplyStageConfig::new("a", 1.0, -0.1).validate().is_err());
        assert!(SupplyStageConfig::new("a", 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_stage_lookup_by_name() {
        let model = SupplyChainModel::default_pipeline();
        assert_eq!(model.len(), 4);
        assert_eq!(model.stage("shipping").map(|s| s.mean_days), Some(25.0));
        assert!(model.stage("warehousing").is_none());
    }

    #[test]
    fn test_model_deserializes_from_stage_list() {
        let json = r#"[{"stage_name":"production","mean_days":15},{"stage_name":"shipping","mean_days":25,"relative_variance":0.3}]"#;
        let model: SupplyChainModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.len(), 2);
        assert_eq!(model.stage("production").unwrap().relative_variance, 0.0);
    }
}
