// src/model/review.rs

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Review/reorder cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPolicy {
    pub label: String,
    pub period_days: u32,
}

impl ReviewPolicy {
    pub fn new(label: impl Into<String>, period_days: u32) -> Result<Self> {
        let policy = Self {
            label: label.into(),
            period_days,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        if self.period_days == 0 {
            return Err(ForecastError::config(
                &self.label,
                "review period must be > 0 days",
            ));
        }
        Ok(())
    }

    pub fn weekly() -> Self {
        Self::catalog_entry("Weekly", 7)
    }

    pub fn monthly() -> Self {
        Self::catalog_entry("Monthly", 30)
    }

    fn catalog_entry(label: &str, period_days: u32) -> Self {
        Self {
            label: label.to_string(),
            period_days,
        }
    }

    /// The named cadences offered to callers.
    pub fn catalog() -> Vec<ReviewPolicy> {
        vec![
            Self::catalog_entry("Weekly", 7),
            Self::catalog_entry("Bi-weekly", 14),
            Self::catalog_entry("Monthly", 30),
            Self::catalog_entry("Quarterly", 90),
            Self::catalog_entry("6 Months", 180),
            Self::catalog_entry("Yearly", 365),
        ]
    }

    /// Case-insensitive lookup in the catalog.
    pub fn from_label(label: &str) -> Option<ReviewPolicy> {
        Self::catalog()
            .into_iter()
            .find(|p| p.label.eq_ignore_ascii_case(label))
    }
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self::monthly()
    }
}

/// Reporting window for demand views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrame {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl TimeFrame {
    pub fn days(self) -> u32 {
        match self {
            TimeFrame::Daily => 1,
            TimeFrame::Weekly => 7,
            TimeFrame::Monthly => 30,
            TimeFrame::Quarterly => 90,
            TimeFrame::Yearly => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeFrame::Daily => "Daily",
            TimeFrame::Weekly => "Weekly",
            TimeFrame::Monthly => "Monthly",
            TimeFrame::Quarterly => "Quarterly",
            TimeFrame::Yearly => "Yearly",
        }
    }
}
