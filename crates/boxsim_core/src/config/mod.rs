//! Simulation configuration
//!
//! `SimulationSettings` holds the run parameters shared by every mode; the
//! tax rule-sets live in [`rules`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::model::validate_ath_percentage;

pub mod rules;

pub use rules::{
    Box2Rules, Box3ActualRules, Box3PresumedRules, FixedInterestRules, TaxBracket, TaxRules,
};

fn default_spans() -> Vec<usize> {
    vec![5, 10, 20, 30, 50, 75]
}

/// Run parameters for a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Amount invested at the start of every window
    pub start_balance: f64,
    /// Holding periods (years) to report on
    pub spans: Vec<usize>,
    /// Upper bound on the simulated horizon
    pub max_years: usize,
    /// Only start windows within this percentage of the all-time high (100 = all starts)
    pub ath_percentage: f64,
    /// Year after which regime-transition strategies hand over to their second system
    pub switch_after_year: usize,
    #[serde(skip)]
    pub rules: TaxRules,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            start_balance: 100_000.0,
            spans: default_spans(),
            max_years: 50,
            ath_percentage: 100.0,
            switch_after_year: 2,
            rules: TaxRules::default(),
        }
    }
}

impl SimulationSettings {
    /// Reject settings that would make a run meaningless, before anything is simulated
    pub fn validate(&self) -> Result<()> {
        validate_ath_percentage(self.ath_percentage)?;

        if !self.start_balance.is_finite() || self.start_balance <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!(
                "start balance must be positive, got {}",
                self.start_balance
            )));
        }
        if self.spans.is_empty() || self.spans.contains(&0) {
            return Err(SimError::InvalidConfiguration(
                "spans must be a non-empty list of positive year counts".into(),
            ));
        }
        if self.max_years == 0 {
            return Err(SimError::InvalidConfiguration(
                "max years must be at least one".into(),
            ));
        }
        self.rules.validate().map_err(SimError::InvalidConfiguration)
    }

    /// Longest horizon to simulate: the largest span, capped by `max_years`
    #[must_use]
    pub fn max_horizon(&self) -> usize {
        let longest_span = self.spans.iter().copied().max().unwrap_or(0);
        self.max_years.min(longest_span)
    }

    /// Spans that fit inside the simulated horizon, in configured order
    #[must_use]
    pub fn reported_spans(&self) -> Vec<usize> {
        let horizon = self.max_horizon();
        self.spans
            .iter()
            .copied()
            .filter(|span| *span <= horizon)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        let settings = SimulationSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_horizon(), 50);
        assert_eq!(settings.reported_spans(), vec![5, 10, 20, 30, 50]);
    }

    #[test]
    fn test_horizon_capped_by_longest_span() {
        let settings = SimulationSettings {
            spans: vec![5, 10],
            max_years: 40,
            ..Default::default()
        };
        assert_eq!(settings.max_horizon(), 10);
    }

    #[test]
    fn test_invalid_ath_percentage() {
        let settings = SimulationSettings {
            ath_percentage: 150.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_invalid_start_balance_and_spans() {
        let settings = SimulationSettings {
            start_balance: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = SimulationSettings {
            spans: vec![5, 0],
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
