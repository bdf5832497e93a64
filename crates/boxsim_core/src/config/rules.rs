//! Tax rule-sets.
//!
//! Every rate, threshold and exemption used by the tax systems lives here so a
//! different year's rules can be loaded from a file instead of edited in code.
//! Defaults carry the 2026 Dutch values.

use serde::{Deserialize, Serialize};

/// A single progressive tax bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Amount where this bracket begins
    pub threshold: f64,
    /// Marginal rate for amounts in this bracket (e.g., 0.19 for 19%)
    pub rate: f64,
}

impl TaxBracket {
    #[must_use]
    pub const fn new(threshold: f64, rate: f64) -> Self {
        Self { threshold, rate }
    }
}

/// Box 3 with a presumed return (forfaitair rendement), as levied in 2026.
///
/// The taxpayer may rebut the presumed return with the actual return when that is lower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Box3PresumedRules {
    pub presumed_return: f64,
    pub tax_rate: f64,
    /// Tax-free allowance (heffingsvrij vermogen) subtracted from the balance
    pub exemption: f64,
}

impl Default for Box3PresumedRules {
    fn default() -> Self {
        Self {
            presumed_return: 0.06,
            tax_rate: 0.36,
            exemption: 59_357.0,
        }
    }
}

/// Box 3 on actual returns with loss carry-forward, as proposed from 2028.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Box3ActualRules {
    pub tax_rate: f64,
    /// Yearly profit exempt from tax (heffingsvrij resultaat)
    pub exemption: f64,
    /// Losses up to this amount are not carried forward
    pub loss_threshold: f64,
}

impl Default for Box3ActualRules {
    fn default() -> Self {
        Self {
            tax_rate: 0.36,
            exemption: 1_800.0,
            loss_threshold: 500.0,
        }
    }
}

/// A savings account: fixed interest, taxed under the presumed-return Box 3 rules
/// with the savings presumed rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedInterestRules {
    pub interest_rate: f64,
    pub presumed_return: f64,
    pub tax_rate: f64,
    pub exemption: f64,
}

impl Default for FixedInterestRules {
    fn default() -> Self {
        Self {
            interest_rate: 0.025,
            presumed_return: 0.0128,
            tax_rate: 0.36,
            exemption: 59_357.0,
        }
    }
}

/// Holding company (BV) with corporate tax (VPB) and Box 2 distribution tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Box2Rules {
    /// Corporate tax brackets on entity profit (sorted by threshold ascending)
    pub entity_brackets: Vec<TaxBracket>,
    /// Box 2 brackets on distributed amounts above paid-in capital
    pub distribution_brackets: Vec<TaxBracket>,
    /// Assumed yearly dividend yield received by the entity in deferred mode
    pub dividend_yield: f64,
}

impl Default for Box2Rules {
    /// Lowest brackets only: entity profit and distributions are assumed to stay in the first tier
    fn default() -> Self {
        Self {
            entity_brackets: vec![TaxBracket::new(0.0, 0.19)],
            distribution_brackets: vec![TaxBracket::new(0.0, 0.245)],
            dividend_yield: 0.015,
        }
    }
}

impl Box2Rules {
    /// Full two-tier 2026 brackets for both corporate and distribution tax
    #[must_use]
    pub fn progressive_2026() -> Self {
        Self {
            entity_brackets: vec![
                TaxBracket::new(0.0, 0.19),
                TaxBracket::new(200_000.0, 0.258),
            ],
            distribution_brackets: vec![
                TaxBracket::new(0.0, 0.245),
                TaxBracket::new(68_843.0, 0.31),
            ],
            ..Self::default()
        }
    }
}

/// All rule-sets together, the unit loaded from a rules file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRules {
    pub box3_2026: Box3PresumedRules,
    pub box3_2028: Box3ActualRules,
    pub fixed_interest: FixedInterestRules,
    pub box2: Box2Rules,
}

impl TaxRules {
    /// Check rates lie in [0, 1], amounts are non-negative and brackets are ordered
    pub fn validate(&self) -> Result<(), String> {
        let rates = [
            ("box3_2026.tax_rate", self.box3_2026.tax_rate),
            ("box3_2028.tax_rate", self.box3_2028.tax_rate),
            ("fixed_interest.tax_rate", self.fixed_interest.tax_rate),
            ("box2.dividend_yield", self.box2.dividend_yield),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must be between 0 and 1, got {rate}"));
            }
        }

        let amounts = [
            ("box3_2026.exemption", self.box3_2026.exemption),
            ("box3_2028.exemption", self.box3_2028.exemption),
            ("box3_2028.loss_threshold", self.box3_2028.loss_threshold),
            ("fixed_interest.exemption", self.fixed_interest.exemption),
        ];
        for (name, amount) in amounts {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!("{name} must be a non-negative amount, got {amount}"));
            }
        }

        for (name, brackets) in [
            ("box2.entity_brackets", &self.box2.entity_brackets),
            ("box2.distribution_brackets", &self.box2.distribution_brackets),
        ] {
            if brackets.is_empty() {
                return Err(format!("{name} needs at least one bracket"));
            }
            if brackets.windows(2).any(|w| w[0].threshold >= w[1].threshold) {
                return Err(format!("{name} thresholds must be strictly ascending"));
            }
            if brackets.iter().any(|b| !(0.0..=1.0).contains(&b.rate)) {
                return Err(format!("{name} rates must be between 0 and 1"));
            }
        }
        Ok(())
    }
}
