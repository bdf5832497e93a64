use super::{TaxState, TaxSystem, profit};
use crate::config::Box3ActualRules;

/// Box 3 on actual returns (proposed for 2028).
///
/// Losses above the threshold are carried forward. A profitable year is first
/// reduced by the yearly exemption and the carried-forward losses; only the
/// remainder is taxed, after which the carry-forward is cleared.
#[derive(Debug, Clone)]
pub struct Box3Actual {
    state: TaxState,
    rules: Box3ActualRules,
    loss_carry_forward: f64,
}

impl Box3Actual {
    #[must_use]
    pub fn new(start_amount: f64, rules: Box3ActualRules) -> Self {
        Self {
            state: TaxState::new(start_amount),
            rules,
            loss_carry_forward: 0.0,
        }
    }

    #[must_use]
    pub fn loss_carry_forward(&self) -> f64 {
        self.loss_carry_forward
    }
}

impl TaxSystem for Box3Actual {
    fn apply_one_year(&mut self, annual_return: f64) {
        let balance = self.state.balance;
        let profit = profit(balance, annual_return);

        let tax = if profit < 0.0 {
            // Only the part of the loss above the threshold carries forward
            let loss = -profit;
            if loss > self.rules.loss_threshold {
                self.loss_carry_forward += loss - self.rules.loss_threshold;
            }
            0.0
        } else {
            let taxable = profit - self.rules.exemption - self.loss_carry_forward;
            if taxable < 0.0 {
                // Profit not enough to absorb exemption and losses: it eats into the carry-forward
                self.loss_carry_forward = (self.loss_carry_forward - profit).max(0.0);
                0.0
            } else {
                self.loss_carry_forward = 0.0;
                taxable * self.rules.tax_rate
            }
        };

        self.state.settle_personal(balance + profit - tax, tax);
    }

    fn state(&self) -> &TaxState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> Box3Actual {
        Box3Actual::new(100_000.0, Box3ActualRules::default())
    }

    #[test]
    fn test_profit_above_exemption_is_taxed() {
        let mut s = system();
        s.apply_one_year(0.10);
        // (10,000 - 1,800) * 36%
        assert!((s.bruto_tax_paid() - 2_952.0).abs() < 1e-9);
        assert!((s.balance() - 107_048.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_profit_within_exemption() {
        let mut s = system();
        s.apply_one_year(0.01);
        assert_eq!(s.bruto_tax_paid(), 0.0);
        assert!((s.balance() - 101_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_loss_above_threshold_carries_forward() {
        let mut s = system();
        s.apply_one_year(-0.10);
        assert!((s.loss_carry_forward() - 9_500.0).abs() < 1e-9);
        assert_eq!(s.bruto_tax_paid(), 0.0);
    }

    #[test]
    fn test_loss_within_threshold_not_carried() {
        let mut s = system();
        s.apply_one_year(-0.004);
        assert_eq!(s.loss_carry_forward(), 0.0);
    }

    #[test]
    fn test_partial_netting_reduces_carry_forward() {
        let mut s = system();
        s.apply_one_year(-0.10); // carry-forward 9,500; balance 90,000
        s.apply_one_year(0.05); // profit 4,500 < 1,800 + 9,500
        assert!((s.loss_carry_forward() - 5_000.0).abs() < 1e-9);
        assert_eq!(s.bruto_tax_paid(), 0.0);
    }

    #[test]
    fn test_full_netting_clears_carry_forward() {
        let mut s = system();
        s.apply_one_year(-0.10); // carry-forward 9,500; balance 90,000
        s.apply_one_year(0.20); // profit 18,000 - 1,800 - 9,500 = 6,700 taxable
        assert_eq!(s.loss_carry_forward(), 0.0);
        assert!((s.bruto_tax_paid() - 6_700.0 * 0.36).abs() < 1e-9);
    }

    #[test]
    fn test_profit_covering_losses_but_not_exemption_clears_carry_forward() {
        let mut s = system();
        s.apply_one_year(-0.006); // loss 600 -> carry-forward 100
        assert!((s.loss_carry_forward() - 100.0).abs() < 1e-9);
        s.apply_one_year(0.01); // profit ~994, taxable negative, profit > carry-forward
        assert_eq!(s.loss_carry_forward(), 0.0);
        assert_eq!(s.bruto_tax_paid(), 0.0);
    }
}
