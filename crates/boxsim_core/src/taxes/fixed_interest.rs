use super::box3_presumed::presumed_return_tax;
use super::{TaxState, TaxSystem, profit};
use crate::config::FixedInterestRules;

/// Savings account paying a fixed rate, taxed as Box 3 savings.
///
/// The balance grows at the fixed rate whatever the market does, but the
/// rebuttal comparison is made against the market return passed in.
#[derive(Debug, Clone)]
pub struct FixedInterest {
    state: TaxState,
    rules: FixedInterestRules,
}

impl FixedInterest {
    #[must_use]
    pub fn new(start_amount: f64, rules: FixedInterestRules) -> Self {
        Self {
            state: TaxState::new(start_amount),
            rules,
        }
    }
}

impl TaxSystem for FixedInterest {
    fn apply_one_year(&mut self, annual_return: f64) {
        let balance = self.state.balance;
        let tax = presumed_return_tax(
            balance,
            annual_return,
            self.rules.presumed_return,
            self.rules.tax_rate,
            self.rules.exemption,
        );
        let new_balance = balance + profit(balance, self.rules.interest_rate) - tax;
        self.state.settle_personal(new_balance, tax);
    }

    fn state(&self) -> &TaxState {
        &self.state
    }
}
