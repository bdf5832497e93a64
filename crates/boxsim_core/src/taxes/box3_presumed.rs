use super::{TaxState, TaxSystem, profit};
use crate::config::Box3PresumedRules;

/// Tax under a presumed return with the rebuttal rule (tegenbewijsregeling).
///
/// The taxable base is the balance above the exemption. The taxed profit is the
/// lower of the presumed profit and the actual profit on that base; a
/// non-positive actual return counts as zero actual profit.
pub(super) fn presumed_return_tax(
    balance: f64,
    actual_return: f64,
    presumed_return: f64,
    tax_rate: f64,
    exemption: f64,
) -> f64 {
    let taxable_base = (balance - exemption).max(0.0);
    let presumed_profit = taxable_base * presumed_return;
    let actual_profit = if actual_return > 0.0 {
        taxable_base * actual_return
    } else {
        0.0
    };
    presumed_profit.min(actual_profit) * tax_rate
}

/// Box 3 as levied in 2026: a presumed return on wealth above the exemption
#[derive(Debug, Clone)]
pub struct Box3Presumed {
    state: TaxState,
    rules: Box3PresumedRules,
}

impl Box3Presumed {
    #[must_use]
    pub fn new(start_amount: f64, rules: Box3PresumedRules) -> Self {
        Self {
            state: TaxState::new(start_amount),
            rules,
        }
    }
}

impl TaxSystem for Box3Presumed {
    fn apply_one_year(&mut self, annual_return: f64) {
        let balance = self.state.balance;
        let tax = presumed_return_tax(
            balance,
            annual_return,
            self.rules.presumed_return,
            self.rules.tax_rate,
            self.rules.exemption,
        );
        let new_balance = balance + profit(balance, annual_return) - tax;
        self.state.settle_personal(new_balance, tax);
    }

    fn state(&self) -> &TaxState {
        &self.state
    }
}
