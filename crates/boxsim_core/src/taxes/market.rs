use super::{TaxState, TaxSystem, profit};

/// Untaxed market growth, the baseline every regime is compared with
#[derive(Debug, Clone)]
pub struct Market {
    state: TaxState,
}

impl Market {
    #[must_use]
    pub fn new(start_amount: f64) -> Self {
        Self {
            state: TaxState::new(start_amount),
        }
    }
}

impl TaxSystem for Market {
    fn apply_one_year(&mut self, annual_return: f64) {
        let new_balance = self.state.balance + profit(self.state.balance, annual_return);
        self.state.settle_personal(new_balance, 0.0);
    }

    fn state(&self) -> &TaxState {
        &self.state
    }
}
