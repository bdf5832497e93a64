use super::{TaxState, TaxSystem, calculate_bracket_tax, profit};
use crate::config::Box2Rules;

/// Investing through a holding company (BV).
///
/// Two layers of tax apply: corporate tax (VPB) on the entity's profit and
/// Box 2 tax when the owner takes money out above the paid-in capital (agio).
///
/// In accrual mode corporate tax is paid every year on profit net of
/// carried-forward losses, so `bruto_balance == balance`. In deferred mode
/// (kostprijswaardering) only corporate tax on an assumed dividend is paid
/// yearly; `bruto_balance` then deducts an estimate of the corporate tax that a
/// sale would trigger on the unrealised gain. `netto_balance` always deducts the
/// Box 2 tax a full distribution would cost. Because both figures are
/// liquidation estimates, the reported tax paid may fall after a loss year.
#[derive(Debug, Clone)]
pub struct Box2 {
    state: TaxState,
    rules: Box2Rules,
    agio_balance: f64,
    kostprijs: bool,
    loss_carry_forward: f64,
    total_dividend: f64,
    total_dividend_tax: f64,
}

impl Box2 {
    /// `of_which_agio` is the part of `start_amount` paid in as capital, which
    /// can later be returned to the owner free of Box 2 tax.
    #[must_use]
    pub fn new(start_amount: f64, of_which_agio: f64, kostprijs: bool, rules: Box2Rules) -> Self {
        let mut system = Self {
            state: TaxState::new(start_amount),
            rules,
            agio_balance: of_which_agio,
            kostprijs,
            loss_carry_forward: 0.0,
            total_dividend: 0.0,
            total_dividend_tax: 0.0,
        };
        system.recalculate_balances(start_amount);
        system
    }

    #[must_use]
    pub fn loss_carry_forward(&self) -> f64 {
        self.loss_carry_forward
    }

    /// Dividends received so far in deferred mode
    #[must_use]
    pub fn total_dividend(&self) -> f64 {
        self.total_dividend
    }

    #[must_use]
    pub fn total_dividend_tax(&self) -> f64 {
        self.total_dividend_tax
    }

    fn entity_tax(&self, profit: f64) -> f64 {
        calculate_bracket_tax(profit, &self.rules.entity_brackets)
    }

    fn distribution_tax(&self, bruto_balance: f64) -> f64 {
        calculate_bracket_tax(bruto_balance - self.agio_balance, &self.rules.distribution_brackets)
    }

    /// Derive bruto and netto balances from a new gross balance
    fn recalculate_balances(&mut self, end_balance: f64) {
        self.state.balance = end_balance;

        if self.kostprijs {
            let unrealised = end_balance - self.state.start_amount - self.total_dividend;
            let deferred_tax = self.entity_tax(unrealised);
            self.state.bruto_balance = end_balance - deferred_tax;
            self.state.bruto_tax_paid = deferred_tax + self.total_dividend_tax;
        } else {
            // Corporate tax has already been paid
            self.state.bruto_balance = end_balance;
        }

        let distribution_tax = self.distribution_tax(self.state.bruto_balance);
        self.state.netto_tax_paid = distribution_tax;
        self.state.netto_balance = self.state.bruto_balance - distribution_tax;
    }
}

impl TaxSystem for Box2 {
    fn apply_one_year(&mut self, annual_return: f64) {
        let start_balance = self.state.balance;
        let profit = profit(start_balance, annual_return);
        let mut new_balance = start_balance + profit;

        if self.kostprijs {
            // Only the dividend is realised; its corporate tax leaves the entity
            let dividend = start_balance * self.rules.dividend_yield;
            let dividend_tax = self.entity_tax(dividend);
            new_balance -= dividend_tax;
            self.total_dividend += dividend;
            self.total_dividend_tax += dividend_tax;
        } else {
            let taxable = if profit <= 0.0 {
                self.loss_carry_forward += -profit;
                0.0
            } else if profit <= self.loss_carry_forward {
                self.loss_carry_forward -= profit;
                0.0
            } else {
                let remaining = profit - self.loss_carry_forward;
                self.loss_carry_forward = 0.0;
                remaining
            };

            let tax = self.entity_tax(taxable);
            new_balance -= tax;
            self.state.bruto_tax_paid += tax;
        }

        self.state.year += 1;
        self.recalculate_balances(new_balance);
    }

    fn state(&self) -> &TaxState {
        &self.state
    }
}
