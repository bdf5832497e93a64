//! Tax systems that evolve a balance one year at a time.
//!
//! Every regime implements [`TaxSystem`]: it owns its running balances and tax
//! bookkeeping and is advanced with one nominal annual return per call. Three
//! balances are tracked:
//!
//! - `balance`: gross asset value
//! - `bruto_balance`: after entity-level tax (equal to `balance` for personal regimes)
//! - `netto_balance`: after all tax, the value compared across regimes
//!
//! and `netto <= bruto <= balance` holds after every year. Balances are never
//! floored at zero.

use serde::{Deserialize, Serialize};

use crate::config::{TaxBracket, TaxRules};

mod box2;
mod box3_actual;
mod box3_presumed;
mod fixed_interest;
mod market;

pub use box2::Box2;
pub use box3_actual::Box3Actual;
pub use box3_presumed::Box3Presumed;
pub use fixed_interest::FixedInterest;
pub use market::Market;

/// Profit on `balance` at `rate` for one year
#[inline]
#[must_use]
pub fn profit(balance: f64, rate: f64) -> f64 {
    balance * rate
}

/// Tax owed on `amount` under progressive brackets.
///
/// Zero or negative amounts owe nothing.
#[must_use]
pub fn calculate_bracket_tax(amount: f64, brackets: &[TaxBracket]) -> f64 {
    if amount <= 0.0 || brackets.is_empty() {
        return 0.0;
    }

    let mut tax = 0.0;
    for (i, bracket) in brackets.iter().enumerate() {
        if amount <= bracket.threshold {
            break;
        }
        let next_threshold = brackets
            .get(i + 1)
            .map_or(f64::INFINITY, |b| b.threshold);
        let taxable_in_bracket = amount.min(next_threshold) - bracket.threshold;
        tax += taxable_in_bracket * bracket.rate;
    }
    tax
}

/// Balances and cumulative tax shared by every regime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxState {
    pub start_amount: f64,
    pub balance: f64,
    pub bruto_balance: f64,
    pub netto_balance: f64,
    pub bruto_tax_paid: f64,
    pub netto_tax_paid: f64,
    pub year: u32,
}

impl TaxState {
    #[must_use]
    pub fn new(start_amount: f64) -> Self {
        Self {
            start_amount,
            balance: start_amount,
            bruto_balance: start_amount,
            netto_balance: start_amount,
            bruto_tax_paid: 0.0,
            netto_tax_paid: 0.0,
            year: 0,
        }
    }

    /// Close a year for a single-entity regime: one balance, tax paid in cash.
    fn settle_personal(&mut self, new_balance: f64, tax: f64) {
        self.balance = new_balance;
        self.bruto_balance = new_balance;
        self.netto_balance = new_balance;
        self.bruto_tax_paid += tax;
        self.netto_tax_paid += tax;
        self.year += 1;
    }
}

/// A wealth-tax regime advanced one year at a time
pub trait TaxSystem {
    /// Apply one year's nominal return (0.07 = 7%) and the regime's taxes
    fn apply_one_year(&mut self, annual_return: f64);

    fn state(&self) -> &TaxState;

    fn balance(&self) -> f64 {
        self.state().balance
    }

    fn bruto_balance(&self) -> f64 {
        self.state().bruto_balance
    }

    fn netto_balance(&self) -> f64 {
        self.state().netto_balance
    }

    fn bruto_tax_paid(&self) -> f64 {
        self.state().bruto_tax_paid
    }

    fn netto_tax_paid(&self) -> f64 {
        self.state().netto_tax_paid
    }

    fn year(&self) -> u32 {
        self.state().year
    }

    fn start_amount(&self) -> f64 {
        self.state().start_amount
    }
}

impl<T: TaxSystem + ?Sized> TaxSystem for Box<T> {
    fn apply_one_year(&mut self, annual_return: f64) {
        (**self).apply_one_year(annual_return);
    }

    fn state(&self) -> &TaxState {
        (**self).state()
    }
}

/// Selects which regime to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaxSystemKind {
    /// Untaxed baseline
    Market,
    /// Box 3 with presumed return and rebuttal (2026)
    #[serde(rename = "box3_2026")]
    Box3Presumed,
    /// Box 3 on actual returns with loss carry-forward (2028)
    #[serde(rename = "box3_2028")]
    Box3Actual,
    /// Savings account under presumed-return Box 3
    FixedInterest,
    /// Holding company; `kostprijs` defers corporate tax until sale
    Box2 { kostprijs: bool },
}

impl TaxSystemKind {
    /// Construct a fresh system holding `start_amount`.
    ///
    /// Box 2 treats the whole deposit as paid-in capital (agio).
    #[must_use]
    pub fn build(self, start_amount: f64, rules: &TaxRules) -> Box<dyn TaxSystem + Send> {
        match self {
            TaxSystemKind::Market => Box::new(Market::new(start_amount)),
            TaxSystemKind::Box3Presumed => {
                Box::new(Box3Presumed::new(start_amount, rules.box3_2026))
            }
            TaxSystemKind::Box3Actual => Box::new(Box3Actual::new(start_amount, rules.box3_2028)),
            TaxSystemKind::FixedInterest => {
                Box::new(FixedInterest::new(start_amount, rules.fixed_interest))
            }
            TaxSystemKind::Box2 { kostprijs } => Box::new(Box2::new(
                start_amount,
                start_amount,
                kostprijs,
                rules.box2.clone(),
            )),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TaxSystemKind::Market => "Market",
            TaxSystemKind::Box3Presumed => "Box 3 2026",
            TaxSystemKind::Box3Actual => "Box 3 2028",
            TaxSystemKind::FixedInterest => "Savings Acc",
            TaxSystemKind::Box2 { kostprijs: false } => "Box 2 VPB",
            TaxSystemKind::Box2 { kostprijs: true } => "Box 2 Kostprijs",
        }
    }
}
