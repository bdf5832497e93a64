//! Named system line-ups compared by each run mode.

use serde::{Deserialize, Serialize};

use crate::analysis::period_yield;
use crate::config::{SimulationSettings, TaxRules};
use crate::simulation::Strategy;
use crate::taxes::{TaxState, TaxSystem, TaxSystemKind};

/// Return used by the fixed-return illustration
pub const STATIC_RETURN: f64 = 0.10;

const BOX2_VPB: TaxSystemKind = TaxSystemKind::Box2 { kostprijs: false };
const BOX2_KOSTPRIJS: TaxSystemKind = TaxSystemKind::Box2 { kostprijs: true };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioMode {
    /// Every regime at a fixed yearly return, no market data needed
    Static,
    /// Switching from the current regime to a later one
    Transition,
    /// Each regime held for the whole horizon
    LongTerm,
}

impl ScenarioMode {
    #[must_use]
    pub fn needs_market_data(self) -> bool {
        !matches!(self, ScenarioMode::Static)
    }

    /// Prefix of the report artifacts written for this mode
    #[must_use]
    pub fn file_stem(self) -> &'static str {
        match self {
            ScenarioMode::Static => "static",
            ScenarioMode::Transition => "transition",
            ScenarioMode::LongTerm => "long_term_comparison",
        }
    }

    /// Labelled strategies to simulate, in report order
    #[must_use]
    pub fn lineup(self, settings: &SimulationSettings) -> Vec<(String, Strategy)> {
        match self {
            ScenarioMode::Static => static_systems()
                .into_iter()
                .map(|kind| (kind.label().to_string(), Strategy::single(kind)))
                .collect(),
            ScenarioMode::Transition => transition(settings.switch_after_year),
            ScenarioMode::LongTerm => long_term(),
        }
    }
}

fn labelled(label: &str, strategy: Strategy) -> (String, Strategy) {
    (label.to_string(), strategy)
}

/// Each regime held for the full horizon
#[must_use]
pub fn long_term() -> Vec<(String, Strategy)> {
    [
        TaxSystemKind::Market,
        TaxSystemKind::Box3Presumed,
        TaxSystemKind::Box3Actual,
        BOX2_VPB,
        BOX2_KOSTPRIJS,
    ]
    .into_iter()
    .map(|kind| labelled(kind.label(), Strategy::single(kind)))
    .collect()
}

/// Moving from the 2026 rules to a later arrangement after `switch_after_year` years
#[must_use]
pub fn transition(switch_after_year: usize) -> Vec<(String, Strategy)> {
    vec![
        labelled("Market", Strategy::single(TaxSystemKind::Market)),
        labelled(
            "Box 3 26 > Box 3 28",
            Strategy::switch(
                TaxSystemKind::Box3Presumed,
                TaxSystemKind::Box3Actual,
                switch_after_year,
            ),
        ),
        labelled(
            "Savings Acc > Box 2",
            Strategy::switch(TaxSystemKind::FixedInterest, BOX2_KOSTPRIJS, switch_after_year),
        ),
        labelled(
            "Box 3 26 > Box 2",
            Strategy::switch(TaxSystemKind::Box3Presumed, BOX2_KOSTPRIJS, switch_after_year),
        ),
        labelled(BOX2_KOSTPRIJS.label(), Strategy::single(BOX2_KOSTPRIJS)),
    ]
}

fn static_systems() -> [TaxSystemKind; 4] {
    [
        TaxSystemKind::Box3Presumed,
        TaxSystemKind::Box3Actual,
        BOX2_VPB,
        BOX2_KOSTPRIJS,
    ]
}

/// Outcome of one regime after `years` at the fixed return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRow {
    pub label: String,
    pub years: usize,
    pub balance: f64,
    pub bruto_balance: f64,
    pub netto_balance: f64,
    pub balance_cagr: f64,
    pub bruto_cagr: f64,
    pub netto_cagr: f64,
}

/// Advance a fresh system `years` times at a constant `annual_return`
#[must_use]
pub fn run_fixed_return(
    kind: TaxSystemKind,
    start_amount: f64,
    annual_return: f64,
    years: usize,
    rules: &TaxRules,
) -> TaxState {
    let mut system = kind.build(start_amount, rules);
    for _ in 0..years {
        system.apply_one_year(annual_return);
    }
    *system.state()
}

/// Fixed-return illustration: every static regime for every configured span
#[must_use]
pub fn static_run(settings: &SimulationSettings) -> Vec<StaticRow> {
    let start = settings.start_balance;
    settings
        .spans
        .iter()
        .flat_map(move |&years| {
            static_systems().into_iter().map(move |kind| {
                let state = run_fixed_return(kind, start, STATIC_RETURN, years, &settings.rules);
                StaticRow {
                    label: kind.label().to_string(),
                    years,
                    balance: state.balance,
                    bruto_balance: state.bruto_balance,
                    netto_balance: state.netto_balance,
                    balance_cagr: period_yield(start, state.balance, years),
                    bruto_cagr: period_yield(start, state.bruto_balance, years),
                    netto_cagr: period_yield(start, state.netto_balance, years),
                }
            })
        })
        .collect()
}
