//! Drives tax systems across sampled return windows.
//!
//! Every window gets its own freshly constructed system, so windows are
//! independent. With the `parallel` feature the per-window loop runs on rayon;
//! trajectories are merged in window order either way, so results are identical.

use serde::{Deserialize, Serialize};

use crate::config::TaxRules;
use crate::model::{ComparisonSet, ReturnWindow, SimulationResult};
use crate::taxes::{TaxSystem, TaxSystemKind};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Compute one trajectory per window, preserving window order
fn trajectories<F>(windows: &[ReturnWindow], simulate_window: F) -> Vec<Vec<f64>>
where
    F: Fn(&ReturnWindow) -> Vec<f64> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        windows.par_iter().map(simulate_window).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        windows.iter().map(simulate_window).collect()
    }
}

fn merge(trajectories: Vec<Vec<f64>>) -> SimulationResult {
    let mut result = SimulationResult::new();
    for trajectory in &trajectories {
        result.push_trajectory(trajectory);
    }
    result
}

/// Advance `system` through `returns`, pushing the netto balance after each year
fn advance<S: TaxSystem>(system: &mut S, returns: &[f64], out: &mut Vec<f64>) {
    for r in returns {
        system.apply_one_year(*r);
        out.push(system.netto_balance());
    }
}

/// Run one regime over every window, recording netto balances per year.
pub fn run<F, S>(factory: F, start_amount: f64, windows: &[ReturnWindow]) -> SimulationResult
where
    F: Fn(f64) -> S + Sync + Send,
    S: TaxSystem,
{
    merge(trajectories(windows, |window| {
        let mut system = factory(start_amount);
        let mut trajectory = Vec::with_capacity(window.len());
        advance(&mut system, &window.returns, &mut trajectory);
        trajectory
    }))
}

/// Run regime A for `switch_after_year` years, then hand its netto balance to a
/// fresh regime B for the rest of each window.
///
/// Year keys continue across the hand-off. When the window is not longer than
/// `switch_after_year`, B is never used.
pub fn run_with_switch<FA, SA, FB, SB>(
    factory_a: FA,
    factory_b: FB,
    start_amount: f64,
    windows: &[ReturnWindow],
    switch_after_year: usize,
) -> SimulationResult
where
    FA: Fn(f64) -> SA + Sync + Send,
    SA: TaxSystem,
    FB: Fn(f64) -> SB + Sync + Send,
    SB: TaxSystem,
{
    merge(trajectories(windows, |window| {
        let split = switch_after_year.min(window.len());
        let (before, after) = window.returns.split_at(split);
        let mut trajectory = Vec::with_capacity(window.len());

        let mut first = factory_a(start_amount);
        advance(&mut first, before, &mut trajectory);

        if !after.is_empty() {
            let mut second = factory_b(first.netto_balance());
            advance(&mut second, after, &mut trajectory);
        }
        trajectory
    }))
}

/// One labelled line in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    /// A single regime for the whole window
    Single { system: TaxSystemKind },
    /// Regime `first` for `after_year` years, then `second`
    Switch {
        first: TaxSystemKind,
        second: TaxSystemKind,
        after_year: usize,
    },
}

impl Strategy {
    #[must_use]
    pub fn single(system: TaxSystemKind) -> Self {
        Strategy::Single { system }
    }

    #[must_use]
    pub fn switch(first: TaxSystemKind, second: TaxSystemKind, after_year: usize) -> Self {
        Strategy::Switch {
            first,
            second,
            after_year,
        }
    }
}

/// Simulate a strategy over every window
#[must_use]
pub fn run_strategy(
    strategy: Strategy,
    start_amount: f64,
    windows: &[ReturnWindow],
    rules: &TaxRules,
) -> SimulationResult {
    match strategy {
        Strategy::Single { system } => run(|s| system.build(s, rules), start_amount, windows),
        Strategy::Switch {
            first,
            second,
            after_year,
        } => run_with_switch(
            |s| first.build(s, rules),
            |s| second.build(s, rules),
            start_amount,
            windows,
            after_year,
        ),
    }
}

/// Simulate each labelled strategy, keeping the lineup order
#[must_use]
pub fn run_comparison(
    lineup: &[(String, Strategy)],
    start_amount: f64,
    windows: &[ReturnWindow],
    rules: &TaxRules,
) -> ComparisonSet {
    let mut set = ComparisonSet::new();
    for (label, strategy) in lineup {
        set.insert(label.clone(), run_strategy(*strategy, start_amount, windows, rules));
    }
    set
}
