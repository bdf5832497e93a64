//! Dutch wealth-tax regime simulation library
//!
//! This crate compares long-horizon investment outcomes under different Dutch
//! wealth-tax regimes using historical market data. It supports:
//! - Total-return series from monthly price and dividend history
//! - Drawdown tracking against the running all-time high
//! - Rolling N-year windows of annual returns, optionally filtered near the ATH
//! - Tax systems: untaxed market, Box 3 (2026 and 2028 rules), savings account, Box 2
//! - Regime switches part-way through a window
//! - CAGR distributions and pairwise win rates
//!
//! # Example
//!
//! ```ignore
//! use boxsim_core::model::{RollingWindowSampler, TotalReturnSeries};
//! use boxsim_core::scenarios::ScenarioMode;
//! use boxsim_core::simulation::run_comparison;
//!
//! let series = TotalReturnSeries::from_prices(&history)?;
//! let windows = RollingWindowSampler::new(30)?.sample(&series)?;
//! let lineup = ScenarioMode::LongTerm.lineup(&settings);
//! let results = run_comparison(&lineup, 100_000.0, &windows, &settings.rules);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod date_math;
pub mod error;
pub mod scenarios;
pub mod simulation;
pub mod taxes;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{SimulationSettings, TaxRules};
pub use error::{Result, SimError};
pub use model::{ComparisonSet, PricePoint, ReturnWindow, SimulationResult, TotalReturnSeries};
pub use scenarios::ScenarioMode;
pub use simulation::{Strategy, run, run_comparison, run_strategy, run_with_switch};
pub use taxes::{TaxSystem, TaxSystemKind};
