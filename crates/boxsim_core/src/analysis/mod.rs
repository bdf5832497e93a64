//! Statistics over simulation results.
//!
//! [`summarize`] turns the end balances of one system after N years into a
//! CAGR distribution, and [`win_rate_matrix`] compares systems window by
//! window. Both operate on [`crate::model::ComparisonSet`] output of the
//! runner and never re-run a simulation.

mod metrics;

pub use metrics::{
    PeriodStats, WinRateMatrix, median, percentile, period_yield, summarize, win_rate_matrix,
};
