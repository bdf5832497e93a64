//! Distribution summaries and pairwise comparisons of simulated balances.

use serde::{Deserialize, Serialize};

use crate::model::ComparisonSet;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Compound annual growth rate in percent, rounded to 2 decimals.
///
/// A negative end balance has no real root and yields NaN.
#[must_use]
pub fn period_yield(start_amount: f64, end_amount: f64, years: usize) -> f64 {
    let cagr = ((end_amount / start_amount).powf(1.0 / years as f64) - 1.0) * 100.0;
    round_to(cagr, 2)
}

/// Linearly interpolated percentile (`p` in 0..=100) of unsorted values.
///
/// Matches the default interpolation of numpy's `percentile`.
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 50.0)
}

/// CAGR distribution of one system over one holding period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub years: usize,
    pub min: f64,
    pub p10: f64,
    pub median: f64,
    pub mean: f64,
    pub p90: f64,
    pub max: f64,
    /// Mean end balance, rounded to whole currency units
    pub avg_balance: f64,
}

/// Summarize end balances after `years` as CAGR percentages.
///
/// Percentiles pick the sorted sample at `floor(n * p)` rather than
/// interpolating. Returns `None` for an empty slice.
#[must_use]
pub fn summarize(balances: &[f64], start_amount: f64, years: usize) -> Option<PeriodStats> {
    if balances.is_empty() {
        return None;
    }
    let mut sorted = balances.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let at = |fraction: f64| {
        let idx = ((n as f64 * fraction).floor() as usize).min(n - 1);
        period_yield(start_amount, sorted[idx], years)
    };
    let mean_balance = sorted.iter().sum::<f64>() / n as f64;

    Some(PeriodStats {
        years,
        min: period_yield(start_amount, sorted[0], years),
        p10: at(0.10),
        median: at(0.50),
        mean: period_yield(start_amount, mean_balance, years),
        p90: at(0.90),
        max: period_yield(start_amount, sorted[n - 1], years),
        avg_balance: mean_balance.round(),
    })
}

/// Pairwise win percentages between systems at one year.
///
/// `cells[row][col]` is the share of windows in which `labels[row]` ended
/// strictly above `labels[col]`, in percent rounded to 1 decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRateMatrix {
    pub year: usize,
    pub labels: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl WinRateMatrix {
    #[must_use]
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.labels.iter().position(|l| l == row)?;
        let c = self.labels.iter().position(|l| l == col)?;
        self.cells[r][c]
    }
}

/// Build the win-rate matrix for every system that has results at `year`
#[must_use]
pub fn win_rate_matrix(set: &ComparisonSet, year: usize) -> WinRateMatrix {
    let columns: Vec<(&str, &[f64])> = set
        .iter()
        .filter_map(|(label, result)| result.balances_for_year(year).map(|b| (label, b)))
        .collect();

    let cells = columns
        .iter()
        .enumerate()
        .map(|(i, (_, row))| {
            columns
                .iter()
                .enumerate()
                .map(|(j, (_, col))| {
                    if i == j {
                        return None;
                    }
                    let total = row.len().min(col.len());
                    if total == 0 {
                        return None;
                    }
                    let wins = row.iter().zip(col.iter()).filter(|(a, b)| a > b).count();
                    Some(round_to(wins as f64 / total as f64 * 100.0, 1))
                })
                .collect()
        })
        .collect();

    WinRateMatrix {
        year,
        labels: columns.iter().map(|(l, _)| (*l).to_string()).collect(),
        cells,
    }
}
