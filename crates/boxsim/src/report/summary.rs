//! Machine-readable run summary written next to the charts.

use serde::Serialize;

use boxsim_core::analysis::{PeriodStats, WinRateMatrix, summarize, win_rate_matrix};
use boxsim_core::model::{ComparisonSet, SeriesSummary};
use boxsim_core::{ScenarioMode, SimulationSettings, TaxRules};

/// Statistics and pairwise win rates for one holding period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanReport {
    pub years: usize,
    /// Per-system CAGR distribution, in line-up order
    pub stats: Vec<(String, PeriodStats)>,
    pub win_rates: WinRateMatrix,
}

impl SpanReport {
    /// Systems without results for `years` are left out of the stats.
    #[must_use]
    pub fn build(set: &ComparisonSet, start_balance: f64, years: usize) -> Self {
        let stats = set
            .iter()
            .filter_map(|(label, result)| {
                let balances = result.balances_for_year(years)?;
                summarize(balances, start_balance, years).map(|s| (label.to_string(), s))
            })
            .collect();

        Self {
            years,
            stats,
            win_rates: win_rate_matrix(set, years),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    pub mode: ScenarioMode,
    pub settings: &'a SimulationSettings,
    pub rules: &'a TaxRules,
    pub history: Option<SeriesSummary>,
    pub horizon: usize,
    pub windows: usize,
    pub spans: &'a [SpanReport],
}

impl RunSummary<'_> {
    /// Pretty-printed JSON; NaN statistics are written as `null`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxsim_core::model::SimulationResult;

    fn comparison() -> ComparisonSet {
        let mut a = SimulationResult::new();
        a.push_trajectory(&[110_000.0, 121_000.0]);
        a.push_trajectory(&[90_000.0, 99_000.0]);
        let mut b = SimulationResult::new();
        b.push_trajectory(&[105_000.0, 110_250.0]);
        b.push_trajectory(&[95_000.0, 100_000.0]);
        let mut short = SimulationResult::new();
        short.push_trajectory(&[100_000.0]);

        let mut set = ComparisonSet::new();
        set.insert("A", a);
        set.insert("B", b);
        set.insert("Short", short);
        set
    }

    #[test]
    fn test_span_report_skips_systems_without_the_year() {
        let report = SpanReport::build(&comparison(), 100_000.0, 2);

        let names: Vec<&str> = report.stats.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(report.stats[0].1.max, 10.0);
        assert_eq!(report.win_rates.get("A", "B"), Some(50.0));
    }

    #[test]
    fn test_summary_json_shape() {
        let settings = SimulationSettings::default();
        let spans = vec![SpanReport::build(&comparison(), 100_000.0, 1)];
        let summary = RunSummary {
            mode: ScenarioMode::LongTerm,
            settings: &settings,
            rules: &settings.rules,
            history: None,
            horizon: 2,
            windows: 2,
            spans: &spans,
        };

        let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(value["mode"], "long_term");
        assert_eq!(value["settings"]["start_balance"], 100_000.0);
        assert!(value["history"].is_null());
        assert_eq!(value["spans"][0]["years"], 1);
        assert_eq!(value["spans"][0]["stats"][0][0], "A");
        assert!(value["spans"][0]["win_rates"]["cells"][0][0].is_null());
    }
}
