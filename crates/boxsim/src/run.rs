//! One command-line run, from input files to printed tables and artifacts.

use std::io::Write;
use std::path::PathBuf;

use color_eyre::eyre::{WrapErr, eyre};

use boxsim_core::model::{RollingWindowSampler, SeriesSummary, TotalReturnSeries};
use boxsim_core::{ScenarioMode, SimulationSettings, run_comparison, scenarios};

use crate::data::load_price_history;
use crate::report::{self, RunSummary, SpanReport, table};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: ScenarioMode,
    /// Market history CSV, required unless the mode is static
    pub data: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub settings: SimulationSettings,
}

/// Run the selected mode, printing the report to `out`.
///
/// Returns the artifact paths written to the output directory; static mode
/// and runs without any sampled window write none.
pub fn execute(options: &RunOptions, out: &mut impl Write) -> color_eyre::Result<Vec<PathBuf>> {
    let settings = &options.settings;
    settings
        .validate()
        .wrap_err("Invalid simulation settings")?;

    if !options.mode.needs_market_data() {
        tracing::info!(spans = ?settings.spans, "Running static illustration");
        let rows = scenarios::static_run(settings);
        write!(out, "{}", table::static_report(&rows))?;
        return Ok(Vec::new());
    }

    let data = options
        .data
        .as_deref()
        .ok_or_else(|| eyre!("--data is required for {:?} mode", options.mode))?;

    let history = load_price_history(data)?;
    let series = TotalReturnSeries::from_prices(&history)
        .wrap_err_with(|| format!("Invalid market history in {}", data.display()))?;
    let history_summary = SeriesSummary::from_series(&series);
    write!(out, "{}", table::series_summary(&history_summary))?;

    let horizon = settings.max_horizon();
    let windows = RollingWindowSampler::with_ath_filter(horizon, settings.ath_percentage)?
        .sample(&series)?;
    if windows.is_empty() {
        tracing::warn!(horizon, "History too short for a single window");
        writeln!(out, "No {horizon}-year windows available in {}", data.display())?;
        return Ok(Vec::new());
    }
    tracing::info!(
        mode = ?options.mode,
        horizon,
        windows = windows.len(),
        "Sampled rolling windows"
    );

    let lineup = options.mode.lineup(settings);
    let set = run_comparison(&lineup, settings.start_balance, &windows, &settings.rules);

    let mut spans = Vec::new();
    for years in settings.reported_spans() {
        let span = SpanReport::build(&set, settings.start_balance, years);
        tracing::debug!(years, systems = span.stats.len(), "Summarized span");

        write!(out, "{}", table::span_heading(years))?;
        write!(out, "{}", table::stats_table(&span.stats))?;
        writeln!(out)?;
        write!(out, "{}", table::win_rate_table(&span.win_rates))?;
        spans.push(span);
    }

    let summary = RunSummary {
        mode: options.mode,
        settings,
        rules: &settings.rules,
        history: Some(history_summary),
        horizon,
        windows: windows.len(),
        spans: &spans,
    };
    let base = report::artifact_base(options.mode, horizon, settings.start_balance);
    let written = report::write_artifacts(&options.output_dir, &base, &set, &summary)?;
    tracing::info!(artifacts = written.len(), dir = %options.output_dir.display(), "Run complete");
    Ok(written)
}
