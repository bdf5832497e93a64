use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;

use boxsim::data::load_rules;
use boxsim::{RunOptions, execute, init_logging};
use boxsim_core::{ScenarioMode, SimulationSettings, TaxRules};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Every regime at a fixed 10% yearly return
    Static,
    /// Switch from the current regime to a later one after a few years
    Transition,
    /// Hold each regime for the whole horizon
    LongTerm,
}

impl From<Mode> for ScenarioMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Static => ScenarioMode::Static,
            Mode::Transition => ScenarioMode::Transition,
            Mode::LongTerm => ScenarioMode::LongTerm,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "boxsim")]
#[command(about = "Compare Dutch wealth-tax regimes over historical market windows")]
struct Args {
    /// Comparison to run
    #[arg(value_enum)]
    mode: Mode,

    /// Monthly market history (Date;Price;Dividend)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Longest horizon to simulate, in years
    #[arg(short = 'y', long, default_value_t = 50)]
    max_years: usize,

    /// Only start windows within this percentage of the all-time high
    #[arg(short, long, default_value_t = 100.0)]
    ath_percentage: f64,

    /// Amount invested at the start of every window
    #[arg(long, default_value_t = 100_000.0)]
    start_balance: f64,

    /// Holding periods to report on
    #[arg(long, value_delimiter = ',', default_value = "5,10,20,30,50,75")]
    spans: Vec<usize>,

    /// Year after which transition strategies switch regime
    #[arg(long, default_value_t = 2)]
    switch_after_year: usize,

    /// YAML file overriding the built-in tax rules
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Directory for charts, the JSON summary and the log file
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.output_dir, &args.log_level)?;

    let rules = match &args.rules {
        Some(path) => load_rules(path).wrap_err("Failed to load tax rules")?,
        None => TaxRules::default(),
    };

    let options = RunOptions {
        mode: args.mode.into(),
        data: args.data,
        output_dir: args.output_dir,
        settings: SimulationSettings {
            start_balance: args.start_balance,
            spans: args.spans,
            max_years: args.max_years,
            ath_percentage: args.ath_percentage,
            switch_after_year: args.switch_after_year,
            rules,
        },
    };

    let written = execute(&options, &mut std::io::stdout().lock())?;
    for path in &written {
        tracing::info!(path = %path.display(), "Artifact written");
    }
    Ok(())
}
