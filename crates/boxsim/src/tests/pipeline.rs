use std::fs;
use std::path::{Path, PathBuf};

use boxsim_core::{ScenarioMode, SimulationSettings};
use tempfile::tempdir;

use crate::report::table::CAGR_FOOTNOTE;
use crate::run::{RunOptions, execute};

/// Ten years of monthly prices (121 rows) with a steady dividend
fn write_history(dir: &Path) -> PathBuf {
    let mut csv = String::from("Date;Price;Dividend\n");
    for i in 0..121 {
        let year = 2000 + i / 12;
        let month = i % 12 + 1;
        let price = 100.0 * 1.006f64.powi(i);
        csv.push_str(&format!("{year}.{month:02};{price:.4};2.4\n"));
    }
    let path = dir.join("prices.csv");
    fs::write(&path, csv).unwrap();
    path
}

fn options(mode: ScenarioMode, data: Option<PathBuf>, output_dir: PathBuf) -> RunOptions {
    RunOptions {
        mode,
        data,
        output_dir,
        settings: SimulationSettings {
            spans: vec![5],
            max_years: 5,
            ..SimulationSettings::default()
        },
    }
}

fn run_to_string(options: &RunOptions) -> (Vec<PathBuf>, String) {
    let mut out = Vec::new();
    let written = execute(options, &mut out).unwrap();
    (written, String::from_utf8(out).unwrap())
}

#[test]
fn test_long_term_run_writes_artifacts() {
    let dir = tempdir().unwrap();
    let data = write_history(dir.path());
    let output_dir = dir.path().join("out").join("reports");

    let (written, stdout) = run_to_string(&options(
        ScenarioMode::LongTerm,
        Some(data),
        output_dir.clone(),
    ));

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "long_term_comparison_5yrs_100k.svg",
            "long_term_comparison_5yrs_100k_itv.svg",
            "long_term_comparison_5yrs_100k.json",
        ]
    );
    assert!(written.iter().all(|p| p.starts_with(&output_dir) && p.exists()));

    assert!(stdout.starts_with("   Period:  10 years\n"));
    assert!(stdout.contains("=== Samples: 5 years ==="));
    assert!(stdout.contains(CAGR_FOOTNOTE));
    assert!(stdout.contains("Win rate after 5 years"));

    let svg = fs::read_to_string(&written[0]).unwrap();
    assert!(svg.starts_with("<svg"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written[2]).unwrap()).unwrap();
    assert_eq!(json["mode"], "long_term");
    assert_eq!(json["windows"], 61);
    assert_eq!(json["horizon"], 5);
    assert_eq!(json["spans"][0]["years"], 5);
}

#[test]
fn test_transition_run_uses_its_own_stem() {
    let dir = tempdir().unwrap();
    let data = write_history(dir.path());

    let (written, stdout) = run_to_string(&options(
        ScenarioMode::Transition,
        Some(data),
        dir.path().join("out"),
    ));

    assert_eq!(written.len(), 3);
    assert!(
        written[0]
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("transition_5yrs_100k")
    );
    assert!(stdout.contains("Box 3 26 > Box 2"));
}

#[test]
fn test_static_run_needs_no_data() {
    let dir = tempdir().unwrap();
    let (written, stdout) =
        run_to_string(&options(ScenarioMode::Static, None, dir.path().join("out")));

    assert!(written.is_empty());
    assert!(stdout.contains("=== Samples: 5 years ==="));
    assert!(stdout.contains("Yearly Yield"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_data_modes_require_history() {
    let dir = tempdir().unwrap();
    let mut out = Vec::new();
    let err = execute(
        &options(ScenarioMode::LongTerm, None, dir.path().join("out")),
        &mut out,
    )
    .unwrap_err();
    assert!(format!("{err}").contains("--data"), "{err}");
}

#[test]
fn test_invalid_settings_abort_before_loading() {
    let dir = tempdir().unwrap();
    let mut opts = options(
        ScenarioMode::LongTerm,
        Some(dir.path().join("missing.csv")),
        dir.path().join("out"),
    );
    opts.settings.ath_percentage = 150.0;

    let mut out = Vec::new();
    let err = execute(&opts, &mut out).unwrap_err();
    assert!(
        err.chain()
            .any(|cause| cause.to_string().contains("ATH percentage"))
    );
    assert!(out.is_empty());
}

#[test]
fn test_short_history_writes_nothing() {
    let dir = tempdir().unwrap();
    let data = write_history(dir.path());
    let mut opts = options(ScenarioMode::LongTerm, Some(data), dir.path().join("out"));
    opts.settings.spans = vec![30];
    opts.settings.max_years = 30;

    let (written, stdout) = run_to_string(&opts);
    assert!(written.is_empty());
    assert!(stdout.contains("No 30-year windows"));
}
