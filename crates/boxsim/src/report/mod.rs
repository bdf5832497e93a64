//! Report output: stdout tables, SVG charts and the JSON summary.

pub mod chart;
pub mod summary;
pub mod table;

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;

use boxsim_core::ScenarioMode;
use boxsim_core::model::ComparisonSet;

use crate::util::atomic_write;

pub use summary::{RunSummary, SpanReport};

/// File name prefix shared by the artifacts of one run, e.g. `transition_50yrs_100k`
#[must_use]
pub fn artifact_base(mode: ScenarioMode, horizon: usize, start_balance: f64) -> String {
    let thousands = (start_balance / 1000.0).round() as i64;
    format!("{}_{horizon}yrs_{thousands}k", mode.file_stem())
}

/// Write both charts and the JSON summary into `output_dir`.
///
/// Returns the written paths in the order median chart, interval chart, summary.
pub fn write_artifacts(
    output_dir: &Path,
    base: &str,
    set: &ComparisonSet,
    summary: &RunSummary<'_>,
) -> color_eyre::Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create {}", output_dir.display()))?;

    let json = summary
        .to_json()
        .wrap_err("Failed to serialize run summary")?;
    let artifacts = [
        (format!("{base}.svg"), chart::median_chart(set)),
        (format!("{base}_itv.svg"), chart::interval_chart(set)),
        (format!("{base}.json"), json),
    ];

    let mut written = Vec::with_capacity(artifacts.len());
    for (name, content) in artifacts {
        let path = output_dir.join(name);
        atomic_write(&path, &content)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote artifact");
        written.push(path);
    }
    Ok(written)
}
