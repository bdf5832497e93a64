//! Command-line front end for the boxsim tax-regime comparison
//!
//! Loads monthly market history from CSV and optional tax rule-sets from YAML,
//! runs a [`boxsim_core`] comparison and reports the outcome as markdown tables
//! on stdout plus SVG charts and a JSON summary in the output directory.

// ============================================================================
// Input and run orchestration
// ============================================================================

pub mod data;
pub mod run;

// ============================================================================
// Output
// ============================================================================

pub mod logging;
pub mod report;
pub mod util;

#[cfg(test)]
mod tests;

pub use logging::init_logging;
pub use run::{RunOptions, execute};
