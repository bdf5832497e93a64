use std::fmt;

use jiff::civil::Date;

/// Errors raised while building return series, sampling windows or validating settings
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Not enough price history to derive anything
    InsufficientData { needed: usize, found: usize },
    /// A raw price point that would make the return factor meaningless
    InvalidPricePoint { index: usize, reason: &'static str },
    /// Settings outside their allowed range, reported before any simulation runs
    InvalidConfiguration(String),
    /// The year-by-year walk through a window did not land on the directly indexed end value.
    /// Points at a data or lookup defect and must not be swallowed.
    InvariantViolation {
        start: Date,
        expected: f64,
        actual: f64,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InsufficientData { needed, found } => {
                write!(f, "insufficient data: need at least {needed} points, found {found}")
            }
            SimError::InvalidPricePoint { index, reason } => {
                write!(f, "invalid price point at row {index}: {reason}")
            }
            SimError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            SimError::InvariantViolation {
                start,
                expected,
                actual,
            } => write!(
                f,
                "window starting {start} ended at {actual}, but the series holds {expected} at its end date"
            ),
        }
    }
}

impl std::error::Error for SimError {}

pub type Result<T> = std::result::Result<T, SimError>;
