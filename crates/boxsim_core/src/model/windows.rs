use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::add_years;
use crate::error::{Result, SimError};
use crate::model::TotalReturnSeries;

/// Annual returns for one historical start month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnWindow {
    pub start: Date,
    /// Year-over-year total returns, index 0 = first year after `start`
    pub returns: Vec<f64>,
}

impl ReturnWindow {
    #[must_use]
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Growth factor over the whole window: product of (1 + r)
    #[must_use]
    pub fn cumulative_growth(&self) -> f64 {
        self.returns.iter().map(|r| 1.0 + r).product()
    }
}

/// Produces every N-year sequence of annual returns from a total-return series.
///
/// Each month in the series is a candidate start. Starts whose horizon runs past
/// the end of the data are excluded entirely, and an optional filter keeps only
/// starts within `ath_percentage` percent of the running all-time high.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingWindowSampler {
    horizon: i16,
    ath_percentage: f64,
}

impl RollingWindowSampler {
    /// Sampler without an all-time-high filter
    pub fn new(horizon_years: usize) -> Result<Self> {
        Self::with_ath_filter(horizon_years, 100.0)
    }

    pub fn with_ath_filter(horizon_years: usize, ath_percentage: f64) -> Result<Self> {
        if horizon_years == 0 {
            return Err(SimError::InvalidConfiguration(
                "horizon must be at least one year".into(),
            ));
        }
        let horizon = i16::try_from(horizon_years).map_err(|_| {
            SimError::InvalidConfiguration(format!("horizon of {horizon_years} years is too long"))
        })?;
        validate_ath_percentage(ath_percentage)?;
        Ok(Self {
            horizon,
            ath_percentage,
        })
    }

    #[must_use]
    pub fn horizon(&self) -> usize {
        self.horizon as usize
    }

    /// Sample all windows in start-date order.
    ///
    /// A series shorter than the horizon yields an empty vector.
    pub fn sample(&self, series: &TotalReturnSeries) -> Result<Vec<ReturnWindow>> {
        let Some(last_date) = series.last_date() else {
            return Ok(Vec::new());
        };
        let points = series.points();
        let threshold = self.ath_percentage / 100.0;
        let mut windows = Vec::new();

        for start in points {
            let Some(end_date) = add_years(start.date, self.horizon) else {
                break;
            };
            // Later starts only push the end date further out
            if end_date > last_date {
                break;
            }
            if start.pct_below_ath > threshold {
                continue;
            }

            let mut start_value = start.total_return_index;
            let mut end_value = start_value;
            let mut returns = Vec::with_capacity(self.horizon());

            for year in 1..=self.horizon {
                let target = add_years(start.date, year).ok_or_else(|| {
                    SimError::InvalidConfiguration(format!("{} + {year} years is out of range", start.date))
                })?;
                let idx = series
                    .position_of(target)
                    .or_else(|| series.nearest_position(target))
                    .ok_or(SimError::InsufficientData {
                        needed: 2,
                        found: 0,
                    })?;
                end_value = points[idx].total_return_index;
                returns.push(end_value / start_value - 1.0);
                start_value = end_value;
            }

            if let Some(end_idx) = series.position_of(end_date) {
                let expected = points[end_idx].total_return_index;
                if expected != end_value {
                    return Err(SimError::InvariantViolation {
                        start: start.date,
                        expected,
                        actual: end_value,
                    });
                }
            }

            windows.push(ReturnWindow {
                start: start.date,
                returns,
            });
        }

        Ok(windows)
    }
}

/// The all-time-high filter is a percentage and must lie in [0, 100]
pub fn validate_ath_percentage(ath_percentage: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&ath_percentage) {
        return Err(SimError::InvalidConfiguration(format!(
            "ATH percentage must be between 0 and 100, got {ath_percentage}"
        )));
    }
    Ok(())
}
