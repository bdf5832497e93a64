use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Months per year; dividends in price files are annualised amounts
const MONTHS_PER_YEAR: f64 = 12.0;

/// Start points at most this far below the all-time high count as "near" it
const NEAR_ATH_FRACTION: f64 = 0.05;

/// One row of raw monthly market history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: Date,
    pub price: f64,
    /// Annualised dividend; `None` (or NaN) for months without a distribution
    pub dividend: Option<f64>,
}

impl PricePoint {
    #[must_use]
    pub fn new(date: Date, price: f64, dividend: Option<f64>) -> Self {
        Self {
            date,
            price,
            dividend,
        }
    }

    /// Dividend attributable to a single month, zero when absent
    #[must_use]
    pub fn monthly_dividend(&self) -> f64 {
        match self.dividend {
            Some(d) if d.is_finite() => d / MONTHS_PER_YEAR,
            _ => 0.0,
        }
    }
}

/// A single month of the derived total-return series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: Date,
    /// Price with all dividends reinvested, in the units of the first raw price
    pub total_return_index: f64,
    /// Fraction below the running all-time high, in [0, 1]
    pub pct_below_ath: f64,
}

/// Total-return index with drawdown annotations.
///
/// Built once from raw price history and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalReturnSeries {
    points: Vec<SeriesPoint>,
}

impl TotalReturnSeries {
    /// Build the total-return index from monthly prices and dividends.
    ///
    /// The first index value equals the first raw price. Each following month
    /// compounds `(price + dividend / 12) / previous_price`.
    pub fn from_prices(history: &[PricePoint]) -> Result<Self> {
        if history.len() < 2 {
            return Err(SimError::InsufficientData {
                needed: 2,
                found: history.len(),
            });
        }

        for (index, point) in history.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(SimError::InvalidPricePoint {
                    index,
                    reason: "price must be positive and finite",
                });
            }
            if index > 0 && point.date <= history[index - 1].date {
                return Err(SimError::InvalidPricePoint {
                    index,
                    reason: "dates must be strictly increasing",
                });
            }
        }

        let mut points = Vec::with_capacity(history.len());
        let mut index_value = history[0].price;
        points.push(SeriesPoint {
            date: history[0].date,
            total_return_index: index_value,
            pct_below_ath: 0.0,
        });

        for pair in history.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);
            let return_factor = (current.price + current.monthly_dividend()) / prev.price;
            index_value *= return_factor;
            points.push(SeriesPoint {
                date: current.date,
                total_return_index: index_value,
                pct_below_ath: 0.0,
            });
        }

        annotate_drawdown(&mut points);
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|p| p.date)
    }

    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|p| p.date)
    }

    /// Index of the point dated exactly `date`
    #[must_use]
    pub fn position_of(&self, date: Date) -> Option<usize> {
        self.points.binary_search_by_key(&date, |p| p.date).ok()
    }

    /// Index of the point closest to `date`; ties go to the earlier point.
    #[must_use]
    pub fn nearest_position(&self, date: Date) -> Option<usize> {
        if self.points.is_empty() {
            return None;
        }
        match self.points.binary_search_by_key(&date, |p| p.date) {
            Ok(i) => Some(i),
            Err(0) => Some(0),
            Err(i) if i >= self.points.len() => Some(self.points.len() - 1),
            Err(i) => {
                let before = crate::date_math::fast_days_between(self.points[i - 1].date, date);
                let after = crate::date_math::fast_days_between(date, self.points[i].date);
                if after < before { Some(i) } else { Some(i - 1) }
            }
        }
    }
}

/// Fill in `pct_below_ath` against the running maximum, current point included.
fn annotate_drawdown(points: &mut [SeriesPoint]) {
    let mut running_max = f64::NEG_INFINITY;
    for point in points {
        running_max = running_max.max(point.total_return_index);
        point.pct_below_ath = 1.0 - point.total_return_index / running_max;
    }
}

/// Descriptive figures for a loaded history, printed before any simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Length of the history in whole years
    pub period_years: u32,
    /// Years spent within 5% of the all-time high
    pub near_ath_years: u32,
    /// Years spent exactly at a new all-time high
    pub ath_years: u32,
    /// Geometric mean yearly total return over the full history
    pub annualized_return: f64,
}

impl SeriesSummary {
    #[must_use]
    pub fn from_series(series: &TotalReturnSeries) -> Self {
        // Half years round to the even count
        let to_years = |months: usize| (months as f64 / MONTHS_PER_YEAR).round_ties_even() as u32;
        let points = series.points();

        let near = points
            .iter()
            .filter(|p| p.pct_below_ath <= NEAR_ATH_FRACTION)
            .count();
        let at = points.iter().filter(|p| p.pct_below_ath == 0.0).count();

        // Geometric mean: (last/first)^(12/months) - 1
        let annualized_return = match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() > 1 => {
                let months = (points.len() - 1) as f64;
                (last.total_return_index / first.total_return_index)
                    .powf(MONTHS_PER_YEAR / months)
                    - 1.0
            }
            _ => 0.0,
        };

        Self {
            period_years: to_years(points.len()),
            near_ath_years: to_years(near),
            ath_years: to_years(at),
            annualized_return,
        }
    }
}
