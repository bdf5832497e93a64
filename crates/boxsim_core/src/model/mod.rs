mod market;
mod results;
mod windows;

pub use market::{PricePoint, SeriesPoint, SeriesSummary, TotalReturnSeries};
pub use results::{ComparisonSet, SimulationResult};
pub use windows::{ReturnWindow, RollingWindowSampler, validate_ath_percentage};
