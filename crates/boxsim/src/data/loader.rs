//! Monthly price history files.
//!
//! Files are semicolon-separated with a `Date;Price;Dividend` header. `Date`
//! is a month code where the two decimals are the month (`1999.08` is August
//! 1999, `1999.1` is October 1999). `Dividend` is an annualised amount and may
//! be empty or `NaN`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use boxsim_core::date_math::from_month_code;
use boxsim_core::model::PricePoint;
use color_eyre::eyre::{WrapErr, eyre};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "Dividend", default)]
    dividend: Option<f64>,
}

/// Load a price history file from disk
pub fn load_price_history(path: &Path) -> color_eyre::Result<Vec<PricePoint>> {
    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open price history {}", path.display()))?;
    let history = parse_price_history(file)
        .wrap_err_with(|| format!("Failed to read price history {}", path.display()))?;

    tracing::info!(
        rows = history.len(),
        first = ?history.first().map(|p| p.date),
        last = ?history.last().map(|p| p.date),
        "Loaded price history"
    );
    Ok(history)
}

/// Parse semicolon-separated price rows from any reader
pub fn parse_price_history<R: Read>(reader: R) -> color_eyre::Result<Vec<PricePoint>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        // Rows may stop after the price
        .flexible(true)
        .from_reader(reader);

    let mut history = Vec::new();
    for (i, result) in csv_reader.deserialize().enumerate() {
        // Row 1 is the header
        let line = i + 2;
        let row: PriceRow = result.wrap_err_with(|| format!("Failed to parse row {line}"))?;

        let code: f64 = row
            .date
            .parse()
            .map_err(|_| eyre!("Row {line}: date '{}' is not a month code", row.date))?;
        let date = from_month_code(code)
            .ok_or_else(|| eyre!("Row {line}: '{}' does not name a valid month", row.date))?;

        history.push(PricePoint::new(date, row.price, row.dividend));
    }
    Ok(history)
}
