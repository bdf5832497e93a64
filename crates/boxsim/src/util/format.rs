/// Group the integer part of `value` in thousands with `.` (Dutch notation)
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.abs().round() as u64;

    let digits = rounded.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(c);
    }
    let grouped: String = result.chars().rev().collect();

    if value < 0.0 && rounded != 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format a CAGR that is already in percent, keeping its two decimals
pub fn format_percentage(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    format!("{value:.2}%")
}

/// Short figure for a table cell: whole or rounded values without trailing zeros
pub fn format_cell(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        value.to_string()
    }
}

/// Axis label for a log-scaled value in units of the chart scale
pub fn format_axis_value(value: f64) -> String {
    if value >= 1.0 {
        format_amount(value)
    } else {
        format!("{value:.1}").replace('.', ",")
    }
}
