//! SVG line charts of simulated balances.
//!
//! Balances are plotted in units of [`SCALE`] on a logarithmic y-axis, one
//! colour per system. Non-positive values cannot be shown on a log axis and
//! are left out of the line.

use std::fmt::Write as _;

use boxsim_core::analysis::{median, percentile};
use boxsim_core::model::{ComparisonSet, SimulationResult};

use crate::util::format_axis_value;

/// Balances are divided by this before plotting
pub const SCALE: f64 = 100_000.0;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;
const BAND_OPACITY: f64 = 0.15;

const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

struct Line {
    color: &'static str,
    dash: Option<&'static str>,
    opacity: f64,
    width: f64,
    points: Vec<(usize, f64)>,
}

struct LegendEntry {
    label: String,
    color: &'static str,
    dash: Option<&'static str>,
}

/// Per-year statistic of one system, scaled and restricted to positive values
fn yearly(result: &SimulationResult, stat: impl Fn(&[f64]) -> Option<f64>) -> Vec<(usize, f64)> {
    result
        .years()
        .filter_map(|year| {
            let value = stat(result.balances_for_year(year)?)? / SCALE;
            (value > 0.0 && value.is_finite()).then_some((year, value))
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 1, 2 and 5 times each power of ten inside `[min, max]`
fn log_ticks(min: f64, max: f64) -> Vec<f64> {
    let mut ticks = Vec::new();
    let first = min.log10().floor() as i32;
    let last = max.log10().ceil() as i32;
    for exp in first..=last {
        for mantissa in [1.0, 2.0, 5.0] {
            let tick = mantissa * 10f64.powi(exp);
            if tick >= min && tick <= max {
                ticks.push(tick);
            }
        }
    }
    ticks
}

fn render(title: &str, x_label: &str, lines: &[Line], legend: &[LegendEntry]) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let values = lines.iter().flat_map(|l| l.points.iter().map(|(_, v)| *v));
    let (mut min_v, mut max_v) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let max_year = lines
        .iter()
        .flat_map(|l| l.points.iter().map(|(y, _)| *y))
        .max()
        .unwrap_or(1)
        .max(1);
    if !min_v.is_finite() {
        min_v = 0.1;
        max_v = 10.0;
    }
    if min_v == max_v {
        min_v /= 2.0;
        max_v *= 2.0;
    }
    let (log_min, log_max) = (min_v.log10(), max_v.log10());

    let x_of = |year: usize| MARGIN_LEFT + year as f64 / max_year as f64 * plot_w;
    let y_of = |value: f64| MARGIN_TOP + (log_max - value.log10()) / (log_max - log_min) * plot_h;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="{WIDTH}" height="{HEIGHT}"><style>text{{font-family:Arial,sans-serif;font-size:11px;fill:#333}}</style>"#
    );
    let _ = write!(svg, r##"<rect width="{WIDTH}" height="{HEIGHT}" fill="#ffffff" />"##);
    let _ = write!(
        svg,
        r#"<text x="{:.2}" y="22" text-anchor="middle" font-size="14">{}</text>"#,
        WIDTH / 2.0,
        escape(title)
    );

    // Horizontal grid and y labels
    for tick in log_ticks(min_v, max_v) {
        let y = y_of(tick);
        let _ = write!(
            svg,
            r##"<line x1="{MARGIN_LEFT:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="#dddddd" stroke-width="0.5" />"##,
            MARGIN_LEFT + plot_w
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{y:.2}" text-anchor="end" dy="4">{}</text>"#,
            MARGIN_LEFT - 6.0,
            format_axis_value(tick)
        );
    }

    // Vertical grid and year labels
    let step = if max_year <= 10 { 1 } else { 5 };
    for year in (0..=max_year).step_by(step) {
        let x = x_of(year);
        let _ = write!(
            svg,
            r##"<line x1="{x:.2}" y1="{MARGIN_TOP:.2}" x2="{x:.2}" y2="{:.2}" stroke="#eeeeee" stroke-width="0.5" />"##,
            MARGIN_TOP + plot_h
        );
        let _ = write!(
            svg,
            r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle">{year}</text>"#,
            MARGIN_TOP + plot_h + 16.0
        );
    }

    // Axes
    let _ = write!(
        svg,
        r##"<line x1="{MARGIN_LEFT:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#000" stroke-width="1" />"##,
        MARGIN_TOP + plot_h,
        MARGIN_LEFT + plot_w,
        MARGIN_TOP + plot_h
    );
    let _ = write!(
        svg,
        r##"<line x1="{MARGIN_LEFT:.2}" y1="{MARGIN_TOP:.2}" x2="{MARGIN_LEFT:.2}" y2="{:.2}" stroke="#000" stroke-width="1" />"##,
        MARGIN_TOP + plot_h
    );
    let _ = write!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 10.0,
        escape(x_label)
    );
    let _ = write!(
        svg,
        r#"<text x="16" y="{:.2}" text-anchor="middle" transform="rotate(-90 16 {:.2})">Balance x{} (LOG)</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0,
        format_axis_value(SCALE)
    );

    for line in lines {
        if line.points.is_empty() {
            continue;
        }
        let points = line
            .points
            .iter()
            .map(|(year, value)| format!("{:.2},{:.2}", x_of(*year), y_of(*value)))
            .collect::<Vec<_>>()
            .join(" ");
        let dash = line
            .dash
            .map(|d| format!(r#" stroke-dasharray="{d}""#))
            .unwrap_or_default();
        let _ = write!(
            svg,
            r#"<polyline fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}"{dash} points="{points}" />"#,
            line.color, line.width, line.opacity
        );
    }

    // Legend, top left inside the plot
    for (i, entry) in legend.iter().enumerate() {
        let y = MARGIN_TOP + 14.0 + i as f64 * 16.0;
        let x = MARGIN_LEFT + 12.0;
        let dash = entry
            .dash
            .map(|d| format!(r#" stroke-dasharray="{d}""#))
            .unwrap_or_default();
        let _ = write!(
            svg,
            r#"<line x1="{x:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{}" stroke-width="2"{dash} />"#,
            x + 22.0,
            entry.color
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{y:.2}" dy="4">{}</text>"#,
            x + 28.0,
            escape(&entry.label)
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Median netto balance per system per year
pub fn median_chart(set: &ComparisonSet) -> String {
    let mut lines = Vec::new();
    let mut legend = Vec::new();
    for (i, (label, result)) in set.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        lines.push(Line {
            color,
            dash: None,
            opacity: 1.0,
            width: 1.8,
            points: yearly(result, median),
        });
        legend.push(LegendEntry {
            label: label.to_string(),
            color,
            dash: None,
        });
    }
    render("Median balances", "Years", &lines, &legend)
}

/// Median per system with dotted 10% and dashed 90% percentile lines in the same colour
pub fn interval_chart(set: &ComparisonSet) -> String {
    let mut lines = Vec::new();
    let mut legend = Vec::new();
    for (i, (label, result)) in set.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        lines.push(Line {
            color,
            dash: Some("2 3"),
            opacity: BAND_OPACITY,
            width: 1.5,
            points: yearly(result, |b| percentile(b, 10.0)),
        });
        lines.push(Line {
            color,
            dash: Some("8 4"),
            opacity: BAND_OPACITY,
            width: 1.5,
            points: yearly(result, |b| percentile(b, 90.0)),
        });
        lines.push(Line {
            color,
            dash: None,
            opacity: 1.0,
            width: 1.8,
            points: yearly(result, median),
        });
        legend.push(LegendEntry {
            label: label.to_string(),
            color,
            dash: None,
        });
    }
    legend.push(LegendEntry {
        label: "10%".to_string(),
        color: "#808080",
        dash: Some("2 3"),
    });
    legend.push(LegendEntry {
        label: "90%".to_string(),
        color: "#808080",
        dash: Some("8 4"),
    });
    render(
        "Median balances, with 10%-90% intervals",
        "Years",
        &lines,
        &legend,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ComparisonSet {
        let mut market = SimulationResult::new();
        let mut taxed = SimulationResult::new();
        for growth in [1.05, 1.08, 1.10] {
            market.push_trajectory(&[100_000.0 * growth, 100_000.0 * growth * growth]);
            taxed.push_trajectory(&[99_000.0 * growth, 98_000.0 * growth * growth]);
        }
        let mut set = ComparisonSet::new();
        set.insert("Market", market);
        set.insert("Box 3 26 > Box 3 28", taxed);
        set
    }

    #[test]
    fn test_log_ticks() {
        assert_eq!(log_ticks(0.8, 12.0), vec![1.0, 2.0, 5.0, 10.0]);
        assert_eq!(log_ticks(3.0, 4.0), Vec::<f64>::new());
    }

    #[test]
    fn test_median_chart_has_one_line_per_system() {
        let svg = median_chart(&sample_set());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("Median balances"));
        // Labels are escaped
        assert!(svg.contains("Box 3 26 &gt; Box 3 28"));
    }

    #[test]
    fn test_interval_chart_adds_percentile_lines_and_legend() {
        let svg = interval_chart(&sample_set());
        assert_eq!(svg.matches("<polyline").count(), 6);
        assert_eq!(svg.matches(r#"stroke-opacity="0.15""#).count(), 4);
        assert!(svg.contains(">10%</text>"));
        assert!(svg.contains(">90%</text>"));
    }

    #[test]
    fn test_negative_balances_are_dropped() {
        let mut result = SimulationResult::new();
        result.push_trajectory(&[-5.0, 200_000.0]);
        let points = yearly(&result, median);
        assert_eq!(points, vec![(2, 2.0)]);
    }

    #[test]
    fn test_empty_set_renders() {
        let svg = median_chart(&ComparisonSet::new());
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 0);
    }
}
