//! Plain-text report sections printed to stdout.

use std::fmt::Write as _;

use boxsim_core::analysis::{PeriodStats, WinRateMatrix};
use boxsim_core::model::SeriesSummary;
use boxsim_core::scenarios::StaticRow;

use crate::util::{format_amount, format_cell, format_percentage};

/// Footnote printed under every statistics table
pub const CAGR_FOOTNOTE: &str = "*Compound Annual Growth Rate (CAGR)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Pipe-style markdown table with padded columns
struct MarkdownTable {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    fn new(headers: &[&str], align: Vec<Align>) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            align,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|c| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(c))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(self.headers[c].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let line = |cells: &[String], out: &mut String| {
            out.push('|');
            for (c, cell) in cells.iter().enumerate() {
                let w = widths[c];
                match self.align[c] {
                    Align::Left => {
                        let _ = write!(out, " {cell:<w$} |");
                    }
                    Align::Right => {
                        let _ = write!(out, " {cell:>w$} |");
                    }
                }
            }
            out.push('\n');
        };

        line(&self.headers, &mut out);
        out.push('|');
        for (c, w) in widths.iter().enumerate() {
            let dashes = "-".repeat(*w);
            match self.align[c] {
                Align::Left => {
                    let _ = write!(out, ":{dashes}-|");
                }
                Align::Right => {
                    let _ = write!(out, "-{dashes}:|");
                }
            }
        }
        out.push('\n');
        for row in &self.rows {
            line(row, &mut out);
        }
        out
    }
}

/// Length of the loaded history and time spent near the all-time high
pub fn series_summary(summary: &SeriesSummary) -> String {
    format!(
        "   Period: {:3} years\n5% >= ATH: {:3} years\n      ATH: {:3} years\n",
        summary.period_years, summary.near_ath_years, summary.ath_years
    )
}

/// Heading that opens the report for one holding period
pub fn span_heading(years: usize) -> String {
    format!("\n=== Samples: {years} years ===\n")
}

/// CAGR distribution per system for one holding period
pub fn stats_table(rows: &[(String, PeriodStats)]) -> String {
    let mut align = vec![Align::Left];
    align.extend([Align::Right; 7]);
    let mut table = MarkdownTable::new(
        &["Name", "min*", "10%*", "med*", "avg*", "90%*", "max*", "avg balance"],
        align,
    );

    for (name, stats) in rows {
        table.push(vec![
            name.clone(),
            format_cell(stats.min),
            format_cell(stats.p10),
            format_cell(stats.median),
            format_cell(stats.mean),
            format_cell(stats.p90),
            format_cell(stats.max),
            format!("{:.0}", stats.avg_balance),
        ]);
    }

    let mut out = table.render();
    out.push_str(CAGR_FOOTNOTE);
    out.push('\n');
    out
}

/// Share of windows in which the row system ends above the column system
pub fn win_rate_table(matrix: &WinRateMatrix) -> String {
    let mut headers: Vec<&str> = vec![""];
    headers.extend(matrix.labels.iter().map(String::as_str));
    let mut align = vec![Align::Left];
    align.extend(std::iter::repeat_n(Align::Right, matrix.labels.len()));
    let mut table = MarkdownTable::new(&headers, align);

    for (label, cells) in matrix.labels.iter().zip(&matrix.cells) {
        let mut row = vec![label.clone()];
        row.extend(
            cells
                .iter()
                .map(|cell| cell.map(format_cell).unwrap_or_default()),
        );
        table.push(row);
    }

    format!(
        "Win rate after {} years (% of windows where row beats column)\n{}",
        matrix.year,
        table.render()
    )
}

/// Fixed-return illustration, grouped by span
pub fn static_report(rows: &[StaticRow]) -> String {
    let mut out = String::new();
    let mut current_span = None;

    for row in rows {
        if current_span != Some(row.years) {
            out.push_str(&span_heading(row.years));
            current_span = Some(row.years);
        }
        let _ = writeln!(out, "== {}", row.label);
        for (name, balance, cagr) in [
            ("Balance", row.balance, row.balance_cagr),
            ("Bruto  ", row.bruto_balance, row.bruto_cagr),
            ("Netto  ", row.netto_balance, row.netto_cagr),
        ] {
            let _ = writeln!(
                out,
                "{name}: {:>11}  Yearly Yield: {:>7}",
                format_amount(balance),
                format_percentage(cagr)
            );
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(median: f64) -> PeriodStats {
        PeriodStats {
            years: 5,
            min: -1.5,
            p10: 2.0,
            median,
            mean: 6.25,
            p90: 9.1,
            max: 12.0,
            avg_balance: 135_801.0,
        }
    }

    #[test]
    fn test_stats_table_layout() {
        let table = stats_table(&[
            ("Market".to_string(), stats(7.1)),
            ("Box 3 2028".to_string(), stats(f64::NAN)),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("| Name       |"));
        assert!(lines[1].starts_with("|:-----------|"));
        assert!(lines[2].contains("  7.1 |"));
        assert!(lines[2].ends_with(" 135801 |"));
        assert!(lines[3].contains("nan"));
        assert_eq!(lines[4], CAGR_FOOTNOTE);

        // Every row has the same width
        let width = lines[0].len();
        assert!(lines[..4].iter().all(|l| l.len() == width));
    }

    #[test]
    fn test_win_rate_table_blank_diagonal() {
        let matrix = WinRateMatrix {
            year: 10,
            labels: vec!["A".into(), "B".into()],
            cells: vec![vec![None, Some(62.5)], vec![Some(37.5), None]],
        };
        let text = win_rate_table(&matrix);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Win rate after 10 years"));
        assert_eq!(lines[3], "| A |      | 62.5 |");
        assert_eq!(lines[4], "| B | 37.5 |      |");
    }

    #[test]
    fn test_series_summary() {
        let text = series_summary(&SeriesSummary {
            period_years: 95,
            near_ath_years: 40,
            ath_years: 12,
            annualized_return: 0.1,
        });
        assert_eq!(
            text,
            "   Period:  95 years\n5% >= ATH:  40 years\n      ATH:  12 years\n"
        );
    }

    #[test]
    fn test_static_report_groups_by_span() {
        let row = |label: &str, years| StaticRow {
            label: label.to_string(),
            years,
            balance: 161_051.0,
            bruto_balance: 161_051.0,
            netto_balance: 150_000.0,
            balance_cagr: 10.0,
            bruto_cagr: 10.0,
            netto_cagr: 8.45,
        };
        let text = static_report(&[row("Box 3 2026", 5), row("Box 3 2028", 5), row("Box 3 2026", 10)]);

        assert_eq!(text.matches("=== Samples").count(), 2);
        assert!(text.contains("== Box 3 2028\n"));
        assert!(text.contains("Balance:     161.051  Yearly Yield:  10.00%"));
        assert!(text.contains("Netto  :     150.000  Yearly Yield:   8.45%"));
    }
}
