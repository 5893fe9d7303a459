//! Rendering of the per-task time report.

use std::io::Write;

use anyhow::Result;
use ti_core::Report;

/// Writes one aligned line per task followed by the grand total.
///
/// Spans that format as empty are spelled out (`0 seconds`, `less than a
/// minute`) so no line ends on a bare label.
///
/// ```text
/// docs    ∙∙ 2 hours & 5 minutes ← working
/// review  ∙∙ 40 minutes
/// You worked in total: 2 hours & 45 minutes
/// ```
pub fn write_report<W: Write>(writer: &mut W, report: &Report) -> Result<()> {
    if report.is_empty() {
        writeln!(writer, "No work recorded.")?;
        return Ok(());
    }

    let width = report
        .rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0);

    for row in &report.rows {
        let mut spent = row.formatted();
        if spent.is_empty() {
            spent = "0 seconds".to_string();
        }
        let marker = if row.running { " ← working" } else { "" };
        writeln!(writer, "{:<width$} ∙∙ {spent}{marker}", row.name)?;
    }

    let mut total = report.formatted_total();
    if total.is_empty() {
        total = "less than a minute".to_string();
    }
    writeln!(writer, "You worked in total: {total}")?;
    Ok(())
}
