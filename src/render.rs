//! Console rendering of a finished report.

use crate::error::Result;
use crate::types::{RankedEntry, Report};

pub const HIGHEST_HEADING: &str = "Highest volatility:";
pub const LOWEST_HEADING: &str = "Lowest volatility:";
pub const ZERO_HEADING: &str = "Zero volatility:";

/// Format a percentage with at least one decimal place (`40.0`, `9.52`).
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn entry_line(entry: &RankedEntry) -> String {
    format!("{} - {} %", entry.instrument, format_percent(entry.volatility))
}

/// Render the report as plain text.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    match report {
        Report::Flat(ranked) => {
            for entry in ranked {
                out.push_str(&entry_line(entry));
                out.push('\n');
            }
        }
        Report::Buckets(buckets) => {
            push_section(&mut out, HIGHEST_HEADING, &buckets.highest);
            push_section(&mut out, LOWEST_HEADING, &buckets.lowest);
            out.push_str(ZERO_HEADING);
            out.push('\n');
            if !buckets.zero.is_empty() {
                out.push_str(&format!("\t{}\n", buckets.zero.join(", ")));
            }
        }
    }

    out
}

fn push_section(out: &mut String, heading: &str, entries: &[RankedEntry]) {
    out.push_str(heading);
    out.push('\n');
    for entry in entries {
        out.push_str(&format!("\t{}\n", entry_line(entry)));
    }
}

/// Render the report as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
