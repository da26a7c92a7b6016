use std::fmt::Write;

use colored::Colorize;
use serde::Serialize;

use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::{Direction, ThresholdPolicy};
use crate::presentation::cli::formatters::report_fmt::section_header;

#[derive(Debug, Serialize)]
struct ThresholdRow<'a> {
    subsystem: Subsystem,
    metric: &'a str,
    direction: Direction,
    warning: f64,
    critical: Option<f64>,
}

fn rows(policy: &ThresholdPolicy) -> Vec<ThresholdRow<'_>> {
    policy
        .entries()
        .map(|(subsystem, metric, limit)| ThresholdRow {
            subsystem,
            metric,
            direction: limit.direction,
            warning: limit.warning,
            critical: limit.critical,
        })
        .collect()
}

#[must_use]
pub fn render_thresholds(policy: &ThresholdPolicy) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<10} {:<22} {:>10} {:>10}",
            "SUBSYSTEM", "METRIC", "WARNING", "CRITICAL"
        )
        .bold()
    );
    for row in rows(policy) {
        let critical = row
            .critical
            .map_or_else(|| "-".to_string(), |c| format!("{} {c}", row.direction));
        let _ = writeln!(
            out,
            "{:<10} {:<22} {:>10} {:>10}",
            row.subsystem.as_str(),
            row.metric,
            format!("{} {}", row.direction, row.warning),
            critical
        );
    }
    out
}

/// Prints the effective policy, built-in limits plus config overrides.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run_thresholds(policy: &ThresholdPolicy, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rows(policy))?);
    } else {
        print!("{}", section_header("Threshold policy"));
        print!("{}", render_thresholds(policy));
    }
    Ok(())
}
