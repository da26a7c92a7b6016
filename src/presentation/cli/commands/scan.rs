use std::path::PathBuf;

use anyhow::Context;

use crate::application::services::diagnostic::DiagnosticService;
use crate::domain::entities::report::Report;
use crate::infrastructure::persistence::report_file::ReportWriter;
use crate::presentation::cli::formatters::report_fmt;

/// Output options of `vitals scan`.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub json: bool,
    pub output: Option<PathBuf>,
    pub save: bool,
}

impl ScanOptions {
    const fn persists(&self) -> bool {
        self.save || self.output.is_some()
    }
}

/// Runs one diagnostic, prints it and optionally saves it.
///
/// # Errors
///
/// Returns an error if the engine produced an inconsistent report, if JSON
/// serialization fails, or if the report file cannot be written.
pub async fn run_scan(
    service: &DiagnosticService<'_>,
    writer: &ReportWriter,
    options: &ScanOptions,
) -> anyhow::Result<Report> {
    let report = service.run().await.context("Diagnostic run failed")?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report_fmt::print_report(&report, service.policy());
    }

    if options.persists() {
        let path = writer.save(&report, options.output.as_deref())?;
        // stdout stays pure JSON in --json mode
        if options.json {
            eprintln!("Report saved to: {}", path.display());
        } else {
            println!("\nReport saved to: {}", path.display());
        }
    }

    Ok(report)
}
