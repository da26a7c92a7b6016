use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vitals::application::config::AppConfig;
use vitals::application::services::diagnostic::DiagnosticService;
use vitals::infrastructure::collectors::{PingProbe, SysinfoCollector};
use vitals::infrastructure::persistence::ReportWriter;
use vitals::presentation::cli::app::{Cli, Commands};
use vitals::presentation::cli::commands::scan::{ScanOptions, run_scan};
use vitals::presentation::cli::commands::thresholds::run_thresholds;

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    if let Some(ref path) = cli.config {
        return AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }
    // A missing or unwritable default location must not block a scan.
    Ok(AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Using built-in defaults: {e:#}");
        AppConfig::default()
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let policy = config.policy().context("Invalid threshold configuration")?;

    match cli.command.unwrap_or_else(Commands::default_scan) {
        Commands::Thresholds { json } => run_thresholds(&policy, json)?,
        Commands::Scan { json, output, save } => {
            // Manual DI: main.rs is the only place that knows concrete types
            let collector = SysinfoCollector::new();
            let probe = PingProbe::new(config.probe_timeout());
            let service = DiagnosticService::new(&collector, &probe, &policy, config.probe_plan());
            let writer = ReportWriter::new(config.report.output_dir.clone());

            let options = ScanOptions { json, output, save };
            run_scan(&service, &writer, &options).await?;
        }
    }

    Ok(())
}
