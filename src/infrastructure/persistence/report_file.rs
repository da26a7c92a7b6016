use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::domain::entities::report::Report;

/// Writes reports as pretty-printed JSON files.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// `diagnostic_report_<YYYYmmdd_HHMMSS>.json`, using the report's
    /// timestamp in local time.
    #[must_use]
    pub fn default_file_name(report: &Report) -> String {
        let local = report.timestamp().with_timezone(&Local);
        format!("diagnostic_report_{}.json", local.format("%Y%m%d_%H%M%S"))
    }

    /// Saves `report` to `path`, or to the default file name inside the
    /// output directory. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, serialization
    /// fails, or the file cannot be written.
    pub fn save(&self, report: &Report, path: Option<&Path>) -> Result<PathBuf> {
        let path = path.map_or_else(
            || self.output_dir.join(Self::default_file_name(report)),
            Path::to_path_buf,
        );
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create report directory")?;
        }

        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!("Report saved to {}", path.display());
        Ok(path)
    }

    /// Reads a previously saved report.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid report.
    pub fn load(path: &Path) -> Result<Report> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {}", path.display()))?;
        serde_json::from_str(&content).context("Failed to parse report")
    }
}
