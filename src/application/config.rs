use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::services::diagnostic::ProbePlan;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::{ConfigError, Direction, Limit, ThresholdPolicy};

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    /// Overrides keyed by subsystem, then metric, folded onto the built-in
    /// policy.
    #[serde(default)]
    pub thresholds: BTreeMap<String, BTreeMap<String, LimitOverride>>,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// General settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

/// One `[thresholds.<subsystem>.<metric>]` table. A missing `critical` makes
/// the metric warning-only; a missing `direction` keeps the built-in one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitOverride {
    pub warning: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// Reachability probes run during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_true")]
    pub probe_localhost: bool,
    /// Interface name → host pinged through that interface.
    #[serde(default)]
    pub interface_probes: BTreeMap<String, String>,
}

/// Where saved reports go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

// --- Defaults ---

const fn default_probe_timeout() -> u64 {
    5
}

const fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_localhost: default_true(),
            interface_probes: BTreeMap::new(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("vitals").join("config.toml"))
    }

    /// Builds the threshold policy: built-in limits with every
    /// `[thresholds]` entry applied on top.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown subsystem or metric, a
    /// non-finite value, or a warning limit that is not looser than its
    /// critical limit.
    pub fn policy(&self) -> Result<ThresholdPolicy, ConfigError> {
        let mut policy = ThresholdPolicy::default_policy();
        for (subsystem_name, metrics) in &self.thresholds {
            let subsystem: Subsystem = subsystem_name
                .parse()
                .map_err(ConfigError::UnknownSubsystem)?;
            for (field, over) in metrics {
                let direction = match over.direction {
                    Some(direction) => direction,
                    None => policy
                        .limit(subsystem, field)
                        .map_or(Direction::Above, |l| l.direction),
                };
                let limit = Limit {
                    warning: over.warning,
                    critical: over.critical,
                    direction,
                };
                policy = policy.with_override(subsystem, field, limit)?;
            }
        }
        Ok(policy)
    }

    #[must_use]
    pub fn probe_plan(&self) -> ProbePlan {
        ProbePlan {
            localhost: self.network.probe_localhost,
            interfaces: self.network.interface_probes.clone(),
        }
    }

    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.general.probe_timeout_secs)
    }
}
