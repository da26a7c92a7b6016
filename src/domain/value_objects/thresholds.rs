use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::severity::Severity;
use super::subsystem::Subsystem;

/// Metric keys understood by the default policy.
pub mod metric {
    pub const PERCENT_USED: &str = "percent_used";
    pub const SWAP_PERCENT: &str = "swap_percent";
    pub const USAGE_PERCENT: &str = "usage_percent";
    pub const CORE_PERCENT: &str = "core_percent";
    pub const TEMPERATURE_CELSIUS: &str = "temperature_celsius";
    pub const CPU_PERCENT: &str = "cpu_percent";
    pub const MEMORY_PERCENT: &str = "memory_percent";
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown subsystem '{0}'")]
    UnknownSubsystem(String),
    #[error("no threshold named '{field}' for subsystem {subsystem}")]
    UnknownLimit { subsystem: Subsystem, field: String },
    #[error("threshold {subsystem}.{field} must be a finite number")]
    NonFinite { subsystem: Subsystem, field: String },
    #[error(
        "threshold {subsystem}.{field}: warning limit {warning} must be looser than critical limit {critical}"
    )]
    InvertedLimits {
        subsystem: Subsystem,
        field: String,
        warning: f64,
        critical: f64,
    },
}

/// Which side of a limit counts as a breach.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Values at or above the limit breach it.
    Above,
    /// Values at or below the limit breach it.
    Below,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Above => write!(f, ">="),
            Self::Below => write!(f, "<="),
        }
    }
}

/// Warning and optional critical limit for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub warning: f64,
    pub critical: Option<f64>,
    pub direction: Direction,
}

impl Limit {
    #[must_use]
    pub const fn above(warning: f64, critical: f64) -> Self {
        Self {
            warning,
            critical: Some(critical),
            direction: Direction::Above,
        }
    }

    #[must_use]
    pub const fn warning_above(warning: f64) -> Self {
        Self {
            warning,
            critical: None,
            direction: Direction::Above,
        }
    }

    /// Returns a copy whose critical limit is the stricter of the current one
    /// and `critical`.
    #[must_use]
    pub fn tightened(self, critical: f64) -> Self {
        let critical = match (self.critical, self.direction) {
            (Some(current), Direction::Above) => current.min(critical),
            (Some(current), Direction::Below) => current.max(critical),
            (None, _) => critical,
        };
        Self {
            critical: Some(critical),
            ..self
        }
    }

    /// Inclusive comparison against a single limit.
    #[must_use]
    pub fn breaches(&self, value: f64, limit: f64) -> bool {
        match self.direction {
            Direction::Above => value >= limit,
            Direction::Below => value <= limit,
        }
    }

    /// Classifies `value`, returning the most severe tier crossed together
    /// with the limit that was crossed.
    #[must_use]
    pub fn classify(&self, value: f64) -> Option<(Severity, f64)> {
        if let Some(critical) = self.critical
            && self.breaches(value, critical)
        {
            return Some((Severity::Critical, critical));
        }
        self.breaches(value, self.warning)
            .then_some((Severity::Warning, self.warning))
    }

    fn validate(&self, subsystem: Subsystem, field: &str) -> Result<(), ConfigError> {
        let finite = self.warning.is_finite() && self.critical.is_none_or(f64::is_finite);
        if !finite {
            return Err(ConfigError::NonFinite {
                subsystem,
                field: field.to_string(),
            });
        }
        if let Some(critical) = self.critical {
            let looser = match self.direction {
                Direction::Above => self.warning < critical,
                Direction::Below => self.warning > critical,
            };
            if !looser {
                return Err(ConfigError::InvertedLimits {
                    subsystem,
                    field: field.to_string(),
                    warning: self.warning,
                    critical,
                });
            }
        }
        Ok(())
    }
}

/// Immutable set of limits keyed by (subsystem, metric).
///
/// Overrides produce a new policy, so one instance can be shared by every
/// evaluator of a run without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdPolicy {
    limits: BTreeMap<(Subsystem, String), Limit>,
}

impl ThresholdPolicy {
    /// Built-in limits:
    ///
    /// | subsystem | metric | warning | critical |
    /// |-----------|--------|---------|----------|
    /// | disk | `percent_used` | 90 | 97 |
    /// | memory | `percent_used` | 85 | 95 |
    /// | memory | `swap_percent` | 50 | 80 |
    /// | cpu | `usage_percent` | 90 | 98 |
    /// | cpu | `core_percent` | 90 | 98 |
    /// | cpu | `temperature_celsius` | 80 | 90 |
    /// | process | `cpu_percent` | 80 | - |
    /// | process | `memory_percent` | 10 | - |
    #[must_use]
    pub fn default_policy() -> Self {
        let entries = [
            (Subsystem::Disk, metric::PERCENT_USED, Limit::above(90.0, 97.0)),
            (Subsystem::Memory, metric::PERCENT_USED, Limit::above(85.0, 95.0)),
            (Subsystem::Memory, metric::SWAP_PERCENT, Limit::above(50.0, 80.0)),
            (Subsystem::Cpu, metric::USAGE_PERCENT, Limit::above(90.0, 98.0)),
            (Subsystem::Cpu, metric::CORE_PERCENT, Limit::above(90.0, 98.0)),
            (Subsystem::Cpu, metric::TEMPERATURE_CELSIUS, Limit::above(80.0, 90.0)),
            (Subsystem::Process, metric::CPU_PERCENT, Limit::warning_above(80.0)),
            (Subsystem::Process, metric::MEMORY_PERCENT, Limit::warning_above(10.0)),
        ];
        Self {
            limits: entries
                .into_iter()
                .map(|(subsystem, field, limit)| ((subsystem, field.to_string()), limit))
                .collect(),
        }
    }

    /// Returns a new policy with the limit for `(subsystem, field)` replaced.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the policy has no such limit, if a value is
    /// not finite, or if the warning limit is not strictly looser than the
    /// critical one.
    pub fn with_override(
        &self,
        subsystem: Subsystem,
        field: &str,
        limit: Limit,
    ) -> Result<Self, ConfigError> {
        let key = (subsystem, field.to_string());
        if !self.limits.contains_key(&key) {
            return Err(ConfigError::UnknownLimit {
                subsystem,
                field: field.to_string(),
            });
        }
        limit.validate(subsystem, field)?;

        let mut limits = self.limits.clone();
        limits.insert(key, limit);
        Ok(Self { limits })
    }

    #[must_use]
    pub fn limit(&self, subsystem: Subsystem, field: &str) -> Option<&Limit> {
        self.limits.get(&(subsystem, field.to_string()))
    }

    /// Iterates limits in (subsystem, metric) order.
    pub fn entries(&self) -> impl Iterator<Item = (Subsystem, &str, &Limit)> {
        self.limits
            .iter()
            .map(|((subsystem, field), limit)| (*subsystem, field.as_str(), limit))
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::default_policy()
    }
}
