use serde::{Deserialize, Serialize};

use super::disk::DiskSnapshot;
use super::network::NetworkSnapshot;
use super::process::ProcessSnapshot;
use super::system::SystemInfo;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::metric;

/// Swap usage, only present when the host has swap configured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapInfo {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent_used: f64,
}

/// System memory usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub percent_used: f64,
    #[serde(default)]
    pub swap: Option<SwapInfo>,
}

impl MemorySnapshot {
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        field == metric::PERCENT_USED || (field == metric::SWAP_PERCENT && self.swap.is_some())
    }
}

/// One temperature sensor reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub label: String,
    pub celsius: f64,
    /// Critical point reported by the sensor itself, if any.
    #[serde(default)]
    pub critical_celsius: Option<f64>,
}

impl TemperatureReading {
    #[must_use]
    pub fn field(&self) -> String {
        format!("temperature:{}", self.label)
    }
}

/// CPU usage information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub usage_percent: f64,
    pub per_core_percent: Vec<f64>,
    pub core_count: usize,
    #[serde(default)]
    pub frequency_mhz: Option<u64>,
    #[serde(default)]
    pub temperatures: Vec<TemperatureReading>,
}

impl CpuSnapshot {
    #[must_use]
    pub fn core_field(index: usize) -> String {
        format!("core_{index}")
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        if field == metric::USAGE_PERCENT {
            return true;
        }
        if let Some(index) = field.strip_prefix("core_") {
            return index
                .parse::<usize>()
                .is_ok_and(|i| i < self.per_core_percent.len());
        }
        self.temperatures.iter().any(|t| t.field() == field)
    }
}

/// Outcome of collecting one subsystem: either its snapshot or the reason it
/// is missing from this run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubsystemData<T> {
    Available(T),
    Unavailable { note: String },
}

impl<T> SubsystemData<T> {
    #[must_use]
    pub const fn available(&self) -> Option<&T> {
        match self {
            Self::Available(data) => Some(data),
            Self::Unavailable { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    #[must_use]
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable { note } => Some(note),
        }
    }

    pub fn unavailable(note: impl Into<String>) -> Self {
        Self::Unavailable { note: note.into() }
    }
}

/// Every snapshot gathered during one diagnostic run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSet {
    pub system_info: SubsystemData<SystemInfo>,
    pub disk: SubsystemData<DiskSnapshot>,
    pub memory: SubsystemData<MemorySnapshot>,
    pub cpu: SubsystemData<CpuSnapshot>,
    pub network: SubsystemData<NetworkSnapshot>,
    pub process: SubsystemData<ProcessSnapshot>,
}

impl SnapshotSet {
    #[must_use]
    pub const fn has_subsystem(&self, subsystem: Subsystem) -> bool {
        match subsystem {
            Subsystem::Disk => self.disk.is_available(),
            Subsystem::Memory => self.memory.is_available(),
            Subsystem::Cpu => self.cpu.is_available(),
            Subsystem::Network => self.network.is_available(),
            Subsystem::Process => self.process.is_available(),
        }
    }

    /// Whether `field` names something present in the subsystem's snapshot.
    #[must_use]
    pub fn has_field(&self, subsystem: Subsystem, field: &str) -> bool {
        match subsystem {
            Subsystem::Disk => self.disk.available().is_some_and(|s| s.has_field(field)),
            Subsystem::Memory => self.memory.available().is_some_and(|s| s.has_field(field)),
            Subsystem::Cpu => self.cpu.available().is_some_and(|s| s.has_field(field)),
            Subsystem::Network => self.network.available().is_some_and(|s| s.has_field(field)),
            Subsystem::Process => self.process.available().is_some_and(|s| s.has_field(field)),
        }
    }

    /// Subsystems whose collection failed, with the recorded note.
    #[must_use]
    pub fn unavailable(&self) -> Vec<(Subsystem, &str)> {
        [
            (Subsystem::Disk, self.disk.note()),
            (Subsystem::Memory, self.memory.note()),
            (Subsystem::Cpu, self.cpu.note()),
            (Subsystem::Network, self.network.note()),
            (Subsystem::Process, self.process.note()),
        ]
        .into_iter()
        .filter_map(|(subsystem, note)| note.map(|n| (subsystem, n)))
        .collect()
    }
}
