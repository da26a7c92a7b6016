use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::disk::DiskSnapshot;
use super::issue::Issue;
use super::network::NetworkSnapshot;
use super::process::ProcessSnapshot;
use super::recommendation::Recommendation;
use super::snapshot::{CpuSnapshot, MemorySnapshot, SnapshotSet, SubsystemData};
use super::system::SystemInfo;

/// Version of the serialized report layout. Bump when a field is renamed or
/// removed.
pub const SCHEMA_VERSION: u32 = 1;

/// Final output of one diagnostic run.
///
/// Only the assembler builds reports, so the contained issues and
/// recommendations are known to be consistent with the snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    schema_version: u32,
    timestamp: DateTime<Utc>,
    system_info: SubsystemData<SystemInfo>,
    disk_health: SubsystemData<DiskSnapshot>,
    memory_health: SubsystemData<MemorySnapshot>,
    cpu_health: SubsystemData<CpuSnapshot>,
    network_health: SubsystemData<NetworkSnapshot>,
    process_health: SubsystemData<ProcessSnapshot>,
    issues: Vec<Issue>,
    recommendations: Vec<Recommendation>,
}

impl Report {
    pub(crate) fn from_parts(
        timestamp: DateTime<Utc>,
        snapshots: SnapshotSet,
        issues: Vec<Issue>,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            timestamp,
            system_info: snapshots.system_info,
            disk_health: snapshots.disk,
            memory_health: snapshots.memory,
            cpu_health: snapshots.cpu,
            network_health: snapshots.network,
            process_health: snapshots.process,
            issues,
            recommendations,
        }
    }

    #[must_use]
    pub const fn schema_version(&self) -> u32 {
        self.schema_version
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn system_info(&self) -> &SubsystemData<SystemInfo> {
        &self.system_info
    }

    #[must_use]
    pub const fn disk_health(&self) -> &SubsystemData<DiskSnapshot> {
        &self.disk_health
    }

    #[must_use]
    pub const fn memory_health(&self) -> &SubsystemData<MemorySnapshot> {
        &self.memory_health
    }

    #[must_use]
    pub const fn cpu_health(&self) -> &SubsystemData<CpuSnapshot> {
        &self.cpu_health
    }

    #[must_use]
    pub const fn network_health(&self) -> &SubsystemData<NetworkSnapshot> {
        &self.network_health
    }

    #[must_use]
    pub const fn process_health(&self) -> &SubsystemData<ProcessSnapshot> {
        &self.process_health
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }
}
