use thiserror::Error;

use crate::domain::entities::disk::DiskSnapshot;
use crate::domain::entities::network::NetworkSnapshot;
use crate::domain::entities::process::ProcessSnapshot;
use crate::domain::entities::snapshot::{CpuSnapshot, MemorySnapshot};
use crate::domain::entities::system::SystemInfo;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("failed to collect system metrics: {0}")]
    MetricsUnavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("sensor unavailable: {0}")]
    SensorUnavailable(String),
    #[error("timeout while collecting data")]
    Timeout,
}

/// Source of per-subsystem snapshots.
///
/// Each call is independent: one failing subsystem must not prevent the
/// others from being collected.
pub trait MetricsCollector: Send + Sync {
    /// # Errors
    ///
    /// Returns `CollectionError` if host information cannot be read.
    fn system_info(&self) -> Result<SystemInfo, CollectionError>;

    /// # Errors
    ///
    /// Returns `CollectionError` if partition usage cannot be read.
    fn disk(&self) -> Result<DiskSnapshot, CollectionError>;

    /// # Errors
    ///
    /// Returns `CollectionError` if memory counters cannot be read.
    fn memory(&self) -> Result<MemorySnapshot, CollectionError>;

    /// # Errors
    ///
    /// Returns `CollectionError` if CPU usage cannot be sampled.
    fn cpu(&self) -> Result<CpuSnapshot, CollectionError>;

    /// Interface counters only; reachability is filled in by a
    /// [`ReachabilityProbe`](super::probe::ReachabilityProbe).
    ///
    /// # Errors
    ///
    /// Returns `CollectionError` if interface counters cannot be read.
    fn network(&self) -> Result<NetworkSnapshot, CollectionError>;

    /// # Errors
    ///
    /// Returns `CollectionError` if the process table cannot be read.
    fn processes(&self) -> Result<ProcessSnapshot, CollectionError>;
}
