use std::sync::Mutex;

use sysinfo::Disks;

use crate::domain::entities::disk::{DiskSnapshot, PartitionInfo};
use crate::domain::ports::collector::CollectionError;

/// Filesystem types to exclude from disk metrics.
const PSEUDO_FILESYSTEMS: &[&str] = &[
    "tmpfs",
    "devtmpfs",
    "sysfs",
    "proc",
    "cgroup2",
    "overlay",
    "squashfs",
    "efivarfs",
    "bpf",
    "hugetlbfs",
    "mqueue",
    "pstore",
    "securityfs",
    "debugfs",
    "tracefs",
    "fusectl",
    "rpc_pipefs",
];

fn is_real_filesystem(filesystem: &str, total_bytes: u64) -> bool {
    !PSEUDO_FILESYSTEMS.contains(&filesystem) && total_bytes > 0
}

/// Collects partition usage using the `sysinfo` crate.
///
/// Pseudo-filesystems and zero-size mounts are skipped. Partitions are
/// returned in mount point order.
pub struct DiskCollector {
    disks: Mutex<Disks>,
}

impl DiskCollector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            disks: Mutex::new(Disks::new_with_refreshed_list()),
        }
    }

    /// Refreshes the mount list and reads usage of every real partition.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::MetricsUnavailable` if the internal mutex is poisoned.
    pub fn collect(&self) -> Result<DiskSnapshot, CollectionError> {
        let mut disks = self
            .disks
            .lock()
            .map_err(|e| CollectionError::MetricsUnavailable(format!("disk lock poisoned: {e}")))?;
        disks.refresh(true);

        let mut partitions: Vec<PartitionInfo> = disks
            .iter()
            .filter(|d| is_real_filesystem(&d.file_system().to_string_lossy(), d.total_space()))
            .map(|disk| {
                let total = disk.total_space();
                let used = total.saturating_sub(disk.available_space());
                PartitionInfo::new(
                    &disk.name().to_string_lossy(),
                    &disk.mount_point().to_string_lossy(),
                    &disk.file_system().to_string_lossy(),
                    total,
                    used,
                )
            })
            .collect();
        partitions.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
        partitions.dedup_by(|a, b| a.mount_point == b.mount_point);

        Ok(DiskSnapshot { partitions })
    }
}

impl Default for DiskCollector {
    fn default() -> Self {
        Self::new()
    }
}
