use serde::{Deserialize, Serialize};

/// Usage of one mounted partition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionInfo {
    pub device: String,
    pub mount_point: String,
    pub filesystem: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub percent_used: f64,
}

impl PartitionInfo {
    /// Builds a partition record, deriving free space and usage percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(
        device: &str,
        mount_point: &str,
        filesystem: &str,
        total_bytes: u64,
        used_bytes: u64,
    ) -> Self {
        let used_bytes = used_bytes.min(total_bytes);
        let percent_used = if total_bytes > 0 {
            (used_bytes as f64 * 100.0) / total_bytes as f64
        } else {
            0.0
        };
        Self {
            device: device.to_string(),
            mount_point: mount_point.to_string(),
            filesystem: filesystem.to_string(),
            total_bytes,
            used_bytes,
            free_bytes: total_bytes - used_bytes,
            percent_used,
        }
    }
}

/// Disk usage across all real partitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskSnapshot {
    pub partitions: Vec<PartitionInfo>,
}

impl DiskSnapshot {
    /// Disk issues are keyed by mount point.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.partitions.iter().any(|p| p.mount_point == field)
    }
}
