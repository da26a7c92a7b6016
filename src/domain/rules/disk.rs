use crate::domain::entities::disk::DiskSnapshot;
use crate::domain::entities::issue::Issue;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::{ThresholdPolicy, metric};

use super::check_limit;

/// One issue per partition whose usage crosses the disk limit.
#[must_use]
pub fn evaluate(snapshot: &DiskSnapshot, policy: &ThresholdPolicy) -> Vec<Issue> {
    let Some(limit) = policy.limit(Subsystem::Disk, metric::PERCENT_USED) else {
        return Vec::new();
    };

    snapshot
        .partitions
        .iter()
        .filter_map(|partition| {
            check_limit(
                limit,
                Subsystem::Disk,
                partition.mount_point.clone(),
                partition.percent_used,
                |_, threshold| {
                    format!(
                        "{} ({}) is {:.1}% full, {:.1} GB free (limit {threshold:.0}%)",
                        partition.device,
                        partition.mount_point,
                        partition.percent_used,
                        bytes_to_gb(partition.free_bytes),
                    )
                },
            )
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / 1_073_741_824.0
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::entities::disk::PartitionInfo;
    use crate::domain::value_objects::severity::Severity;
    use crate::domain::value_objects::thresholds::Limit;

    fn make_disk(mount_point: &str, used_per_thousand: u64) -> PartitionInfo {
        PartitionInfo::new("/dev/sda1", mount_point, "ext4", 1000, used_per_thousand)
    }

    fn make_snapshot(partitions: Vec<PartitionInfo>) -> DiskSnapshot {
        DiskSnapshot { partitions }
    }

    #[test]
    fn no_issue_when_disks_healthy() {
        let snapshot = make_snapshot(vec![make_disk("/", 500)]);
        let issues = evaluate(&snapshot, &ThresholdPolicy::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn warning_at_exact_warning_threshold() {
        let snapshot = make_snapshot(vec![make_disk("/", 900)]);
        let issues = evaluate(&snapshot, &ThresholdPolicy::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].field, "/");
        assert!((issues[0].threshold - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn only_critical_at_exact_critical_threshold() {
        let snapshot = make_snapshot(vec![make_disk("/", 970)]);
        let issues = evaluate(&snapshot, &ThresholdPolicy::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert!((issues[0].threshold - 97.0).abs() < f64::EPSILON);
    }

    #[test]
    fn each_partition_is_evaluated_independently() {
        let snapshot = make_snapshot(vec![
            make_disk("/", 950),
            make_disk("/home", 200),
            make_disk("/var", 990),
        ]);
        let issues = evaluate(&snapshot, &ThresholdPolicy::default());
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "/");
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[1].field, "/var");
        assert_eq!(issues[1].severity, Severity::Critical);
    }

    #[test]
    fn no_issue_when_no_partitions() {
        let issues = evaluate(&make_snapshot(vec![]), &ThresholdPolicy::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn message_names_device_and_mount_point() {
        let snapshot = make_snapshot(vec![make_disk("/data", 950)]);
        let issues = evaluate(&snapshot, &ThresholdPolicy::default());
        assert!(issues[0].message.contains("/dev/sda1 (/data)"));
        assert!(issues[0].message.contains("95.0% full"));
    }

    #[test]
    fn respects_overridden_policy() {
        let policy = ThresholdPolicy::default()
            .with_override(Subsystem::Disk, metric::PERCENT_USED, Limit::above(40.0, 60.0))
            .expect("valid override");
        let snapshot = make_snapshot(vec![make_disk("/", 500)]);
        let issues = evaluate(&snapshot, &policy);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
