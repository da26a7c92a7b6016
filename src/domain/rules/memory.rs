use crate::domain::entities::issue::Issue;
use crate::domain::entities::snapshot::MemorySnapshot;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::{ThresholdPolicy, metric};

use super::check_limit;

/// RAM usage and, when swap is configured, swap usage.
#[must_use]
pub fn evaluate(snapshot: &MemorySnapshot, policy: &ThresholdPolicy) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(limit) = policy.limit(Subsystem::Memory, metric::PERCENT_USED) {
        issues.extend(check_limit(
            limit,
            Subsystem::Memory,
            metric::PERCENT_USED.to_string(),
            snapshot.percent_used,
            |_, threshold| {
                format!(
                    "Memory usage is {:.1}% ({} of {} used, limit {threshold:.0}%)",
                    snapshot.percent_used,
                    format_bytes(snapshot.used_bytes),
                    format_bytes(snapshot.total_bytes),
                )
            },
        ));
    }

    let swap = snapshot.swap.as_ref().filter(|swap| swap.total_bytes > 0);
    if let (Some(swap), Some(limit)) = (swap, policy.limit(Subsystem::Memory, metric::SWAP_PERCENT))
    {
        issues.extend(check_limit(
            limit,
            Subsystem::Memory,
            metric::SWAP_PERCENT.to_string(),
            swap.percent_used,
            |_, threshold| {
                format!(
                    "High swap usage ({:.1}%, limit {threshold:.0}%): the system may be low on RAM",
                    swap.percent_used
                )
            },
        ));
    }

    issues
}

#[allow(clippy::cast_precision_loss)]
fn format_bytes(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
}
