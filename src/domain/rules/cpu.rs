use crate::domain::entities::issue::Issue;
use crate::domain::entities::snapshot::CpuSnapshot;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::{ThresholdPolicy, metric};

use super::check_limit;

/// Overall usage, each core independently, and every temperature sensor.
#[must_use]
pub fn evaluate(snapshot: &CpuSnapshot, policy: &ThresholdPolicy) -> Vec<Issue> {
    let mut issues = Vec::new();

    if let Some(limit) = policy.limit(Subsystem::Cpu, metric::USAGE_PERCENT) {
        issues.extend(check_limit(
            limit,
            Subsystem::Cpu,
            metric::USAGE_PERCENT.to_string(),
            snapshot.usage_percent,
            |_, threshold| {
                format!(
                    "CPU usage is {:.1}% across {} cores (limit {threshold:.0}%)",
                    snapshot.usage_percent, snapshot.core_count
                )
            },
        ));
    }

    if let Some(limit) = policy.limit(Subsystem::Cpu, metric::CORE_PERCENT) {
        for (index, &usage) in snapshot.per_core_percent.iter().enumerate() {
            issues.extend(check_limit(
                limit,
                Subsystem::Cpu,
                CpuSnapshot::core_field(index),
                usage,
                |_, threshold| format!("Core {index} is at {usage:.1}% (limit {threshold:.0}%)"),
            ));
        }
    }

    if let Some(&limit) = policy.limit(Subsystem::Cpu, metric::TEMPERATURE_CELSIUS) {
        for reading in &snapshot.temperatures {
            // A sensor's own critical point wins when it is stricter.
            let limit = reading
                .critical_celsius
                .map_or(limit, |critical| limit.tightened(critical));
            issues.extend(check_limit(
                &limit,
                Subsystem::Cpu,
                reading.field(),
                reading.celsius,
                |_, threshold| {
                    format!(
                        "Temperature of {} is {:.1}°C (limit {threshold:.0}°C)",
                        reading.label, reading.celsius
                    )
                },
            ));
        }
    }

    issues
}
