use crate::domain::entities::issue::Issue;
use crate::domain::entities::process::ProcessSnapshot;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::{ThresholdPolicy, metric};

/// Flags individual processes; usage is never summed across processes.
/// Process issues are always warnings, only the warning limit is consulted.
#[must_use]
pub fn evaluate(snapshot: &ProcessSnapshot, policy: &ThresholdPolicy) -> Vec<Issue> {
    let cpu_limit = policy.limit(Subsystem::Process, metric::CPU_PERCENT);
    let memory_limit = policy.limit(Subsystem::Process, metric::MEMORY_PERCENT);
    let mut issues = Vec::new();

    for process in &snapshot.processes {
        let unit = process.unit_id();
        let checks = [
            (cpu_limit, metric::CPU_PERCENT, "CPU", process.cpu_percent),
            (memory_limit, metric::MEMORY_PERCENT, "memory", process.memory_percent),
        ];
        for (limit, key, label, observed) in checks {
            let Some(limit) = limit else { continue };
            if limit.breaches(observed, limit.warning) {
                issues.push(Issue {
                    subsystem: Subsystem::Process,
                    field: format!("{unit}.{key}"),
                    severity: Severity::Warning,
                    observed,
                    threshold: limit.warning,
                    message: format!(
                        "Process '{}' (PID: {}) is using {observed:.1}% {label} (limit {:.0}%)",
                        process.name, process.pid, limit.warning
                    ),
                });
            }
        }
    }

    issues
}
