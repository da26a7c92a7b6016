use serde::{Deserialize, Serialize};

use crate::domain::value_objects::thresholds::metric;

/// Resource usage of a single running process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

impl ProcessInfo {
    /// Identifier used in issue fields, e.g. `postgres[812]`.
    #[must_use]
    pub fn unit_id(&self) -> String {
        format!("{}[{}]", self.name, self.pid)
    }
}

/// Process table, ordered by CPU usage (highest first) then pid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub total_processes: usize,
    pub processes: Vec<ProcessInfo>,
}

impl ProcessSnapshot {
    /// Fields look like `<name>[<pid>].cpu_percent`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        let Some((unit, metric_key)) = field.rsplit_once('.') else {
            return false;
        };
        matches!(metric_key, metric::CPU_PERCENT | metric::MEMORY_PERCENT)
            && self.processes.iter().any(|p| p.unit_id() == unit)
    }
}
