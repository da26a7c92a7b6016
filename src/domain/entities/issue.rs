use serde::{Deserialize, Serialize};

use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::subsystem::Subsystem;

/// A single threshold breach detected in one subsystem.
///
/// `observed` and `threshold` are numeric for every rule. Reachability probes
/// encode failure as `0.0` against a threshold of `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub subsystem: Subsystem,
    pub field: String,
    pub severity: Severity,
    pub observed: f64,
    pub threshold: f64,
    pub message: String,
}

impl Issue {
    /// Identity used for de-duplication.
    #[must_use]
    pub fn key(&self) -> (Subsystem, &str, Severity) {
        (self.subsystem, self.field.as_str(), self.severity)
    }
}
