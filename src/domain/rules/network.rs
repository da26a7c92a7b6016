use crate::domain::entities::issue::Issue;
use crate::domain::entities::network::{LOCALHOST_FIELD, NetworkSnapshot};
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::ThresholdPolicy;

const UP: f64 = 1.0;
const DOWN: f64 = 0.0;

fn probe_issue(field: &str, severity: Severity, message: String) -> Issue {
    Issue {
        subsystem: Subsystem::Network,
        field: field.to_string(),
        severity,
        observed: DOWN,
        threshold: UP,
        message,
    }
}

/// Network has no numeric limits: only explicit probe failures and
/// interfaces reported down are flagged. Missing probe data is not an issue.
#[must_use]
pub fn evaluate(snapshot: &NetworkSnapshot, _policy: &ThresholdPolicy) -> Vec<Issue> {
    let mut issues = Vec::new();

    if snapshot.localhost_reachable == Some(false) {
        issues.push(probe_issue(
            LOCALHOST_FIELD,
            Severity::Critical,
            "Localhost connectivity check failed".to_string(),
        ));
    }

    for iface in &snapshot.interfaces {
        if iface.reachable == Some(false) {
            issues.push(probe_issue(
                &iface.name,
                Severity::Critical,
                format!("Interface {} failed its reachability probe", iface.name),
            ));
        }
        if iface.is_up == Some(false) {
            issues.push(probe_issue(
                &iface.name,
                Severity::Info,
                format!("Interface {} is down", iface.name),
            ));
        }
    }

    issues
}
