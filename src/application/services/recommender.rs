use std::collections::{HashMap, HashSet};

use crate::domain::entities::issue::Issue;
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::value_objects::priority::Priority;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::metric;

/// Expands the advice template for one issue.
///
/// Templates are keyed by subsystem, the kind of metric behind the field and,
/// where the advice differs, the severity. Advice that does not mention the
/// affected unit is shared by all units so that many similar issues collapse
/// into a single recommendation.
fn render(issue: &Issue) -> String {
    let field = issue.field.as_str();
    let value = issue.observed;
    match issue.subsystem {
        Subsystem::Disk => match issue.severity {
            Severity::Critical => format!("Free up disk space on {field}: usage at {value:.1}%"),
            Severity::Warning | Severity::Info => {
                format!("Plan a cleanup of {field}: usage at {value:.1}%")
            }
        },
        Subsystem::Memory if field == metric::SWAP_PERCENT => {
            "Reduce swap pressure by freeing RAM or enlarging swap".to_string()
        }
        Subsystem::Memory => "Close unnecessary applications or add more RAM".to_string(),
        Subsystem::Cpu => match field.strip_prefix("temperature:") {
            Some(label) => format!("Check cooling for {label}: {value:.1}°C"),
            None => {
                "Check for resource-intensive processes or consider upgrading the CPU".to_string()
            }
        },
        Subsystem::Network => match issue.severity {
            Severity::Critical => {
                format!("Check connectivity of {field}: reachability probe failed")
            }
            Severity::Warning | Severity::Info => {
                format!("Verify that interface {field} is meant to be down")
            }
        },
        Subsystem::Process => {
            let (unit, key) = field.rsplit_once('.').unwrap_or((field, ""));
            if key == metric::MEMORY_PERCENT {
                format!("Investigate memory use of {unit}: {value:.1}% of RAM")
            } else {
                format!("Investigate or restart {unit}: CPU at {value:.1}%")
            }
        }
    }
}

/// An interface that failed its probe gets connectivity advice only; telling
/// the user to confirm it is meant to be down would contradict it.
fn superseded(issue: &Issue, unreachable: &HashSet<&str>) -> bool {
    issue.subsystem == Subsystem::Network
        && issue.severity < Severity::Critical
        && unreachable.contains(issue.field.as_str())
}

/// Turns issues into de-duplicated, ranked recommendations.
///
/// Issues whose templates expand to the same (target, text) collapse into
/// one recommendation carrying the highest contributing priority. Output is
/// ordered by priority descending, then target name, then text. No issues
/// means no recommendations.
#[must_use]
pub fn synthesize(issues: &[Issue]) -> Vec<Recommendation> {
    let unreachable: HashSet<&str> = issues
        .iter()
        .filter(|i| i.subsystem == Subsystem::Network && i.severity == Severity::Critical)
        .map(|i| i.field.as_str())
        .collect();

    let mut merged: HashMap<(Subsystem, String), Priority> = HashMap::new();
    for issue in issues.iter().filter(|i| !superseded(i, &unreachable)) {
        let priority = Priority::from(issue.severity);
        merged
            .entry((issue.subsystem, render(issue)))
            .and_modify(|current| *current = (*current).max(priority))
            .or_insert(priority);
    }

    let mut recommendations: Vec<Recommendation> = merged
        .into_iter()
        .map(|((target, text), priority)| Recommendation {
            target,
            priority,
            text,
        })
        .collect();
    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.target.as_str().cmp(b.target.as_str()))
            .then_with(|| a.text.cmp(&b.text))
    });
    recommendations
}
