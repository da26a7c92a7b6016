use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::entities::issue::Issue;

/// Report ordering: severity descending, then subsystem name, then field
/// (both ascending, byte-wise).
fn report_order(a: &Issue, b: &Issue) -> Ordering {
    b.severity
        .cmp(&a.severity)
        .then_with(|| a.subsystem.as_str().cmp(b.subsystem.as_str()))
        .then_with(|| a.field.cmp(&b.field))
}

/// Merges per-subsystem issue lists into one ordered list.
///
/// Exact duplicates on (subsystem, field, severity) are dropped, keeping the
/// first occurrence. The sort is stable, so identical input always yields
/// identical output.
#[must_use]
pub fn aggregate<I>(per_subsystem: I) -> Vec<Issue>
where
    I: IntoIterator<Item = Vec<Issue>>,
{
    let mut issues: Vec<Issue> = Vec::new();
    {
        let mut seen = HashSet::new();
        for issue in per_subsystem.into_iter().flatten() {
            let key = (issue.subsystem, issue.field.clone(), issue.severity);
            if seen.insert(key) {
                issues.push(issue);
            }
        }
    }
    issues.sort_by(report_order);
    issues
}
