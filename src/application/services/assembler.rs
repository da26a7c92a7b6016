use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::issue::Issue;
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::entities::report::Report;
use crate::domain::entities::snapshot::SnapshotSet;
use crate::domain::value_objects::subsystem::Subsystem;

/// Inconsistency between snapshots, issues and recommendations. Seeing one
/// means the engine itself is broken, not the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("issue references unavailable subsystem {0}")]
    SubsystemUnavailable(Subsystem),
    #[error("issue references unknown field {field} in {subsystem}")]
    UnknownField { subsystem: Subsystem, field: String },
    #[error("recommendation for {0} has no supporting issue")]
    OrphanRecommendation(Subsystem),
}

/// Builds the final report after checking that every issue points at data
/// present in the snapshots and that every recommendation is backed by an
/// issue.
///
/// # Errors
///
/// Returns `ValidationError` on the first inconsistency found.
pub fn assemble(
    timestamp: DateTime<Utc>,
    snapshots: SnapshotSet,
    issues: Vec<Issue>,
    recommendations: Vec<Recommendation>,
) -> Result<Report, ValidationError> {
    for issue in &issues {
        if !snapshots.has_subsystem(issue.subsystem) {
            return Err(ValidationError::SubsystemUnavailable(issue.subsystem));
        }
        if !snapshots.has_field(issue.subsystem, &issue.field) {
            return Err(ValidationError::UnknownField {
                subsystem: issue.subsystem,
                field: issue.field.clone(),
            });
        }
    }
    if let Some(orphan) = recommendations
        .iter()
        .find(|r| !issues.iter().any(|i| i.subsystem == r.target))
    {
        return Err(ValidationError::OrphanRecommendation(orphan.target));
    }

    Ok(Report::from_parts(timestamp, snapshots, issues, recommendations))
}
