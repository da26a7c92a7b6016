//! Per-subsystem evaluation rules.
//!
//! Every rule is a pure function: snapshot + policy in, issues out. No I/O,
//! no shared state, so subsystems can be evaluated in any order or in
//! parallel.

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod process;

use crate::domain::entities::issue::Issue;
use crate::domain::entities::snapshot::SnapshotSet;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::{Limit, ThresholdPolicy};

/// Applies the two-tier rule for one observed value. Only the most severe
/// tier crossed is reported.
pub(crate) fn check_limit(
    limit: &Limit,
    subsystem: Subsystem,
    field: String,
    observed: f64,
    describe: impl FnOnce(Severity, f64) -> String,
) -> Option<Issue> {
    let (severity, threshold) = limit.classify(observed)?;
    Some(Issue {
        subsystem,
        message: describe(severity, threshold),
        field,
        severity,
        observed,
        threshold,
    })
}

/// Evaluates every available subsystem, one issue list per subsystem.
/// Subsystems whose snapshot is unavailable contribute nothing.
#[must_use]
pub fn evaluate_all(snapshots: &SnapshotSet, policy: &ThresholdPolicy) -> Vec<Vec<Issue>> {
    let mut results = Vec::with_capacity(Subsystem::ALL.len());
    if let Some(snapshot) = snapshots.disk.available() {
        results.push(disk::evaluate(snapshot, policy));
    }
    if let Some(snapshot) = snapshots.memory.available() {
        results.push(memory::evaluate(snapshot, policy));
    }
    if let Some(snapshot) = snapshots.cpu.available() {
        results.push(cpu::evaluate(snapshot, policy));
    }
    if let Some(snapshot) = snapshots.network.available() {
        results.push(network::evaluate(snapshot, policy));
    }
    if let Some(snapshot) = snapshots.process.available() {
        results.push(process::evaluate(snapshot, policy));
    }
    results
}
