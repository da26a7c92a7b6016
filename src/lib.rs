//! Point-in-time system health diagnostics.
//!
//! Snapshots of disk, memory, CPU, network and process state are evaluated
//! against a [`ThresholdPolicy`](domain::value_objects::thresholds::ThresholdPolicy),
//! breaches become ranked [`Issue`](domain::entities::issue::Issue)s and
//! de-duplicated [`Recommendation`](domain::entities::recommendation::Recommendation)s,
//! and everything is assembled into a serializable
//! [`Report`](domain::entities::report::Report).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
