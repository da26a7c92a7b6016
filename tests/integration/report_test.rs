#![allow(clippy::expect_used)]

use chrono::{TimeZone, Utc};
use vitals::application::services::{aggregate, assemble, synthesize};
use vitals::domain::entities::report::{Report, SCHEMA_VERSION};
use vitals::domain::entities::snapshot::SnapshotSet;
use vitals::domain::rules::evaluate_all;
use vitals::domain::value_objects::thresholds::ThresholdPolicy;
use vitals::infrastructure::persistence::ReportWriter;

fn load_fixture(name: &str) -> SnapshotSet {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

fn build_report(fixture: &str) -> Report {
    let snapshots = load_fixture(fixture);
    let issues = aggregate(evaluate_all(&snapshots, &ThresholdPolicy::default()));
    let recommendations = synthesize(&issues);
    let timestamp = Utc
        .with_ymd_and_hms(2024, 11, 2, 8, 30, 0)
        .single()
        .expect("valid timestamp");
    assemble(timestamp, snapshots, issues, recommendations).expect("consistent report")
}

#[test]
fn json_round_trip_reconstructs_report() {
    for fixture in ["snapshots_stressed.json", "snapshots_degraded.json"] {
        let report = build_report(fixture);
        let json = serde_json::to_string_pretty(&report).expect("serialize");
        let back: Report = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, report, "{fixture}");
    }
}

#[test]
fn json_uses_documented_keys() {
    let report = build_report("snapshots_stressed.json");
    let value = serde_json::to_value(&report).expect("serialize");

    for key in [
        "schema_version",
        "timestamp",
        "system_info",
        "disk_health",
        "memory_health",
        "cpu_health",
        "network_health",
        "process_health",
        "issues",
        "recommendations",
    ] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(value["schema_version"], SCHEMA_VERSION);
    assert_eq!(value["timestamp"], "2024-11-02T08:30:00Z");

    let issue = &value["issues"][0];
    assert_eq!(issue["subsystem"], "cpu");
    assert_eq!(issue["field"], "core_3");
    assert_eq!(issue["severity"], "critical");
    assert_eq!(issue["observed"], 99.0);
    assert_eq!(issue["threshold"], 98.0);
    assert!(issue["message"].is_string());

    let rec = &value["recommendations"][0];
    assert_eq!(rec["target"], "cpu");
    assert_eq!(rec["priority"], "high");
    assert!(rec["text"].is_string());
}

#[test]
fn unavailable_sections_carry_their_note() {
    let report = build_report("snapshots_degraded.json");
    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["cpu_health"]["status"], "unavailable");
    assert_eq!(value["cpu_health"]["note"], "timeout while collecting data");
    assert_eq!(value["memory_health"]["status"], "available");
    assert_eq!(value["memory_health"]["percent_used"], 50.0);
    assert!(value["issues"].as_array().is_some_and(Vec::is_empty));
}

#[test]
fn saved_report_loads_back() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let writer = ReportWriter::new(dir.path());
    let report = build_report("snapshots_stressed.json");

    let path = writer.save(&report, None).expect("save");
    assert!(
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("diagnostic_report_2024110"))
    );
    assert_eq!(ReportWriter::load(&path).expect("load"), report);
}
