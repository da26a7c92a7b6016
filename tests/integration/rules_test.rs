#![allow(clippy::expect_used)]

use vitals::application::services::{aggregate, synthesize};
use vitals::domain::entities::disk::{DiskSnapshot, PartitionInfo};
use vitals::domain::entities::issue::Issue;
use vitals::domain::entities::network::NetworkSnapshot;
use vitals::domain::entities::process::ProcessSnapshot;
use vitals::domain::entities::snapshot::{
    CpuSnapshot, MemorySnapshot, SnapshotSet, SubsystemData, SwapInfo,
};
use vitals::domain::rules::{self, evaluate_all};
use vitals::domain::value_objects::priority::Priority;
use vitals::domain::value_objects::severity::Severity;
use vitals::domain::value_objects::subsystem::Subsystem;
use vitals::domain::value_objects::thresholds::ThresholdPolicy;

fn load_fixture(name: &str) -> SnapshotSet {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

fn run_engine(snapshots: &SnapshotSet, policy: &ThresholdPolicy) -> Vec<Issue> {
    aggregate(evaluate_all(snapshots, policy))
}

fn keys(issues: &[Issue]) -> Vec<(Severity, Subsystem, &str)> {
    issues
        .iter()
        .map(|i| (i.severity, i.subsystem, i.field.as_str()))
        .collect()
}

#[test]
fn memory_critical_without_swap_issue() {
    let snapshot = MemorySnapshot {
        total_bytes: 16_000_000_000,
        available_bytes: 640_000_000,
        used_bytes: 15_360_000_000,
        percent_used: 96.0,
        swap: Some(SwapInfo {
            total_bytes: 8_000_000_000,
            used_bytes: 800_000_000,
            percent_used: 10.0,
        }),
    };
    let issues = rules::memory::evaluate(&snapshot, &ThresholdPolicy::default());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "percent_used");
    assert_eq!(issues[0].severity, Severity::Critical);
    assert!((issues[0].threshold - 95.0).abs() < f64::EPSILON);

    let recs = synthesize(&issues);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].target, Subsystem::Memory);
    assert_eq!(recs[0].priority, Priority::High);
}

#[test]
fn cpu_cores_are_evaluated_independently() {
    let snapshot = CpuSnapshot {
        usage_percent: 61.0,
        per_core_percent: vec![20.0, 95.0, 30.0, 99.0],
        core_count: 4,
        frequency_mhz: None,
        temperatures: vec![],
    };
    let issues = aggregate(vec![rules::cpu::evaluate(&snapshot, &ThresholdPolicy::default())]);
    assert_eq!(
        keys(&issues),
        vec![
            (Severity::Critical, Subsystem::Cpu, "core_3"),
            (Severity::Warning, Subsystem::Cpu, "core_1"),
        ]
    );
}

#[test]
fn disk_boundaries_are_inclusive() {
    let snapshot = DiskSnapshot {
        partitions: vec![
            PartitionInfo::new("/dev/sda1", "/", "ext4", 100, 90),
            PartitionInfo::new("/dev/sda2", "/srv", "ext4", 100, 97),
            PartitionInfo::new("/dev/sda3", "/tmp", "ext4", 10_000, 8_999),
        ],
    };
    let issues = rules::disk::evaluate(&snapshot, &ThresholdPolicy::default());
    assert_eq!(issues.len(), 2, "one issue per breaching partition, only the top tier");
    assert_eq!(issues[0].field, "/");
    assert_eq!(issues[0].severity, Severity::Warning);
    assert_eq!(issues[1].field, "/srv");
    assert_eq!(issues[1].severity, Severity::Critical);
}

#[test]
fn empty_snapshots_produce_nothing() {
    let snapshots = SnapshotSet {
        system_info: SubsystemData::unavailable("skipped"),
        disk: SubsystemData::Available(DiskSnapshot::default()),
        memory: SubsystemData::Available(MemorySnapshot {
            total_bytes: 1,
            available_bytes: 1,
            used_bytes: 0,
            percent_used: 0.0,
            swap: None,
        }),
        cpu: SubsystemData::Available(CpuSnapshot {
            usage_percent: 0.0,
            per_core_percent: vec![],
            core_count: 0,
            frequency_mhz: None,
            temperatures: vec![],
        }),
        network: SubsystemData::Available(NetworkSnapshot::default()),
        process: SubsystemData::Available(ProcessSnapshot::default()),
    };
    let issues = run_engine(&snapshots, &ThresholdPolicy::default());
    assert!(issues.is_empty());
    assert!(synthesize(&issues).is_empty());
}

#[test]
fn stressed_fixture_yields_ordered_issues() {
    let snapshots = load_fixture("snapshots_stressed.json");
    let issues = run_engine(&snapshots, &ThresholdPolicy::default());

    assert_eq!(
        keys(&issues),
        vec![
            (Severity::Critical, Subsystem::Cpu, "core_3"),
            (Severity::Critical, Subsystem::Disk, "/var"),
            (Severity::Critical, Subsystem::Memory, "percent_used"),
            (Severity::Critical, Subsystem::Network, "localhost"),
            (Severity::Warning, Subsystem::Cpu, "core_1"),
            (Severity::Warning, Subsystem::Cpu, "temperature:Package id 0"),
            (Severity::Warning, Subsystem::Disk, "/"),
            (Severity::Warning, Subsystem::Process, "java[901].memory_percent"),
            (Severity::Warning, Subsystem::Process, "stress[4242].cpu_percent"),
            (Severity::Info, Subsystem::Network, "eth0"),
        ]
    );
}

#[test]
fn stressed_fixture_yields_ranked_recommendations() {
    let snapshots = load_fixture("snapshots_stressed.json");
    let recs = synthesize(&run_engine(&snapshots, &ThresholdPolicy::default()));

    let ranked: Vec<(Priority, Subsystem, &str)> = recs
        .iter()
        .map(|r| (r.priority, r.target, r.text.as_str()))
        .collect();
    assert_eq!(
        ranked,
        vec![
            (
                Priority::High,
                Subsystem::Cpu,
                "Check for resource-intensive processes or consider upgrading the CPU"
            ),
            (
                Priority::High,
                Subsystem::Disk,
                "Free up disk space on /var: usage at 97.0%"
            ),
            (
                Priority::High,
                Subsystem::Memory,
                "Close unnecessary applications or add more RAM"
            ),
            (
                Priority::High,
                Subsystem::Network,
                "Check connectivity of localhost: reachability probe failed"
            ),
            (
                Priority::Medium,
                Subsystem::Cpu,
                "Check cooling for Package id 0: 85.0°C"
            ),
            (
                Priority::Medium,
                Subsystem::Disk,
                "Plan a cleanup of /: usage at 90.0%"
            ),
            (
                Priority::Medium,
                Subsystem::Process,
                "Investigate memory use of java[901]: 12.5% of RAM"
            ),
            (
                Priority::Medium,
                Subsystem::Process,
                "Investigate or restart stress[4242]: CPU at 150.0%"
            ),
            (
                Priority::Low,
                Subsystem::Network,
                "Verify that interface eth0 is meant to be down"
            ),
        ]
    );
}

#[test]
fn evaluation_is_deterministic() {
    let snapshots = load_fixture("snapshots_stressed.json");
    let policy = ThresholdPolicy::default();
    let first = run_engine(&snapshots, &policy);
    let second = run_engine(&snapshots, &policy);
    assert_eq!(first, second);
    assert_eq!(synthesize(&first), synthesize(&second));
}

#[test]
fn tighter_policy_flags_more() {
    let snapshots = load_fixture("snapshots_stressed.json");
    let default_issues = run_engine(&snapshots, &ThresholdPolicy::default());

    let strict = ThresholdPolicy::default()
        .with_override(
            Subsystem::Disk,
            "percent_used",
            vitals::domain::value_objects::thresholds::Limit::above(40.0, 60.0),
        )
        .expect("valid override");
    let strict_issues = run_engine(&snapshots, &strict);

    assert!(strict_issues.len() > default_issues.len());
    assert!(
        strict_issues
            .iter()
            .any(|i| i.field == "/home" && i.severity == Severity::Warning)
    );
}

#[test]
fn degraded_fixture_skips_unavailable_subsystems() {
    let snapshots = load_fixture("snapshots_degraded.json");
    assert!(!snapshots.has_subsystem(Subsystem::Cpu));
    assert!(!snapshots.has_subsystem(Subsystem::Process));
    assert_eq!(evaluate_all(&snapshots, &ThresholdPolicy::default()).len(), 3);
    assert!(run_engine(&snapshots, &ThresholdPolicy::default()).is_empty());
}
