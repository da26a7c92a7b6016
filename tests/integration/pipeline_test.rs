#![allow(clippy::expect_used)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use vitals::application::config::AppConfig;
use vitals::application::services::{DiagnosticService, ProbePlan};
use vitals::domain::entities::disk::DiskSnapshot;
use vitals::domain::entities::network::NetworkSnapshot;
use vitals::domain::entities::process::ProcessSnapshot;
use vitals::domain::entities::snapshot::{CpuSnapshot, MemorySnapshot, SnapshotSet, SubsystemData};
use vitals::domain::entities::system::SystemInfo;
use vitals::domain::ports::collector::{CollectionError, MetricsCollector};
use vitals::domain::ports::probe::{ProbeTarget, ReachabilityProbe};
use vitals::domain::value_objects::priority::Priority;
use vitals::domain::value_objects::severity::Severity;
use vitals::domain::value_objects::subsystem::Subsystem;
use vitals::domain::value_objects::thresholds::ThresholdPolicy;

/// Replays a fixture; any subsystem listed in `failing` reports an error.
struct FixtureCollector {
    snapshots: SnapshotSet,
    failing: Vec<Subsystem>,
}

impl FixtureCollector {
    fn load(name: &str) -> Self {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name);
        let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
        Self {
            snapshots: serde_json::from_str(&json).expect("Failed to parse fixture"),
            failing: vec![],
        }
    }

    fn failing(mut self, subsystem: Subsystem) -> Self {
        self.failing.push(subsystem);
        self
    }

    fn take<T: Clone>(
        &self,
        subsystem: Option<Subsystem>,
        data: &SubsystemData<T>,
    ) -> Result<T, CollectionError> {
        if subsystem.is_some_and(|s| self.failing.contains(&s)) {
            return Err(CollectionError::PermissionDenied(format!(
                "{} counters",
                subsystem.map_or("system", |s| s.as_str())
            )));
        }
        match data {
            SubsystemData::Available(inner) => Ok(inner.clone()),
            SubsystemData::Unavailable { note } => {
                Err(CollectionError::MetricsUnavailable(note.clone()))
            }
        }
    }
}

impl MetricsCollector for FixtureCollector {
    fn system_info(&self) -> Result<SystemInfo, CollectionError> {
        self.take(None, &self.snapshots.system_info)
    }
    fn disk(&self) -> Result<DiskSnapshot, CollectionError> {
        self.take(Some(Subsystem::Disk), &self.snapshots.disk)
    }
    fn memory(&self) -> Result<MemorySnapshot, CollectionError> {
        self.take(Some(Subsystem::Memory), &self.snapshots.memory)
    }
    fn cpu(&self) -> Result<CpuSnapshot, CollectionError> {
        self.take(Some(Subsystem::Cpu), &self.snapshots.cpu)
    }
    fn network(&self) -> Result<NetworkSnapshot, CollectionError> {
        self.take(Some(Subsystem::Network), &self.snapshots.network)
    }
    fn processes(&self) -> Result<ProcessSnapshot, CollectionError> {
        self.take(Some(Subsystem::Process), &self.snapshots.process)
    }
}

/// Answers from a fixed table; unknown hosts are a probe error.
struct TableProbe {
    answers: BTreeMap<String, bool>,
    calls: Mutex<usize>,
}

impl TableProbe {
    fn new(answers: &[(&str, bool)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(host, ok)| ((*host).to_string(), *ok))
                .collect(),
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl ReachabilityProbe for TableProbe {
    async fn probe(&self, target: &ProbeTarget) -> Result<bool, CollectionError> {
        *self.calls.lock().expect("mutex poisoned") += 1;
        self.answers
            .get(&target.host)
            .copied()
            .ok_or_else(|| CollectionError::SensorUnavailable(format!("no route to {}", target.host)))
    }
}

#[tokio::test]
async fn stressed_host_produces_full_report() {
    let collector = FixtureCollector::load("snapshots_stressed.json");
    let probe = TableProbe::new(&[("127.0.0.1", true), ("192.168.1.1", false)]);
    let policy = ThresholdPolicy::default();
    let plan = ProbePlan {
        localhost: true,
        interfaces: BTreeMap::from([("eth0".to_string(), "192.168.1.1".to_string())]),
    };
    let service = DiagnosticService::new(&collector, &probe, &policy, plan);

    let report = service.run().await.expect("report");

    // Probes replace the fixture's recorded reachability.
    let network = report.network_health().available().expect("network");
    assert_eq!(network.localhost_reachable, Some(true));
    assert_eq!(network.interfaces[0].reachable, Some(false));
    assert!(
        !report
            .issues()
            .iter()
            .any(|i| i.field == "localhost"),
        "loopback answered"
    );

    let eth0: Vec<Severity> = report
        .issues()
        .iter()
        .filter(|i| i.field == "eth0")
        .map(|i| i.severity)
        .collect();
    assert_eq!(eth0, vec![Severity::Critical, Severity::Info]);
    assert!(
        report
            .recommendations()
            .iter()
            .all(|r| !r.text.contains("meant to be down")),
        "connectivity advice replaces the down-interface advice"
    );

    assert_eq!(report.issues()[0].severity, Severity::Critical);
    assert!(report.issues().windows(2).all(|w| w[0].severity >= w[1].severity));
    assert_eq!(report.recommendations()[0].priority, Priority::High);
    assert_eq!(*probe.calls.lock().expect("mutex poisoned"), 2);
}

#[tokio::test]
async fn failing_subsystem_still_yields_report() {
    let collector = FixtureCollector::load("snapshots_stressed.json").failing(Subsystem::Memory);
    let probe = TableProbe::new(&[]);
    let policy = ThresholdPolicy::default();
    let service = DiagnosticService::new(&collector, &probe, &policy, ProbePlan::default());

    let report = service.run().await.expect("report");
    assert_eq!(
        report.memory_health().note(),
        Some("permission denied: memory counters")
    );
    assert!(report.issues().iter().all(|i| i.subsystem != Subsystem::Memory));
    assert!(
        report
            .recommendations()
            .iter()
            .all(|r| r.target != Subsystem::Memory)
    );
    assert!(report.disk_health().is_available());
}

#[tokio::test]
async fn probe_errors_leave_results_absent() {
    let collector = FixtureCollector::load("snapshots_degraded.json");
    let probe = TableProbe::new(&[]);
    let policy = ThresholdPolicy::default();
    let plan = ProbePlan {
        localhost: true,
        interfaces: BTreeMap::new(),
    };
    let service = DiagnosticService::new(&collector, &probe, &policy, plan);

    let report = service.run().await.expect("report");
    let network = report.network_health().available().expect("network");
    assert_eq!(network.localhost_reachable, None);
    assert!(report.issues().is_empty());
    assert!(report.recommendations().is_empty());
    assert!(!report.cpu_health().is_available());
    assert!(!report.system_info().is_available());
}

#[tokio::test]
async fn config_overrides_flow_into_the_run() {
    let config: AppConfig = toml::from_str(
        r"
[thresholds.memory.percent_used]
warning = 40.0
critical = 60.0

[network]
probe_localhost = false
",
    )
    .expect("parse config");
    let policy = config.policy().expect("valid policy");
    let collector = FixtureCollector::load("snapshots_degraded.json");
    let probe = TableProbe::new(&[]);
    let service = DiagnosticService::new(&collector, &probe, &policy, config.probe_plan());

    let report = service.run().await.expect("report");
    assert_eq!(report.issues().len(), 1);
    assert_eq!(report.issues()[0].subsystem, Subsystem::Memory);
    assert_eq!(report.issues()[0].severity, Severity::Warning);
    assert_eq!(*probe.calls.lock().expect("mutex poisoned"), 0);
}
