use std::collections::BTreeMap;

use chrono::Utc;
use tokio::runtime::{Handle, RuntimeFlavor};

use super::aggregator::aggregate;
use super::assembler::{ValidationError, assemble};
use super::recommender::synthesize;
use crate::domain::entities::network::NetworkSnapshot;
use crate::domain::entities::report::Report;
use crate::domain::entities::snapshot::{SnapshotSet, SubsystemData};
use crate::domain::ports::collector::{CollectionError, MetricsCollector};
use crate::domain::ports::probe::{ProbeTarget, ReachabilityProbe};
use crate::domain::rules::evaluate_all;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::ThresholdPolicy;

/// Which reachability probes to run during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbePlan {
    pub localhost: bool,
    /// Interface name → host to ping through that interface.
    pub interfaces: BTreeMap<String, String>,
}

fn into_data<T>(section: &str, result: Result<T, CollectionError>) -> SubsystemData<T> {
    match result {
        Ok(data) => SubsystemData::Available(data),
        Err(e) => {
            tracing::warn!("{section} data unavailable: {e}");
            SubsystemData::unavailable(e.to_string())
        }
    }
}

/// Runs synchronous collector calls, which may sleep while sampling CPU
/// usage, without stalling the async worker when the runtime can hand its
/// other tasks to another thread.
fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Orchestrates one diagnostic run: collect → probe → evaluate → aggregate →
/// synthesize → assemble.
pub struct DiagnosticService<'a> {
    collector: &'a dyn MetricsCollector,
    probe: &'a dyn ReachabilityProbe,
    policy: &'a ThresholdPolicy,
    plan: ProbePlan,
}

impl<'a> DiagnosticService<'a> {
    #[must_use]
    pub fn new(
        collector: &'a dyn MetricsCollector,
        probe: &'a dyn ReachabilityProbe,
        policy: &'a ThresholdPolicy,
        plan: ProbePlan,
    ) -> Self {
        Self {
            collector,
            probe,
            policy,
            plan,
        }
    }

    /// Limits the run evaluates against.
    #[must_use]
    pub const fn policy(&self) -> &'a ThresholdPolicy {
        self.policy
    }

    /// Runs a full scan. Collection failures degrade the affected section to
    /// `unavailable` instead of failing the run.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the engine produced issues or
    /// recommendations inconsistent with the collected data.
    pub async fn run(&self) -> Result<Report, ValidationError> {
        tracing::info!("Starting system diagnostic");
        let snapshots = self.collect().await;

        let per_subsystem = evaluate_all(&snapshots, self.policy);
        let issues = aggregate(per_subsystem);
        let recommendations = synthesize(&issues);
        tracing::debug!(
            "{} issue(s), {} recommendation(s)",
            issues.len(),
            recommendations.len()
        );

        let report = assemble(Utc::now(), snapshots, issues, recommendations)?;
        tracing::info!("Diagnostic complete");
        Ok(report)
    }

    /// Gathers every snapshot and completes the network one with probes.
    async fn collect(&self) -> SnapshotSet {
        let (system_info, disk, memory, cpu, network, process) = blocking(|| {
            (
                self.collector.system_info(),
                self.collector.disk(),
                self.collector.memory(),
                self.collector.cpu(),
                self.collector.network(),
                self.collector.processes(),
            )
        });
        let network = match network {
            Ok(snapshot) => Ok(self.probe_network(snapshot).await),
            Err(e) => Err(e),
        };

        SnapshotSet {
            system_info: into_data("system", system_info),
            disk: into_data(Subsystem::Disk.as_str(), disk),
            memory: into_data(Subsystem::Memory.as_str(), memory),
            cpu: into_data(Subsystem::Cpu.as_str(), cpu),
            network: into_data(Subsystem::Network.as_str(), network),
            process: into_data(Subsystem::Process.as_str(), process),
        }
    }

    async fn probe_network(&self, snapshot: NetworkSnapshot) -> NetworkSnapshot {
        let localhost = if self.plan.localhost {
            self.run_probe(&ProbeTarget::loopback()).await
        } else {
            None
        };

        let mut reachable = BTreeMap::new();
        for (iface, host) in &self.plan.interfaces {
            if !snapshot.interfaces.iter().any(|i| &i.name == iface) {
                tracing::debug!("Skipping probe for missing interface {iface}");
                continue;
            }
            if let Some(ok) = self.run_probe(&ProbeTarget::via(iface, host)).await {
                reachable.insert(iface.clone(), ok);
            }
        }

        snapshot.with_reachability(localhost, &reachable)
    }

    async fn run_probe(&self, target: &ProbeTarget) -> Option<bool> {
        match self.probe.probe(target).await {
            Ok(reachable) => {
                tracing::debug!("Probe {} -> {reachable}", target.host);
                Some(reachable)
            }
            Err(e) => {
                tracing::warn!("Probe of {} failed: {e}", target.host);
                None
            }
        }
    }
}
