use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name used for the loopback reachability probe.
pub const LOCALHOST_FIELD: &str = "localhost";

/// Counters and probe results for one network interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub is_up: Option<bool>,
    #[serde(default)]
    pub reachable: Option<bool>,
}

/// Network counters plus optional reachability probe results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub total_bytes_sent: u64,
    pub total_bytes_received: u64,
    pub total_packets_sent: u64,
    pub total_packets_received: u64,
    pub interfaces: Vec<InterfaceInfo>,
    #[serde(default)]
    pub localhost_reachable: Option<bool>,
}

impl NetworkSnapshot {
    /// Completes the snapshot with probe results. Interfaces without an
    /// entry in `interfaces` keep their previous value.
    #[must_use]
    pub fn with_reachability(
        mut self,
        localhost: Option<bool>,
        interfaces: &BTreeMap<String, bool>,
    ) -> Self {
        self.localhost_reachable = localhost.or(self.localhost_reachable);
        for iface in &mut self.interfaces {
            if let Some(&reachable) = interfaces.get(&iface.name) {
                iface.reachable = Some(reachable);
            }
        }
        self
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        (field == LOCALHOST_FIELD && self.localhost_reachable.is_some())
            || self.interfaces.iter().any(|i| i.name == field)
    }
}
