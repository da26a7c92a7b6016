use async_trait::async_trait;

use super::collector::CollectionError;

/// A single reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub host: String,
    /// Interface to bind the probe to, if any.
    pub interface: Option<String>,
}

impl ProbeTarget {
    #[must_use]
    pub fn loopback() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            interface: None,
        }
    }

    #[must_use]
    pub fn via(interface: &str, host: &str) -> Self {
        Self {
            host: host.to_string(),
            interface: Some(interface.to_string()),
        }
    }
}

#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns whether `target` answered.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError` when the probe itself could not run
    /// (missing tool, permission denied, timeout). An unreachable host is
    /// `Ok(false)`, not an error.
    async fn probe(&self, target: &ProbeTarget) -> Result<bool, CollectionError>;
}
