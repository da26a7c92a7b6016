use std::io::ErrorKind;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::collector::CollectionError;
use crate::domain::ports::probe::{ProbeTarget, ReachabilityProbe};

/// Reachability probe backed by the system `ping` binary (one echo request).
pub struct PingProbe {
    timeout: Duration,
}

impl PingProbe {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Rejects values `ping` would parse as options.
fn check_argument(value: &str) -> Result<(), CollectionError> {
    if value.is_empty() || value.starts_with('-') || value.chars().any(char::is_whitespace) {
        return Err(CollectionError::MetricsUnavailable(format!(
            "invalid probe argument '{value}'"
        )));
    }
    Ok(())
}

fn ping_args(target: &ProbeTarget, timeout: Duration) -> Result<Vec<String>, CollectionError> {
    check_argument(&target.host)?;
    let wait = timeout.as_secs().max(1);
    let mut args = vec![
        "-c".to_string(),
        "1".to_string(),
        "-W".to_string(),
        wait.to_string(),
    ];
    if let Some(iface) = &target.interface {
        check_argument(iface)?;
        args.push("-I".to_string());
        args.push(iface.clone());
    }
    args.push(target.host.clone());
    Ok(args)
}

/// Kernel errors that mean the host cannot be reached from here, as
/// opposed to the probe being unable to run.
const UNREACHABLE_MARKERS: [&str; 2] = ["unreachable", "no route to host"];

/// `ping` exits 0 when a reply arrived and 1 when none did. Exit 2 covers
/// both routing failures (unreachable) and probe errors such as an unknown
/// host; only the former is a reachability answer.
fn interpret_exit(code: Option<i32>, stderr: &[u8]) -> Result<bool, CollectionError> {
    let message = String::from_utf8_lossy(stderr);
    match code {
        Some(0) => Ok(true),
        Some(1) => Ok(false),
        Some(2)
            if UNREACHABLE_MARKERS
                .iter()
                .any(|m| message.to_lowercase().contains(m)) =>
        {
            Ok(false)
        }
        _ => Err(CollectionError::SensorUnavailable(format!(
            "ping failed: {}",
            message.trim()
        ))),
    }
}

#[async_trait]
impl ReachabilityProbe for PingProbe {
    async fn probe(&self, target: &ProbeTarget) -> Result<bool, CollectionError> {
        let args = ping_args(target, self.timeout)?;
        // Leave ping its own deadline before killing it.
        let limit = self.timeout + Duration::from_secs(1);

        let output = tokio::time::timeout(
            limit,
            tokio::process::Command::new("ping")
                .args(&args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| CollectionError::Timeout)?
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => CollectionError::SensorUnavailable("ping not installed".to_string()),
            ErrorKind::PermissionDenied => CollectionError::PermissionDenied(format!("ping: {e}")),
            _ => CollectionError::SensorUnavailable(format!("failed to run ping: {e}")),
        })?;

        interpret_exit(output.status.code(), &output.stderr)
    }
}
