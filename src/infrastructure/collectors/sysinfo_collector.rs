use std::sync::{Mutex, MutexGuard};

use sysinfo::{Components, Networks, ProcessesToUpdate, System};

use super::disk_collector::DiskCollector;
use crate::domain::entities::disk::DiskSnapshot;
use crate::domain::entities::network::{InterfaceInfo, NetworkSnapshot};
use crate::domain::entities::process::{ProcessInfo, ProcessSnapshot};
use crate::domain::entities::snapshot::{CpuSnapshot, MemorySnapshot, SwapInfo, TemperatureReading};
use crate::domain::entities::system::SystemInfo;
use crate::domain::ports::collector::{CollectionError, MetricsCollector};

/// Returns `(numerator / denominator) * 100.0`, or `0.0` when `denominator` is zero.
#[allow(clippy::cast_precision_loss)]
fn safe_percent(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        (numerator as f64 / denominator as f64) * 100.0
    } else {
        0.0
    }
}

/// Collects system metrics using the `sysinfo` crate.
///
/// Uses `Mutex<System>` for interior mutability since the `MetricsCollector`
/// trait requires `&self` but `sysinfo::System` needs `&mut self` for refresh.
pub struct SysinfoCollector {
    sys: Mutex<System>,
    disk_collector: DiskCollector,
}

impl SysinfoCollector {
    /// Creates a new collector with pre-initialized system data, so the
    /// first process refresh already has a CPU usage baseline.
    #[must_use]
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Mutex::new(sys),
            disk_collector: DiskCollector::new(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, System>, CollectionError> {
        self.sys.lock().map_err(|e| {
            CollectionError::MetricsUnavailable(format!("system lock poisoned: {e}"))
        })
    }
}

impl Default for SysinfoCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector for SysinfoCollector {
    fn system_info(&self) -> Result<SystemInfo, CollectionError> {
        let sys = self.lock()?;
        let cpus = sys.cpus();
        Ok(SystemInfo {
            os_name: System::name(),
            os_version: System::os_version(),
            kernel_version: System::kernel_version(),
            architecture: std::env::consts::ARCH.to_string(),
            hostname: System::host_name(),
            cpu_brand: cpus
                .first()
                .map(|cpu| cpu.brand().trim().to_string())
                .filter(|brand| !brand.is_empty()),
            logical_cores: cpus.len(),
        })
    }

    fn disk(&self) -> Result<DiskSnapshot, CollectionError> {
        self.disk_collector.collect()
    }

    fn memory(&self) -> Result<MemorySnapshot, CollectionError> {
        let mut sys = self.lock()?;
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(CollectionError::MetricsUnavailable(
                "total memory reported as zero".to_string(),
            ));
        }
        let used = sys.used_memory();
        let swap_total = sys.total_swap();
        let swap = (swap_total > 0).then(|| SwapInfo {
            total_bytes: swap_total,
            used_bytes: sys.used_swap(),
            percent_used: safe_percent(sys.used_swap(), swap_total),
        });

        Ok(MemorySnapshot {
            total_bytes: total,
            available_bytes: sys.available_memory(),
            used_bytes: used,
            percent_used: safe_percent(used, total),
            swap,
        })
    }

    fn cpu(&self) -> Result<CpuSnapshot, CollectionError> {
        let mut sys = self.lock()?;
        // Usage is a delta between two refreshes. The pipeline calls this
        // through block_in_place, so the sleep does not stall async tasks.
        sys.refresh_cpu_all();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(CollectionError::MetricsUnavailable(
                "no CPU reported".to_string(),
            ));
        }
        let per_core_percent: Vec<f64> = cpus.iter().map(|c| f64::from(c.cpu_usage())).collect();
        let frequency_mhz = cpus.first().map(sysinfo::Cpu::frequency).filter(|&f| f > 0);

        Ok(CpuSnapshot {
            usage_percent: f64::from(sys.global_cpu_usage()),
            core_count: per_core_percent.len(),
            per_core_percent,
            frequency_mhz,
            temperatures: collect_temperatures(),
        })
    }

    fn network(&self) -> Result<NetworkSnapshot, CollectionError> {
        let networks = Networks::new_with_refreshed_list();

        let mut snapshot = NetworkSnapshot::default();
        for (name, data) in networks.iter() {
            snapshot.total_bytes_sent += data.total_transmitted();
            snapshot.total_bytes_received += data.total_received();
            snapshot.total_packets_sent += data.total_packets_transmitted();
            snapshot.total_packets_received += data.total_packets_received();
            snapshot.interfaces.push(InterfaceInfo {
                name: name.clone(),
                bytes_sent: data.total_transmitted(),
                bytes_received: data.total_received(),
                addresses: data
                    .ip_networks()
                    .iter()
                    .map(|n| format!("{}/{}", n.addr, n.prefix))
                    .collect(),
                is_up: interface_is_up(name),
                reachable: None,
            });
        }
        snapshot.interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snapshot)
    }

    fn processes(&self) -> Result<ProcessSnapshot, CollectionError> {
        let mut sys = self.lock()?;
        sys.refresh_processes(ProcessesToUpdate::All, true);

        let total_memory = sys.total_memory();
        let own_pid = std::process::id();
        let mut processes: Vec<ProcessInfo> = sys
            .processes()
            .values()
            .filter(|p| p.pid().as_u32() != own_pid && p.thread_kind().is_none())
            .map(|p| ProcessInfo {
                pid: p.pid().as_u32(),
                name: p.name().to_string_lossy().to_string(),
                cpu_percent: f64::from(p.cpu_usage()),
                memory_percent: safe_percent(p.memory(), total_memory),
            })
            .collect();
        drop(sys);

        processes.sort_by(|a, b| {
            b.cpu_percent
                .total_cmp(&a.cpu_percent)
                .then_with(|| a.pid.cmp(&b.pid))
        });
        Ok(ProcessSnapshot {
            total_processes: processes.len(),
            processes,
        })
    }
}

/// Sensors without a current reading are skipped.
fn collect_temperatures() -> Vec<TemperatureReading> {
    let components = Components::new_with_refreshed_list();
    label_readings(
        components
            .iter()
            .filter_map(|component| {
                let celsius = component.temperature().filter(|t| t.is_finite())?;
                let critical = component
                    .critical()
                    .filter(|c| c.is_finite() && *c > 0.0)
                    .map(f64::from);
                Some((component.label().to_string(), f64::from(celsius), critical))
            })
            .collect(),
    )
}

/// Sorts `(label, celsius, critical)` readings by label and keeps all of
/// them. Repeated labels (one chip per socket) get a `#n` suffix from the
/// second occurrence on so every sensor stays addressable.
fn label_readings(mut raw: Vec<(String, f64, Option<f64>)>) -> Vec<TemperatureReading> {
    raw.sort_by(|a, b| a.0.cmp(&b.0));
    let mut readings: Vec<TemperatureReading> = Vec::with_capacity(raw.len());
    let mut occurrence = 0;
    for (i, (label, celsius, critical_celsius)) in raw.iter().enumerate() {
        occurrence = if i > 0 && raw[i - 1].0 == *label {
            occurrence + 1
        } else {
            1
        };
        let label = if occurrence > 1 {
            format!("{label} #{occurrence}")
        } else {
            label.clone()
        };
        readings.push(TemperatureReading {
            label,
            celsius: *celsius,
            critical_celsius: *critical_celsius,
        });
    }
    readings
}

/// Reads the kernel's operational state for `name`.
///
/// Linux-only: returns `None` on other platforms, when the state is unreadable,
/// or when the kernel reports neither up nor down (e.g. loopback's `unknown`).
#[cfg(target_os = "linux")]
fn interface_is_up(name: &str) -> Option<bool> {
    let state = std::fs::read_to_string(format!("/sys/class/net/{name}/operstate")).ok()?;
    match state.trim() {
        "up" => Some(true),
        "down" => Some(false),
        _ => None,
    }
}

#[cfg(not(target_os = "linux"))]
fn interface_is_up(_name: &str) -> Option<bool> {
    None
}
