use std::fmt::Write;

use colored::Colorize;

use super::gauge_fmt::{temperature, usage_bar, usage_percent};
use crate::domain::entities::report::Report;
use crate::domain::entities::snapshot::SubsystemData;
use crate::domain::value_objects::priority::Priority;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::subsystem::Subsystem;
use crate::domain::value_objects::thresholds::{ThresholdPolicy, metric};

const RULE_WIDTH: usize = 60;
const TOP_PROCESSES: usize = 5;
const BYTES_PER_GB: f64 = 1_073_741_824.0;
const BYTES_PER_MB: f64 = 1_048_576.0;

pub const ALL_CLEAR: &str = "System appears to be running normally. No immediate action required.";

/// Strips ANSI/OSC escape sequences from a string to prevent terminal injection.
fn sanitize_terminal(input: &str) -> String {
    input.chars().filter(|c| *c != '\x1b').collect()
}

#[allow(clippy::cast_precision_loss)]
fn gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

#[allow(clippy::cast_precision_loss)]
fn mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

fn severity_badge(severity: Severity) -> String {
    let label = format!(" {severity} ");
    match severity {
        Severity::Critical => format!("{}", label.on_red().white().bold()),
        Severity::Warning => format!("{}", label.on_yellow().black().bold()),
        Severity::Info => format!("{}", label.on_blue().white()),
    }
}

fn priority_label(priority: Priority) -> String {
    let label = format!("[{priority}]");
    match priority {
        Priority::High => format!("{}", label.red().bold()),
        Priority::Medium => format!("{}", label.yellow()),
        Priority::Low => format!("{}", label.blue()),
    }
}

/// `title` underlined to its display width.
#[must_use]
pub fn section_header(title: &str) -> String {
    format!(
        "{}\n{}\n",
        title.bold().cyan(),
        "─".repeat(title.chars().count()).cyan()
    )
}

/// Writes the unavailable note and returns the data when present.
fn section<'a, T>(out: &mut String, title: &str, data: &'a SubsystemData<T>) -> Option<&'a T> {
    let _ = write!(out, "\n{}", section_header(title));
    match data {
        SubsystemData::Available(inner) => Some(inner),
        SubsystemData::Unavailable { note } => {
            let _ = writeln!(
                out,
                "  {}",
                format!("data unavailable: {}", sanitize_terminal(note)).dimmed()
            );
            None
        }
    }
}

fn reachability(value: Option<bool>) -> String {
    match value {
        Some(true) => format!("{}", "OK".green()),
        Some(false) => format!("{}", "FAILED".red().bold()),
        None => format!("{}", "not probed".dimmed()),
    }
}

fn write_snapshots(out: &mut String, report: &Report, policy: &ThresholdPolicy) {
    let disk_limit = policy.limit(Subsystem::Disk, metric::PERCENT_USED);
    let memory_limit = policy.limit(Subsystem::Memory, metric::PERCENT_USED);
    let swap_limit = policy.limit(Subsystem::Memory, metric::SWAP_PERCENT);
    let cpu_limit = policy.limit(Subsystem::Cpu, metric::USAGE_PERCENT);
    let temperature_limit = policy.limit(Subsystem::Cpu, metric::TEMPERATURE_CELSIUS);

    if let Some(info) = section(out, "System", report.system_info()) {
        let _ = writeln!(
            out,
            "  OS: {} {}",
            info.os_name.as_deref().unwrap_or("unknown"),
            info.os_version.as_deref().unwrap_or("")
        );
        if let Some(kernel) = &info.kernel_version {
            let _ = writeln!(out, "  Kernel: {kernel}");
        }
        let _ = writeln!(out, "  Architecture: {}", info.architecture);
        if let Some(brand) = &info.cpu_brand {
            let _ = writeln!(out, "  Processor: {brand}");
        }
    }

    if let Some(disk) = section(out, "Disk", report.disk_health()) {
        if disk.partitions.is_empty() {
            let _ = writeln!(out, "  No partitions found");
        }
        for p in &disk.partitions {
            let _ = writeln!(out, "  {} ({}):", p.device, p.mount_point);
            let _ = writeln!(
                out,
                "    Total: {:.2} GB | Used: {:.2} GB | Free: {:.2} GB",
                gb(p.total_bytes),
                gb(p.used_bytes),
                gb(p.free_bytes)
            );
            let _ = writeln!(
                out,
                "    {} {}",
                usage_bar(p.percent_used, 20, disk_limit),
                usage_percent(p.percent_used, disk_limit)
            );
        }
    }

    if let Some(memory) = section(out, "Memory", report.memory_health()) {
        let _ = writeln!(
            out,
            "  RAM: {:.2} GB / {:.2} GB {} {}",
            gb(memory.used_bytes),
            gb(memory.total_bytes),
            usage_bar(memory.percent_used, 20, memory_limit),
            usage_percent(memory.percent_used, memory_limit)
        );
        let _ = writeln!(out, "  Available: {:.2} GB", gb(memory.available_bytes));
        match &memory.swap {
            Some(swap) => {
                let _ = writeln!(
                    out,
                    "  Swap: {:.2} GB / {:.2} GB ({})",
                    gb(swap.used_bytes),
                    gb(swap.total_bytes),
                    usage_percent(swap.percent_used, swap_limit)
                );
            }
            None => {
                let _ = writeln!(out, "  Swap: none");
            }
        }
    }

    if let Some(cpu) = section(out, "CPU", report.cpu_health()) {
        let _ = writeln!(
            out,
            "  CPU Usage: {} {}",
            usage_bar(cpu.usage_percent, 20, cpu_limit),
            usage_percent(cpu.usage_percent, cpu_limit)
        );
        let _ = writeln!(out, "  Cores: {}", cpu.core_count);
        if let Some(freq) = cpu.frequency_mhz {
            let _ = writeln!(out, "  Frequency: {freq} MHz");
        }
        for t in &cpu.temperatures {
            let limit = temperature_limit
                .map(|&l| t.critical_celsius.map_or(l, |critical| l.tightened(critical)));
            let _ = writeln!(
                out,
                "  {}: {}",
                sanitize_terminal(&t.label),
                temperature(t.celsius, limit.as_ref())
            );
        }
    }

    if let Some(network) = section(out, "Network", report.network_health()) {
        let _ = writeln!(
            out,
            "  Bytes Sent: {:.2} MB | Bytes Received: {:.2} MB",
            mb(network.total_bytes_sent),
            mb(network.total_bytes_received)
        );
        let _ = writeln!(out, "  Interfaces: {}", network.interfaces.len());
        let _ = writeln!(
            out,
            "  Localhost Connectivity: {}",
            reachability(network.localhost_reachable)
        );
        for iface in network.interfaces.iter().filter(|i| i.reachable.is_some()) {
            let _ = writeln!(out, "  {}: {}", iface.name, reachability(iface.reachable));
        }
    }

    if let Some(process) = section(out, "Processes", report.process_health()) {
        let _ = writeln!(out, "  Total Processes: {}", process.total_processes);
        let _ = writeln!(out, "  Top CPU Processes:");
        for p in process.processes.iter().take(TOP_PROCESSES) {
            let _ = writeln!(
                out,
                "    {} (PID: {}): {:.1}%",
                sanitize_terminal(&p.name),
                p.pid,
                p.cpu_percent
            );
        }
        let mut by_memory: Vec<_> = process.processes.iter().collect();
        by_memory.sort_by(|a, b| b.memory_percent.total_cmp(&a.memory_percent));
        let _ = writeln!(out, "  Top Memory Processes:");
        for p in by_memory.into_iter().take(TOP_PROCESSES) {
            let _ = writeln!(
                out,
                "    {} (PID: {}): {:.1}%",
                sanitize_terminal(&p.name),
                p.pid,
                p.memory_percent
            );
        }
    }
}

fn write_findings(out: &mut String, report: &Report) {
    let _ = write!(out, "\n{}", section_header("Recommendations"));
    if report.recommendations().is_empty() {
        let _ = writeln!(out, "  {}", ALL_CLEAR.green());
    }
    for (i, rec) in report.recommendations().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} {}",
            i + 1,
            priority_label(rec.priority),
            sanitize_terminal(&rec.text)
        );
    }

    let _ = writeln!(out, "\n{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{}", "DIAGNOSTIC SUMMARY".bold());
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    if report.issues().is_empty() {
        let _ = writeln!(out, "{}", "✓ No critical issues detected".green().bold());
    } else {
        let _ = writeln!(out, "⚠ {} issue(s) detected:", report.issues().len());
        for issue in report.issues() {
            let _ = writeln!(
                out,
                "  {} {} {}",
                severity_badge(issue.severity),
                issue.severity.emoji(),
                sanitize_terminal(&issue.message)
            );
        }
    }
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}

/// Renders the human-readable console summary of a report, colouring
/// gauges by the limits of `policy`.
#[must_use]
pub fn render_report(report: &Report, policy: &ThresholdPolicy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{}", "SYSTEM DIAGNOSTIC REPORT".bold().cyan());
    let _ = writeln!(
        out,
        "{}",
        report.timestamp().format("%Y-%m-%d %H:%M:%S UTC").to_string().dimmed()
    );
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    write_snapshots(&mut out, report, policy);
    write_findings(&mut out, report);
    out
}

pub fn print_report(report: &Report, policy: &ThresholdPolicy) {
    print!("{}", render_report(report, policy));
}
