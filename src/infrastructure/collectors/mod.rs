pub mod disk_collector;
pub mod ping_probe;
pub mod sysinfo_collector;

pub use ping_probe::PingProbe;
pub use sysinfo_collector::SysinfoCollector;
