pub mod disk;
pub mod issue;
pub mod network;
pub mod process;
pub mod recommendation;
pub mod report;
pub mod snapshot;
pub mod system;

pub use disk::{DiskSnapshot, PartitionInfo};
pub use issue::Issue;
pub use network::{InterfaceInfo, NetworkSnapshot};
pub use process::{ProcessInfo, ProcessSnapshot};
pub use recommendation::Recommendation;
pub use report::{Report, SCHEMA_VERSION};
pub use snapshot::{
    CpuSnapshot, MemorySnapshot, SnapshotSet, SubsystemData, SwapInfo, TemperatureReading,
};
pub use system::SystemInfo;
