use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Machine area an issue or recommendation belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    Disk,
    Memory,
    Cpu,
    Network,
    Process,
}

impl Subsystem {
    pub const ALL: [Self; 5] = [
        Self::Disk,
        Self::Memory,
        Self::Cpu,
        Self::Network,
        Self::Process,
    ];

    /// Stable lowercase name, also used as the ordering key in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disk => "disk",
            Self::Memory => "memory",
            Self::Cpu => "cpu",
            Self::Network => "network",
            Self::Process => "process",
        }
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subsystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subsystem| subsystem.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
