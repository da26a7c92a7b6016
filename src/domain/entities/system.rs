use serde::{Deserialize, Serialize};

/// Static description of the host. Informational only, never evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub kernel_version: Option<String>,
    pub architecture: String,
    pub hostname: Option<String>,
    pub cpu_brand: Option<String>,
    pub logical_cores: usize,
}
