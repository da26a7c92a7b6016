use serde::{Deserialize, Serialize};

use crate::domain::value_objects::priority::Priority;
use crate::domain::value_objects::subsystem::Subsystem;

/// Actionable advice derived from one or more issues
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    pub target: Subsystem,
    pub priority: Priority,
    pub text: String,
}
