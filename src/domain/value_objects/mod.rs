pub mod priority;
pub mod severity;
pub mod subsystem;
pub mod thresholds;

pub use priority::Priority;
pub use severity::Severity;
pub use subsystem::Subsystem;
pub use thresholds::{ConfigError, Direction, Limit, ThresholdPolicy};
