pub mod collector;
pub mod probe;

pub use collector::{CollectionError, MetricsCollector};
pub use probe::{ProbeTarget, ReachabilityProbe};
