pub mod scan;
pub mod thresholds;
