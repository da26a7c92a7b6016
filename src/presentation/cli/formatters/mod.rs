pub mod gauge_fmt;
pub mod report_fmt;
