pub mod aggregator;
pub mod assembler;
pub mod diagnostic;
pub mod recommender;

pub use aggregator::aggregate;
pub use assembler::{ValidationError, assemble};
pub use diagnostic::{DiagnosticService, ProbePlan};
pub use recommender::synthesize;
