//! Coverage pipeline: capability index, control gap classification,
//! tenant summary aggregation.

pub mod classifier;
pub mod index;
pub mod summary;
pub mod types;

pub use classifier::GapClassifier;
pub use index::CapabilityIndex;
pub use summary::SummaryAggregator;
pub use types::*;
