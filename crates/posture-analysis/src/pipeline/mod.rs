//! Batch pipeline: per-tenant coverage and per-entity scoring, fanned out
//! across a batch with rayon.

pub mod assessment;
pub mod batch;
pub mod outcome;
pub mod tenant;

pub use assessment::{EntityAssessment, EntityPipeline, EntityReport};
pub use batch::{BatchInput, BatchReport, BatchRunner};
pub use outcome::ItemOutcome;
pub use tenant::{TenantInventory, TenantPipeline, TenantReport};
