//! Posture analysis engine: capability coverage and gap classification,
//! trust/tier scoring, snapshot drift detection, rankings, and the batch
//! pipeline that fans these out across tenants and entities.
//!
//! Every component is a pure, synchronous function of its inputs. Shared
//! state is limited to the read-only [`catalog::Catalog`] and the resolved
//! scoring configuration, both fixed for the duration of a batch.

pub mod catalog;
pub mod coverage;
pub mod drift;
pub mod entity;
pub mod pipeline;
pub mod ranking;
pub mod scoring;
