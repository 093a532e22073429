//! Trust scoring: composite trust score, tier ladder, evidence confidence,
//! flag rules, and enterprise fit.

pub mod engine;
pub mod evidence;
pub mod fit;
pub mod rules;
pub mod tier;
pub mod trust;
pub mod types;

pub use engine::TrustEngine;
pub use rules::{FlagRule, RaisedFlags, RuleCatalog};
pub use tier::TierLadder;
pub use trust::compute_trust_score;
pub use types::*;
