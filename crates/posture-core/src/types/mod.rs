//! Identifiers and collection aliases shared across Posture crates.

pub mod collections;
pub mod identifiers;

pub use collections::{BTreeMap, BTreeSet, FxHashMap, FxHashSet, SmallVec, SmallVec6};
pub use identifiers::{CapabilityId, ControlId, EntityId, RuleId, TenantId, ToolId};
