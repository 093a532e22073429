//! Re-exports of the collection types used by the engine.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::{BTreeMap, BTreeSet};

/// SmallVec sized for per-domain data (six scored domains).
pub type SmallVec6<T> = SmallVec<[T; 6]>;
