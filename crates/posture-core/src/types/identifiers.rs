//! String-backed ID types.
//!
//! Each ID type wraps a `String` to prevent cross-type confusion: a
//! `ControlId` cannot be passed where a `CapabilityId` is expected. IDs are
//! `Ord` so every derived report can be emitted in a stable order.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new ID.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Capability catalog identifier (e.g. `edr`, `waf`).
    CapabilityId
);

define_id!(
    /// Control catalog identifier.
    ControlId
);

define_id!(
    /// Tool inventory identifier.
    ToolId
);

define_id!(
    /// Monitored entity identifier (an MCP server).
    EntityId
);

define_id!(
    /// Tenant identifier.
    TenantId
);

define_id!(
    /// Flag rule identifier.
    RuleId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_ids_look_up_by_str() {
        let mut map: FxHashMap<CapabilityId, f64> = FxHashMap::default();
        map.insert(CapabilityId::new("edr"), 0.8);
        assert_eq!(map.get("edr"), Some(&0.8));
    }

    #[test]
    fn test_ids_display_raw_value() {
        let id = ControlId::new("AC-2");
        assert_eq!(id.to_string(), "AC-2");
        assert_eq!(id.as_str(), "AC-2");
    }

    #[test]
    fn test_ids_order_lexically() {
        let mut ids = vec![EntityId::new("b"), EntityId::new("a"), EntityId::new("c")];
        ids.sort();
        assert_eq!(ids, vec![EntityId::new("a"), EntityId::new("b"), EntityId::new("c")]);
    }
}
