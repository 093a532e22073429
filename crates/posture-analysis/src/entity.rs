//! Descriptive metadata for a monitored entity (an MCP server).

use serde::{Deserialize, Serialize};

use posture_core::types::{EntityId, FxHashMap};

/// Display and filter attributes for one entity, supplied by the registry
/// collaborator. Never scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProfile {
    pub entity_id: EntityId,
    pub server_name: String,
    pub provider_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub deployment_type: String,
    #[serde(default)]
    pub auth_model: String,
}

impl EntityProfile {
    pub fn new(entity_id: &str, server_name: &str, provider_name: &str) -> Self {
        Self {
            entity_id: EntityId::new(entity_id),
            server_name: server_name.to_string(),
            provider_name: provider_name.to_string(),
            category: String::new(),
            deployment_type: String::new(),
            auth_model: String::new(),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_deployment_type(mut self, deployment_type: &str) -> Self {
        self.deployment_type = deployment_type.to_string();
        self
    }

    pub fn with_auth_model(mut self, auth_model: &str) -> Self {
        self.auth_model = auth_model.to_string();
        self
    }
}

/// Index profiles by entity id. Later duplicates replace earlier ones.
pub(crate) fn profile_lookup(profiles: &[EntityProfile]) -> FxHashMap<&str, &EntityProfile> {
    profiles
        .iter()
        .map(|p| (p.entity_id.as_str(), p))
        .collect()
}
