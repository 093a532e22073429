//! Catalog location configuration.

use serde::{Deserialize, Serialize};

/// Where the capability/control catalog is loaded from.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog TOML file, relative to the project root.
    pub path: Option<String>,
}
