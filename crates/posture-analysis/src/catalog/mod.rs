//! Capability/control catalog: static reference data, loaded once per batch.

use std::path::Path;

use serde::{Deserialize, Serialize};

use posture_core::errors::CatalogError;
use posture_core::types::{CapabilityId, ControlId, FxHashMap};

use crate::coverage::types::{Capability, Control};

/// On-disk catalog layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub version: String,
    pub capabilities: Vec<Capability>,
    pub controls: Vec<Control>,
}

/// Immutable, versioned catalog of capabilities and controls.
///
/// Shared read-only (behind an `Arc`) by every tenant in a batch so that all
/// of them are classified against the same catalog version.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    capabilities: Vec<Capability>,
    controls: Vec<Control>,
    capability_lookup: FxHashMap<CapabilityId, usize>,
    control_lookup: FxHashMap<ControlId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate capability or control ids.
    ///
    /// Requirement references are not checked here: a control that names an
    /// unknown capability fails individually at classification time.
    pub fn new(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut capability_lookup = FxHashMap::default();
        for (i, cap) in file.capabilities.iter().enumerate() {
            if capability_lookup.insert(cap.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "capability",
                    id: cap.id.to_string(),
                });
            }
        }

        let mut control_lookup = FxHashMap::default();
        for (i, control) in file.controls.iter().enumerate() {
            if control_lookup.insert(control.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind: "control",
                    id: control.id.to_string(),
                });
            }
        }

        tracing::debug!(
            version = %file.version,
            capabilities = file.capabilities.len(),
            controls = file.controls.len(),
            "catalog loaded"
        );

        Ok(Self {
            version: file.version,
            capabilities: file.capabilities,
            controls: file.controls,
            capability_lookup,
            control_lookup,
        })
    }

    /// Parse a catalog from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(toml_str).map_err(|e| CatalogError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::new(file)
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|_| CatalogError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| CatalogError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::new(file)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Controls in catalog declaration order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn capability(&self, id: &str) -> Option<&Capability> {
        self.capability_lookup.get(id).map(|&i| &self.capabilities[i])
    }

    pub fn control(&self, id: &str) -> Result<&Control, CatalogError> {
        self.control_lookup
            .get(id)
            .map(|&i| &self.controls[i])
            .ok_or_else(|| CatalogError::UnknownControl(ControlId::new(id)))
    }

    /// Verify that every requirement of `control` names a catalog capability.
    pub fn check_control(&self, control: &Control) -> Result<(), CatalogError> {
        match control
            .requirements
            .iter()
            .find(|r| !self.capability_lookup.contains_key(r.capability_id().as_str()))
        {
            Some(r) => Err(CatalogError::UnknownCapability {
                control_id: control.id.clone(),
                capability_id: r.capability_id().clone(),
            }),
            None => Ok(()),
        }
    }
}
