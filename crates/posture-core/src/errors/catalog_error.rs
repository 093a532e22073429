//! Catalog integrity errors.

use super::error_code::{self, PostureErrorCode};
use crate::types::{CapabilityId, ControlId};

/// Errors raised when the capability/control catalog is inconsistent.
///
/// `UnknownCapability` is per-control: the engine returns it instead of a
/// coverage score so callers can tell "coverage is low" from "could not
/// compute".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Control {control_id} references unknown capability {capability_id}")]
    UnknownCapability {
        control_id: ControlId,
        capability_id: CapabilityId,
    },

    #[error("Unknown control: {0}")]
    UnknownControl(ControlId),

    #[error("Duplicate {kind} id in catalog: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Catalog file not found: {path}")]
    FileNotFound { path: String },

    #[error("Catalog parse error in {path}: {message}")]
    ParseError { path: String, message: String },
}

impl PostureErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } | Self::ParseError { .. } => error_code::CATALOG_PARSE,
            _ => error_code::CATALOG_INTEGRITY,
        }
    }
}
