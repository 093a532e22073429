//! Non-fatal input warnings.
//!
//! Malformed inputs are normalized locally (clamped, defaulted, or
//! de-duplicated) and the computation proceeds. Each adjustment is reported
//! back to the caller as one of these values.

use serde::Serialize;

use super::error_code::{self, PostureErrorCode};
use crate::types::{CapabilityId, ControlId, EntityId, ToolId};

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputWarning {
    #[error("Tool {tool_id} strength for {capability_id} clamped from {original} to {clamped}")]
    StrengthClamped {
        tool_id: ToolId,
        capability_id: CapabilityId,
        original: f64,
        clamped: f64,
    },

    #[error("Control {control_id} weight for {capability_id} clamped from {original} to {clamped}")]
    WeightClamped {
        control_id: ControlId,
        capability_id: CapabilityId,
        original: f64,
        clamped: f64,
    },

    #[error("Control {control_id} min strength for {capability_id} clamped from {original} to {clamped}")]
    MinStrengthClamped {
        control_id: ControlId,
        capability_id: CapabilityId,
        original: f64,
        clamped: f64,
    },

    #[error("Control {control_id} requires {capability_id} more than once; later requirement ignored")]
    DuplicateRequirement {
        control_id: ControlId,
        capability_id: CapabilityId,
    },

    #[error("Control {control_id} has unknown status '{status}'; counted as not started")]
    UnknownStatus { control_id: ControlId, status: String },

    #[error("Status '{status}' supplied for control {control_id}, which is not in the catalog; ignored")]
    UnknownControlStatus { control_id: ControlId, status: String },

    #[error("Entity {entity_id} subscore {domain} clamped from {original} to {clamped}")]
    SubscoreClamped {
        entity_id: EntityId,
        domain: &'static str,
        original: u8,
        clamped: u8,
    },
}

impl PostureErrorCode for InputWarning {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStatus { .. } => error_code::UNKNOWN_STATUS,
            Self::UnknownControlStatus { .. } => error_code::UNKNOWN_CONTROL,
            Self::DuplicateRequirement { .. } => error_code::DUPLICATE_REQUIREMENT,
            _ => error_code::INPUT_CLAMPED,
        }
    }
}

/// Clamp a value to `[0.0, 1.0]`, mapping NaN to 0.0.
///
/// Returns the clamped value and whether it differs from the input.
pub fn clamp_unit(value: f64) -> (f64, bool) {
    if value.is_nan() {
        return (0.0, true);
    }
    let clamped = value.clamp(0.0, 1.0);
    (clamped, clamped != value)
}
