//! Drift detection errors.
//!
//! Missing history is never an error: it classifies as a new entrant.
//! These variants cover caller mistakes only.

use super::error_code::{self, PostureErrorCode};
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DriftError {
    #[error("Snapshot for {found} compared against history of {expected}")]
    EntityMismatch { expected: EntityId, found: EntityId },

    #[error("Snapshot for {entity_id} at {offered} is older than the newest stored snapshot at {newest}")]
    OutOfOrderSnapshot {
        entity_id: EntityId,
        newest: String,
        offered: String,
    },

    #[error("Invalid lookback window '{0}' (expected 24h, 7d or 30d)")]
    InvalidWindow(String),
}

impl PostureErrorCode for DriftError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfOrderSnapshot { .. } => error_code::SNAPSHOT_ORDER,
            _ => error_code::DRIFT_ERROR,
        }
    }
}
