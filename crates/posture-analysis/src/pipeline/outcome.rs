//! Per-item result of a batch stage.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use posture_core::errors::{PipelineError, PostureErrorCode};

/// Either a computed value or an explicit per-item failure.
///
/// A failure never carries a default score, so callers can tell "computed,
/// coverage is low" apart from "could not compute".
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome<T> {
    Computed { id: String, data: T },
    Failed { id: String, error: PipelineError },
}

impl<T> ItemOutcome<T> {
    pub fn computed(id: impl Into<String>, data: T) -> Self {
        Self::Computed {
            id: id.into(),
            data,
        }
    }

    pub fn failed(id: impl Into<String>, error: impl Into<PipelineError>) -> Self {
        Self::Failed {
            id: id.into(),
            error: error.into(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Computed { id, .. } | Self::Failed { id, .. } => id,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Computed { data, .. } => Some(data),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&PipelineError> {
        match self {
            Self::Computed { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

// {"outcome":"computed","id":..,"data":..}
// {"outcome":"failed","id":..,"errorCode":..,"error":..}
impl<T: Serialize> Serialize for ItemOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Computed { id, data } => {
                let mut s = serializer.serialize_struct("ItemOutcome", 3)?;
                s.serialize_field("outcome", "computed")?;
                s.serialize_field("id", id)?;
                s.serialize_field("data", data)?;
                s.end()
            }
            Self::Failed { id, error } => {
                let mut s = serializer.serialize_struct("ItemOutcome", 4)?;
                s.serialize_field("outcome", "failed")?;
                s.serialize_field("id", id)?;
                s.serialize_field("errorCode", error.error_code())?;
                s.serialize_field("error", &error.to_string())?;
                s.end()
            }
        }
    }
}
