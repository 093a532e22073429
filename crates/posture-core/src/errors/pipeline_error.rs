//! Pipeline errors.

use super::error_code::PostureErrorCode;
use super::{CatalogError, ConfigError, DriftError, ScoringError};

/// Errors that can occur during a batch run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Drift error: {0}")]
    Drift(#[from] DriftError),
}

impl PostureErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Scoring(e) => e.error_code(),
            Self::Drift(e) => e.error_code(),
        }
    }
}
