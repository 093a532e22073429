//! Error handling for Posture.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//! Non-fatal problems are `InputWarning`s carried in `Checked<T>`.

pub mod catalog_error;
pub mod checked;
pub mod config_error;
pub mod drift_error;
pub mod error_code;
pub mod input_warning;
pub mod pipeline_error;
pub mod scoring_error;

pub use catalog_error::CatalogError;
pub use checked::Checked;
pub use config_error::ConfigError;
pub use drift_error::DriftError;
pub use error_code::PostureErrorCode;
pub use input_warning::InputWarning;
pub use pipeline_error::PipelineError;
pub use scoring_error::ScoringError;
