//! PostureErrorCode trait for boundary conversion.

/// Trait for converting Posture errors to stable boundary codes.
/// Every error enum implements this so callers can distinguish
/// "could not compute" classes without matching on message text.
pub trait PostureErrorCode {
    /// Returns the stable code string (e.g., "CATALOG_INTEGRITY").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the engine boundary.
pub const CATALOG_INTEGRITY: &str = "CATALOG_INTEGRITY";
pub const CATALOG_PARSE: &str = "CATALOG_PARSE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNDEFINED_FACT: &str = "UNDEFINED_FACT";
pub const SCORING_ERROR: &str = "SCORING_ERROR";
pub const DRIFT_ERROR: &str = "DRIFT_ERROR";
pub const SNAPSHOT_ORDER: &str = "SNAPSHOT_ORDER";
pub const INPUT_CLAMPED: &str = "INPUT_CLAMPED";
pub const UNKNOWN_STATUS: &str = "UNKNOWN_STATUS";
pub const UNKNOWN_CONTROL: &str = "UNKNOWN_CONTROL";
pub const DUPLICATE_REQUIREMENT: &str = "DUPLICATE_REQUIREMENT";
