//! Results that carry non-fatal warnings alongside the computed data.

use serde::Serialize;

use super::input_warning::InputWarning;

/// A computed value plus every warning raised while normalizing its inputs.
/// Allows callers to surface "computed, but from adjusted input".
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Checked<T> {
    /// The computed data.
    pub data: T,
    /// Non-fatal warnings collected during the computation.
    pub warnings: Vec<InputWarning>,
}

impl<T> Checked<T> {
    /// Wrap data with no warnings.
    pub fn new(data: T) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    /// Wrap data together with already-collected warnings.
    pub fn with_warnings(data: T, warnings: Vec<InputWarning>) -> Self {
        Self { data, warnings }
    }

    /// Returns true if no warnings were raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Transform the data, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Checked<U> {
        Checked {
            data: f(self.data),
            warnings: self.warnings,
        }
    }

    /// Split into data and warnings.
    pub fn into_parts(self) -> (T, Vec<InputWarning>) {
        (self.data, self.warnings)
    }
}
