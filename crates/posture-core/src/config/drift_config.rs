//! Drift detector configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DRIFT_WINDOW, DEFAULT_TOP_N};

/// Configuration for drift detection and the daily brief.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DriftConfig {
    /// Lookback window: "24h" | "7d" | "30d". Default: "24h".
    pub default_window: Option<String>,
    /// Entries per top-movers / top-downgrades list. Default: 10.
    pub top_n: Option<usize>,
}

impl DriftConfig {
    /// Returns the effective lookback window, defaulting to "24h".
    pub fn effective_window(&self) -> &str {
        self.default_window.as_deref().unwrap_or(DEFAULT_DRIFT_WINDOW)
    }

    /// Returns the effective list length, defaulting to 10.
    pub fn effective_top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }
}
