//! Trust scoring configuration: tier thresholds and the flag rule catalog.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TIER_A_MIN, DEFAULT_TIER_B_MIN, DEFAULT_TIER_C_MIN};

/// Whether a matched rule raises a risk flag or a fail-fast flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Risk,
    FailFast,
}

/// One row of the flag rule table: when `fact` is true, raise `flag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub id: String,
    pub fact: String,
    pub flag: String,
    pub kind: RuleKind,
}

/// Resolved tier thresholds (inclusive lower bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierThresholds {
    pub a_min: u8,
    pub b_min: u8,
    pub c_min: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            a_min: DEFAULT_TIER_A_MIN,
            b_min: DEFAULT_TIER_B_MIN,
            c_min: DEFAULT_TIER_C_MIN,
        }
    }
}

/// Configuration for the trust/tier scoring engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum trust score for Tier A. Default: 85.
    pub tier_a_min: Option<u8>,
    /// Minimum trust score for Tier B. Default: 70.
    pub tier_b_min: Option<u8>,
    /// Minimum trust score for Tier C. Default: 50.
    pub tier_c_min: Option<u8>,
    /// Audit label for the threshold/rule set in force.
    pub thresholds_version: Option<String>,
    /// Flag rule table.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl ScoringConfig {
    /// Returns the effective tier thresholds.
    pub fn effective_thresholds(&self) -> TierThresholds {
        TierThresholds {
            a_min: self.tier_a_min.unwrap_or(DEFAULT_TIER_A_MIN),
            b_min: self.tier_b_min.unwrap_or(DEFAULT_TIER_B_MIN),
            c_min: self.tier_c_min.unwrap_or(DEFAULT_TIER_C_MIN),
        }
    }

    /// Returns the effective thresholds version, defaulting to "default".
    pub fn effective_thresholds_version(&self) -> &str {
        self.thresholds_version.as_deref().unwrap_or("default")
    }
}
