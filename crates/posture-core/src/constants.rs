//! Shared constants for the Posture scoring engine.

/// Posture version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum trust score for Tier A (inclusive).
pub const DEFAULT_TIER_A_MIN: u8 = 85;

/// Minimum trust score for Tier B (inclusive).
pub const DEFAULT_TIER_B_MIN: u8 = 70;

/// Minimum trust score for Tier C (inclusive).
pub const DEFAULT_TIER_C_MIN: u8 = 50;

/// Upper bound of the 0-5 ordinal domain subscore scale.
pub const SUBSCORE_MAX: u8 = 5;

/// Number of scored domains (D1..D6).
pub const DOMAIN_COUNT: usize = 6;

/// Multiplier mapping the mean subscore (0-5) onto the 0-100 trust scale.
pub const TRUST_SCALE: f64 = 20.0;

/// Upper bound of the trust score.
pub const TRUST_SCORE_MAX: u8 = 100;

/// Default drift lookback window.
pub const DEFAULT_DRIFT_WINDOW: &str = "24h";

/// Accepted drift lookback windows.
pub const DRIFT_WINDOWS: &[&str] = &["24h", "7d", "30d"];

/// Default number of entries in top-movers / top-downgrades lists.
pub const DEFAULT_TOP_N: usize = 10;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "posture.toml";

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "POSTURE_LOG";

/// Log filter used when `POSTURE_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "posture=info";
