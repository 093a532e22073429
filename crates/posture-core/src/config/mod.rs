//! Configuration system for Posture.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod catalog_config;
pub mod drift_config;
pub mod posture_config;
pub mod scoring_config;

pub use catalog_config::CatalogConfig;
pub use drift_config::DriftConfig;
pub use posture_config::{CliOverrides, PostureConfig};
pub use scoring_config::{RuleConfig, RuleKind, ScoringConfig, TierThresholds};
