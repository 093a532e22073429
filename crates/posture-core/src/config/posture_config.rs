//! Top-level Posture configuration with layered resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CatalogConfig, DriftConfig, ScoringConfig};
use crate::constants::{DRIFT_WINDOWS, PROJECT_CONFIG_FILE, TRUST_SCORE_MAX};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`POSTURE_*`)
/// 3. Project config (`posture.toml` in project root)
/// 4. User config (`~/.posture/config.toml`)
/// 5. Compiled defaults
///
/// A batch run resolves this once and treats it as immutable until the run
/// completes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PostureConfig {
    pub scoring: ScoringConfig,
    pub drift: DriftConfig,
    pub catalog: CatalogConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tier_a_min: Option<u8>,
    pub tier_b_min: Option<u8>,
    pub tier_c_min: Option<u8>,
    pub drift_window: Option<String>,
    pub top_n: Option<usize>,
    pub catalog_path: Option<String>,
}

impl PostureConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &PostureConfig) -> Result<(), ConfigError> {
        let t = config.scoring.effective_thresholds();
        for (field, value) in [
            ("scoring.tier_a_min", t.a_min),
            ("scoring.tier_b_min", t.b_min),
            ("scoring.tier_c_min", t.c_min),
        ] {
            if value > TRUST_SCORE_MAX {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        if !(t.a_min > t.b_min && t.b_min > t.c_min) {
            return Err(ConfigError::ValidationFailed {
                field: "scoring".to_string(),
                message: format!(
                    "tier thresholds must be strictly descending (A {} > B {} > C {})",
                    t.a_min, t.b_min, t.c_min
                ),
            });
        }

        let mut seen = HashSet::new();
        for rule in &config.scoring.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.rules".to_string(),
                    message: format!("duplicate rule id '{}'", rule.id),
                });
            }
            if rule.fact.trim().is_empty() || rule.flag.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.rules".to_string(),
                    message: format!("rule '{}' must name a fact and a flag", rule.id),
                });
            }
        }

        if !DRIFT_WINDOWS.contains(&config.drift.effective_window()) {
            return Err(ConfigError::ValidationFailed {
                field: "drift.default_window".to_string(),
                message: format!("must be one of {}", DRIFT_WINDOWS.join(", ")),
            });
        }
        if config.drift.effective_top_n() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "drift.top_n".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the catalog path against the project root, if configured.
    pub fn catalog_path(&self, root: &Path) -> Option<PathBuf> {
        self.catalog.path.as_ref().map(|p| {
            let p = Path::new(p);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            }
        })
    }

    /// Returns the user config path: `~/.posture/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".posture").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored (forward-compatible).
    fn merge_toml_file(config: &mut PostureConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PostureConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut PostureConfig, other: &PostureConfig) {
        // Scoring
        if other.scoring.tier_a_min.is_some() {
            base.scoring.tier_a_min = other.scoring.tier_a_min;
        }
        if other.scoring.tier_b_min.is_some() {
            base.scoring.tier_b_min = other.scoring.tier_b_min;
        }
        if other.scoring.tier_c_min.is_some() {
            base.scoring.tier_c_min = other.scoring.tier_c_min;
        }
        if other.scoring.thresholds_version.is_some() {
            base.scoring.thresholds_version = other.scoring.thresholds_version.clone();
        }
        if !other.scoring.rules.is_empty() {
            base.scoring.rules = other.scoring.rules.clone();
        }

        // Drift
        if other.drift.default_window.is_some() {
            base.drift.default_window = other.drift.default_window.clone();
        }
        if other.drift.top_n.is_some() {
            base.drift.top_n = other.drift.top_n;
        }

        // Catalog
        if other.catalog.path.is_some() {
            base.catalog.path = other.catalog.path.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `POSTURE_TIER_A_MIN`, `POSTURE_DRIFT_WINDOW`, etc.
    fn apply_env_overrides(config: &mut PostureConfig) {
        if let Ok(val) = std::env::var("POSTURE_TIER_A_MIN") {
            if let Ok(v) = val.parse::<u8>() {
                config.scoring.tier_a_min = Some(v);
            }
        }
        if let Ok(val) = std::env::var("POSTURE_TIER_B_MIN") {
            if let Ok(v) = val.parse::<u8>() {
                config.scoring.tier_b_min = Some(v);
            }
        }
        if let Ok(val) = std::env::var("POSTURE_TIER_C_MIN") {
            if let Ok(v) = val.parse::<u8>() {
                config.scoring.tier_c_min = Some(v);
            }
        }
        if let Ok(val) = std::env::var("POSTURE_DRIFT_WINDOW") {
            config.drift.default_window = Some(val);
        }
        if let Ok(val) = std::env::var("POSTURE_DRIFT_TOP_N") {
            if let Ok(v) = val.parse::<usize>() {
                config.drift.top_n = Some(v);
            }
        }
        if let Ok(val) = std::env::var("POSTURE_CATALOG_PATH") {
            config.catalog.path = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PostureConfig, cli: &CliOverrides) {
        if let Some(v) = cli.tier_a_min {
            config.scoring.tier_a_min = Some(v);
        }
        if let Some(v) = cli.tier_b_min {
            config.scoring.tier_b_min = Some(v);
        }
        if let Some(v) = cli.tier_c_min {
            config.scoring.tier_c_min = Some(v);
        }
        if let Some(ref v) = cli.drift_window {
            config.drift.default_window = Some(v.clone());
        }
        if let Some(v) = cli.top_n {
            config.drift.top_n = Some(v);
        }
        if let Some(ref v) = cli.catalog_path {
            config.catalog.path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
