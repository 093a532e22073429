//! TrustEngine: turns one assessment input into a ScoreSnapshot.

use posture_core::config::ScoringConfig;
use posture_core::constants::SUBSCORE_MAX;
use posture_core::errors::{Checked, InputWarning, ScoringError};

use super::evidence::evidence_confidence;
use super::fit::enterprise_fit;
use super::rules::RuleCatalog;
use super::tier::TierLadder;
use super::trust::compute_trust_score;
use super::types::{AssessmentInput, ScoreSnapshot};

/// Scores entities against one resolved threshold ladder and rule table.
///
/// Built once per batch and shared read-only; `score` holds no state
/// between calls.
#[derive(Debug, Clone)]
pub struct TrustEngine {
    ladder: TierLadder,
    rules: RuleCatalog,
    thresholds_version: String,
}

impl TrustEngine {
    pub fn new(config: &ScoringConfig) -> Result<Self, ScoringError> {
        Ok(Self {
            ladder: TierLadder::new(config.effective_thresholds()),
            rules: RuleCatalog::from_config(&config.rules)?,
            thresholds_version: config.effective_thresholds_version().to_string(),
        })
    }

    pub fn ladder(&self) -> &TierLadder {
        &self.ladder
    }

    pub fn rules(&self) -> &RuleCatalog {
        &self.rules
    }

    pub fn thresholds_version(&self) -> &str {
        &self.thresholds_version
    }

    /// Score one entity. Out-of-range subscores clamp to 5 with a warning;
    /// a rule over an undefined fact fails this entity.
    pub fn score(&self, input: &AssessmentInput) -> Result<Checked<ScoreSnapshot>, ScoringError> {
        let (subscores, adjusted) = input.subscores.clamped();
        let warnings: Vec<InputWarning> = adjusted
            .into_iter()
            .map(|(domain, original)| {
                tracing::warn!(
                    entity_id = %input.entity_id,
                    domain = domain.as_str(),
                    original,
                    "subscore out of range; clamped"
                );
                InputWarning::SubscoreClamped {
                    entity_id: input.entity_id.clone(),
                    domain: domain.as_str(),
                    original,
                    clamped: SUBSCORE_MAX,
                }
            })
            .collect();

        let flags = self.rules.evaluate(&input.entity_id, &input.facts)?;

        let trust_score = compute_trust_score(&subscores);
        let tier = self.ladder.tier_for(trust_score);
        let confidence = evidence_confidence(&input.evidence);
        let fit = enterprise_fit(tier, !flags.risk.is_empty(), !flags.fail_fast.is_empty());

        tracing::debug!(
            entity_id = %input.entity_id,
            trust_score,
            tier = tier.as_str(),
            evidence_confidence = confidence.level(),
            "snapshot scored"
        );

        Ok(Checked::with_warnings(
            ScoreSnapshot {
                entity_id: input.entity_id.clone(),
                trust_score,
                tier,
                evidence_confidence: confidence,
                subscores,
                risk_flags: flags.risk,
                fail_fast_flags: flags.fail_fast,
                enterprise_fit: fit,
                assessed_at: input.assessed_at,
            },
            warnings,
        ))
    }
}

impl Default for TrustEngine {
    fn default() -> Self {
        Self {
            ladder: TierLadder::default(),
            rules: RuleCatalog::default(),
            thresholds_version: "default".to_string(),
        }
    }
}
