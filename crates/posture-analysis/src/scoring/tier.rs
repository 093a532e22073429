//! Tier threshold ladder.

use posture_core::config::TierThresholds;

use super::types::Tier;

/// Strict threshold ladder over the trust score, evaluated top-down.
///
/// Thresholds are inclusive lower bounds, so every integer score maps to
/// exactly one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLadder {
    thresholds: TierThresholds,
}

impl TierLadder {
    pub fn new(thresholds: TierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> TierThresholds {
        self.thresholds
    }

    pub fn tier_for(&self, trust_score: u8) -> Tier {
        if trust_score >= self.thresholds.a_min {
            Tier::A
        } else if trust_score >= self.thresholds.b_min {
            Tier::B
        } else if trust_score >= self.thresholds.c_min {
            Tier::C
        } else {
            Tier::D
        }
    }
}

impl Default for TierLadder {
    fn default() -> Self {
        Self::new(TierThresholds::default())
    }
}
