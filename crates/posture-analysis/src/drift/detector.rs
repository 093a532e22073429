//! Drift detector.
//!
//! score_delta = current.trust_score − baseline.trust_score
//!
//! > 0 → Mover, < 0 → Downgrade, = 0 → Stable, no baseline → NewEntrant.

use std::cmp::Reverse;

use posture_core::errors::DriftError;
use posture_core::types::SmallVec6;

use super::history::SnapshotHistory;
use super::types::*;
use crate::scoring::{Domain, ScoreSnapshot};

/// Classifies a snapshot against its baseline.
pub struct DriftDetector;

impl DriftDetector {
    pub fn new() -> Self {
        Self
    }

    /// Classify `current` against `prior`.
    ///
    /// The window is enforced here as well: a prior outside
    /// `[current − window, current)` is treated as absent.
    pub fn classify(
        &self,
        current: &ScoreSnapshot,
        prior: Option<&ScoreSnapshot>,
        window: LookbackWindow,
    ) -> Result<DriftClassification, DriftError> {
        let prior = match prior {
            Some(prior) => prior,
            None => return Ok(DriftClassification::NewEntrant),
        };
        if prior.entity_id != current.entity_id {
            return Err(DriftError::EntityMismatch {
                expected: current.entity_id.clone(),
                found: prior.entity_id.clone(),
            });
        }
        let in_window = prior.assessed_at >= window.start(current.assessed_at)
            && prior.assessed_at < current.assessed_at;
        if !in_window {
            return Ok(DriftClassification::NewEntrant);
        }

        let movement = movement(current, prior);
        tracing::debug!(
            entity_id = %current.entity_id,
            score_delta = movement.score_delta,
            window = %window,
            "drift classified"
        );
        Ok(match movement.score_delta {
            d if d > 0 => DriftClassification::Mover(movement),
            d if d < 0 => DriftClassification::Downgrade(movement),
            _ => DriftClassification::Stable(movement),
        })
    }

    /// Classify `current` against the baseline its history offers.
    pub fn classify_in_history(
        &self,
        current: &ScoreSnapshot,
        history: &SnapshotHistory,
        window: LookbackWindow,
    ) -> Result<DriftClassification, DriftError> {
        if history.entity_id() != &current.entity_id {
            return Err(DriftError::EntityMismatch {
                expected: history.entity_id().clone(),
                found: current.entity_id.clone(),
            });
        }
        self.classify(current, history.baseline(current, window), window)
    }
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn movement(current: &ScoreSnapshot, prior: &ScoreSnapshot) -> ScoreMovement {
    let score_delta = i16::from(current.trust_score) - i16::from(prior.trust_score);
    let direction = score_delta.signum();

    let reason_codes: SmallVec6<Domain> = if direction == 0 {
        SmallVec6::new()
    } else {
        Domain::all()
            .iter()
            .copied()
            .filter(|&d| {
                let delta = i16::from(current.subscores.get(d)) - i16::from(prior.subscores.get(d));
                delta.signum() == direction && delta.abs() >= 1
            })
            .collect()
    };

    ScoreMovement {
        entity_id: current.entity_id.clone(),
        score_delta,
        reason_codes,
        evidence_confidence_delta: current.evidence_confidence.level() as i8
            - prior.evidence_confidence.level() as i8,
        flag_changes: FlagChanges::between(&prior.risk_flags, &current.risk_flags),
        fail_fast_changes: FlagChanges::between(&prior.fail_fast_flags, &current.fail_fast_flags),
    }
}

/// Top `n` movements by |score_delta| descending, ties by entity id ascending.
pub fn rank_movements<'a, I>(movements: I, n: usize) -> Vec<ScoreMovement>
where
    I: IntoIterator<Item = &'a ScoreMovement>,
{
    let mut ranked: Vec<ScoreMovement> = movements.into_iter().cloned().collect();
    ranked.sort_by(|a, b| {
        (Reverse(a.score_delta.unsigned_abs()), &a.entity_id)
            .cmp(&(Reverse(b.score_delta.unsigned_abs()), &b.entity_id))
    });
    ranked.truncate(n);
    ranked
}
