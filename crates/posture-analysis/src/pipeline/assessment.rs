//! Per-entity pipeline: score → classify drift against the entity's history.

use serde::Serialize;

use posture_core::errors::{InputWarning, PipelineError};
use posture_core::events::{DowngradeDetectedEvent, EventDispatcher, SnapshotScoredEvent};
use posture_core::types::EntityId;

use crate::drift::{DriftClassification, DriftDetector, LookbackWindow, SnapshotHistory};
use crate::scoring::{AssessmentInput, ScoreSnapshot, TrustEngine};

/// One entity to assess: the new input plus its stored history.
#[derive(Debug, Clone)]
pub struct EntityAssessment {
    pub input: AssessmentInput,
    pub history: SnapshotHistory,
}

impl EntityAssessment {
    pub fn new(input: AssessmentInput, history: SnapshotHistory) -> Self {
        Self { input, history }
    }

    /// An assessment for an entity with no stored snapshots.
    pub fn first(input: AssessmentInput) -> Self {
        let history = SnapshotHistory::new(input.entity_id.clone());
        Self { input, history }
    }
}

/// The fresh snapshot and how it moved against the in-window baseline.
///
/// The snapshot is not appended to the history; persisting it is the
/// caller's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReport {
    pub entity_id: EntityId,
    pub snapshot: ScoreSnapshot,
    pub window: LookbackWindow,
    pub drift: DriftClassification,
    pub warnings: Vec<InputWarning>,
}

/// Runs the scoring and drift stages for one entity.
#[derive(Debug, Clone, Default)]
pub struct EntityPipeline {
    window: LookbackWindow,
    events: EventDispatcher,
}

impl EntityPipeline {
    pub fn new(window: LookbackWindow) -> Self {
        Self {
            window,
            events: EventDispatcher::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn window(&self) -> LookbackWindow {
        self.window
    }

    pub fn run(
        &self,
        engine: &TrustEngine,
        history: &SnapshotHistory,
        input: &AssessmentInput,
    ) -> Result<EntityReport, PipelineError> {
        let (snapshot, warnings) = engine.score(input)?.into_parts();
        self.events.emit_snapshot_scored(&SnapshotScoredEvent {
            entity_id: snapshot.entity_id.to_string(),
            trust_score: snapshot.trust_score,
            tier: snapshot.tier.to_string(),
            evidence_confidence: snapshot.evidence_confidence.level(),
        });

        let drift = DriftDetector::new().classify_in_history(&snapshot, history, self.window)?;
        if let DriftClassification::Downgrade(movement) = &drift {
            tracing::info!(
                entity_id = %movement.entity_id,
                score_delta = movement.score_delta,
                "downgrade detected"
            );
            self.events.emit_downgrade_detected(&DowngradeDetectedEvent {
                entity_id: movement.entity_id.to_string(),
                score_delta: movement.score_delta,
                reason_codes: movement.reason_codes.iter().map(|d| d.to_string()).collect(),
            });
        }

        Ok(EntityReport {
            entity_id: snapshot.entity_id.clone(),
            snapshot,
            window: self.window,
            drift,
            warnings,
        })
    }
}
