//! Append-only per-entity snapshot history.

use chrono::{DateTime, Utc};

use posture_core::errors::DriftError;
use posture_core::types::EntityId;

use super::types::LookbackWindow;
use crate::scoring::ScoreSnapshot;

/// Snapshots for one entity, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotHistory {
    entity_id: EntityId,
    snapshots: Vec<ScoreSnapshot>,
}

impl SnapshotHistory {
    pub fn new(entity_id: EntityId) -> Self {
        Self {
            entity_id,
            snapshots: Vec::new(),
        }
    }

    /// Build a history from snapshots in any order.
    pub fn from_snapshots(
        entity_id: EntityId,
        mut snapshots: Vec<ScoreSnapshot>,
    ) -> Result<Self, DriftError> {
        snapshots.sort_by_key(|s| s.assessed_at);
        let mut history = Self::new(entity_id);
        for snapshot in snapshots {
            history.push(snapshot)?;
        }
        Ok(history)
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Append a snapshot. Snapshots are never rewritten, so one for another
    /// entity or one older than the newest stored snapshot is rejected.
    pub fn push(&mut self, snapshot: ScoreSnapshot) -> Result<(), DriftError> {
        if snapshot.entity_id != self.entity_id {
            return Err(DriftError::EntityMismatch {
                expected: self.entity_id.clone(),
                found: snapshot.entity_id,
            });
        }
        if let Some(newest) = self.snapshots.last() {
            if snapshot.assessed_at < newest.assessed_at {
                return Err(DriftError::OutOfOrderSnapshot {
                    entity_id: self.entity_id.clone(),
                    newest: newest.assessed_at.to_rfc3339(),
                    offered: snapshot.assessed_at.to_rfc3339(),
                });
            }
        }
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn latest(&self) -> Option<&ScoreSnapshot> {
        self.snapshots.last()
    }

    /// The newest snapshot taken at or before `as_of`.
    pub fn latest_as_of(&self, as_of: DateTime<Utc>) -> Option<&ScoreSnapshot> {
        self.snapshots.iter().rev().find(|s| s.assessed_at <= as_of)
    }

    pub fn snapshots(&self) -> &[ScoreSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The earliest snapshot strictly older than `current` and no older than
    /// the window start. Snapshots before the window are never returned.
    pub fn baseline(
        &self,
        current: &ScoreSnapshot,
        window: LookbackWindow,
    ) -> Option<&ScoreSnapshot> {
        let start = window.start(current.assessed_at);
        self.snapshots
            .iter()
            .find(|s| s.assessed_at >= start && s.assessed_at < current.assessed_at)
    }
}
