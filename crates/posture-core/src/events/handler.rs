//! PostureEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling Posture events.
///
/// Handlers only override the events they care about. `Send + Sync` is
/// required because batch runs emit from rayon worker threads.
pub trait PostureEventHandler: Send + Sync {
    // ---- Batch lifecycle ----
    fn on_batch_started(&self, _event: &BatchStartedEvent) {}
    fn on_batch_completed(&self, _event: &BatchCompletedEvent) {}

    // ---- Coverage ----
    fn on_control_classified(&self, _event: &ControlClassifiedEvent) {}

    // ---- Scoring & drift ----
    fn on_snapshot_scored(&self, _event: &SnapshotScoredEvent) {}
    fn on_downgrade_detected(&self, _event: &DowngradeDetectedEvent) {}

    // ---- Errors ----
    fn on_item_failed(&self, _event: &ItemFailedEvent) {}
}
