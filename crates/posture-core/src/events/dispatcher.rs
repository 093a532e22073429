//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::PostureEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn PostureEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn PostureEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn PostureEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Batch lifecycle ----
    pub fn emit_batch_started(&self, event: &BatchStartedEvent) {
        self.emit(|h| h.on_batch_started(event));
    }

    pub fn emit_batch_completed(&self, event: &BatchCompletedEvent) {
        self.emit(|h| h.on_batch_completed(event));
    }

    // ---- Coverage ----
    pub fn emit_control_classified(&self, event: &ControlClassifiedEvent) {
        self.emit(|h| h.on_control_classified(event));
    }

    // ---- Scoring & drift ----
    pub fn emit_snapshot_scored(&self, event: &SnapshotScoredEvent) {
        self.emit(|h| h.on_snapshot_scored(event));
    }

    pub fn emit_downgrade_detected(&self, event: &DowngradeDetectedEvent) {
        self.emit(|h| h.on_downgrade_detected(event));
    }

    // ---- Errors ----
    pub fn emit_item_failed(&self, event: &ItemFailedEvent) {
        self.emit(|h| h.on_item_failed(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
