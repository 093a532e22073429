//! Event payload types.

/// Payload for `on_batch_started`.
#[derive(Debug, Clone)]
pub struct BatchStartedEvent {
    pub catalog_version: String,
    pub tenant_count: usize,
    pub entity_count: usize,
}

/// Payload for `on_batch_completed`.
#[derive(Debug, Clone)]
pub struct BatchCompletedEvent {
    pub catalog_version: String,
    pub tenants_processed: usize,
    pub entities_processed: usize,
    pub failed_items: usize,
    pub duration_ms: u64,
}

/// Payload for `on_control_classified`.
#[derive(Debug, Clone)]
pub struct ControlClassifiedEvent {
    pub tenant_id: String,
    pub control_id: String,
    pub coverage: f64,
    pub hard_gaps: usize,
    pub soft_gaps: usize,
}

/// Payload for `on_snapshot_scored`.
#[derive(Debug, Clone)]
pub struct SnapshotScoredEvent {
    pub entity_id: String,
    pub trust_score: u8,
    pub tier: String,
    pub evidence_confidence: u8,
}

/// Payload for `on_downgrade_detected`.
#[derive(Debug, Clone)]
pub struct DowngradeDetectedEvent {
    pub entity_id: String,
    pub score_delta: i16,
    pub reason_codes: Vec<String>,
}

/// Payload for `on_item_failed`.
#[derive(Debug, Clone)]
pub struct ItemFailedEvent {
    pub item_id: String,
    pub error_code: String,
    pub message: String,
}
