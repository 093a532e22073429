//! BatchRunner: embarrassingly parallel fan-out over tenants and entities.
//!
//! The catalog and the scoring engine are captured once at construction and
//! shared read-only by every worker, so one batch is always computed against
//! a single catalog version and threshold set. Results are sorted by id after
//! the join, independent of scheduling.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use posture_core::config::PostureConfig;
use posture_core::errors::{PipelineError, PostureErrorCode};
use posture_core::events::{BatchCompletedEvent, BatchStartedEvent, EventDispatcher, ItemFailedEvent};

use super::assessment::{EntityAssessment, EntityPipeline, EntityReport};
use super::outcome::ItemOutcome;
use super::tenant::{TenantInventory, TenantPipeline, TenantReport};
use crate::catalog::Catalog;
use crate::drift::LookbackWindow;
use crate::scoring::TrustEngine;

/// Everything one batch run processes.
#[derive(Debug, Clone, Default)]
pub struct BatchInput {
    pub tenants: Vec<TenantInventory>,
    pub entities: Vec<EntityAssessment>,
}

/// Joined results of a batch run, sorted by tenant id and entity id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub catalog_version: String,
    pub thresholds_version: String,
    pub tenants: Vec<TenantReport>,
    pub entities: Vec<ItemOutcome<EntityReport>>,
}

impl BatchReport {
    pub fn failed_items(&self) -> usize {
        let tenant_failures: usize = self.tenants.iter().map(|t| t.failed_count()).sum();
        tenant_failures + self.entities.iter().filter(|e| e.is_failed()).count()
    }
}

#[derive(Debug, Clone)]
pub struct BatchRunner {
    catalog: Arc<Catalog>,
    engine: Arc<TrustEngine>,
    window: LookbackWindow,
    events: EventDispatcher,
    parallel: bool,
}

impl BatchRunner {
    pub fn new(catalog: Arc<Catalog>, engine: Arc<TrustEngine>, window: LookbackWindow) -> Self {
        Self {
            catalog,
            engine,
            window,
            events: EventDispatcher::new(),
            parallel: true,
        }
    }

    /// Build a runner from resolved configuration.
    pub fn from_config(catalog: Arc<Catalog>, config: &PostureConfig) -> Result<Self, PipelineError> {
        let engine = TrustEngine::new(&config.scoring)?;
        let window: LookbackWindow = config.drift.effective_window().parse()?;
        Ok(Self::new(catalog, Arc::new(engine), window))
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    /// Toggle the rayon fan-out. Sequential runs produce identical reports.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn engine(&self) -> &Arc<TrustEngine> {
        &self.engine
    }

    pub fn window(&self) -> LookbackWindow {
        self.window
    }

    pub fn run(&self, input: &BatchInput) -> BatchReport {
        let start = Instant::now();
        tracing::info!(
            catalog_version = %self.catalog.version(),
            thresholds_version = %self.engine.thresholds_version(),
            tenants = input.tenants.len(),
            entities = input.entities.len(),
            "batch started"
        );
        self.events.emit_batch_started(&BatchStartedEvent {
            catalog_version: self.catalog.version().to_string(),
            tenant_count: input.tenants.len(),
            entity_count: input.entities.len(),
        });

        let report = BatchReport {
            catalog_version: self.catalog.version().to_string(),
            thresholds_version: self.engine.thresholds_version().to_string(),
            tenants: self.run_tenants(&input.tenants),
            entities: self.run_entities(&input.entities),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let failed_items = report.failed_items();
        tracing::info!(
            tenants = report.tenants.len(),
            entities = report.entities.len(),
            failed_items,
            duration_ms,
            "batch completed"
        );
        self.events.emit_batch_completed(&BatchCompletedEvent {
            catalog_version: report.catalog_version.clone(),
            tenants_processed: report.tenants.len(),
            entities_processed: report.entities.len(),
            failed_items,
            duration_ms,
        });
        report
    }

    pub fn run_tenants(&self, tenants: &[TenantInventory]) -> Vec<TenantReport> {
        let pipeline = TenantPipeline::new().with_events(self.events.clone());
        let mut reports: Vec<TenantReport> = if self.parallel {
            tenants
                .par_iter()
                .map(|t| pipeline.run(&self.catalog, t))
                .collect()
        } else {
            tenants.iter().map(|t| pipeline.run(&self.catalog, t)).collect()
        };
        reports.sort_by(|a, b| a.tenant_id.cmp(&b.tenant_id));
        reports
    }

    pub fn run_entities(&self, entities: &[EntityAssessment]) -> Vec<ItemOutcome<EntityReport>> {
        let pipeline = EntityPipeline::new(self.window).with_events(self.events.clone());
        let assess = |entity: &EntityAssessment| self.assess(&pipeline, entity);
        let mut outcomes: Vec<ItemOutcome<EntityReport>> = if self.parallel {
            entities.par_iter().map(assess).collect()
        } else {
            entities.iter().map(assess).collect()
        };
        outcomes.sort_by(|a, b| a.id().cmp(b.id()));
        outcomes
    }

    fn assess(&self, pipeline: &EntityPipeline, entity: &EntityAssessment) -> ItemOutcome<EntityReport> {
        let id = entity.input.entity_id.to_string();
        match pipeline.run(&self.engine, &entity.history, &entity.input) {
            Ok(report) => ItemOutcome::computed(id, report),
            Err(error) => {
                tracing::warn!(entity_id = %id, error = %error, "entity could not be scored");
                self.events.emit_item_failed(&ItemFailedEvent {
                    item_id: id.clone(),
                    error_code: error.error_code().to_string(),
                    message: error.to_string(),
                });
                ItemOutcome::failed(id, error)
            }
        }
    }
}
