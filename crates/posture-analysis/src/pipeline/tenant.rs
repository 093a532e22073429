//! Per-tenant coverage pipeline: index → classify each control → summarize.

use serde::{Deserialize, Serialize};

use posture_core::errors::{InputWarning, PostureErrorCode};
use posture_core::events::{ControlClassifiedEvent, EventDispatcher, ItemFailedEvent};
use posture_core::types::{BTreeMap, ControlId, TenantId};

use super::outcome::ItemOutcome;
use crate::catalog::Catalog;
use crate::coverage::{
    CapabilityIndex, ControlProgress, ControlStatus, GapClassifier, GapReport, SummaryAggregator,
    TenantSummary, Tool,
};

/// One tenant's tool inventory and control lifecycle statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantInventory {
    pub tenant_id: TenantId,
    #[serde(default)]
    pub tools: Vec<Tool>,
    /// Raw status per control. Controls without an entry are not started;
    /// entries for controls outside the catalog raise a warning.
    #[serde(default)]
    pub statuses: BTreeMap<ControlId, String>,
}

impl TenantInventory {
    pub fn new(tenant_id: &str, tools: Vec<Tool>) -> Self {
        Self {
            tenant_id: TenantId::new(tenant_id),
            tools,
            statuses: BTreeMap::new(),
        }
    }

    pub fn with_status(mut self, control_id: &str, status: &str) -> Self {
        self.statuses
            .insert(ControlId::new(control_id), status.to_string());
        self
    }
}

/// Coverage results for one tenant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantReport {
    pub tenant_id: TenantId,
    pub catalog_version: String,
    /// One outcome per catalog control, in catalog order.
    pub gaps: Vec<ItemOutcome<GapReport>>,
    pub summary: TenantSummary,
    pub warnings: Vec<InputWarning>,
}

impl TenantReport {
    pub fn failed_count(&self) -> usize {
        self.gaps.iter().filter(|g| g.is_failed()).count()
    }

    pub fn gap(&self, control_id: &str) -> Option<&ItemOutcome<GapReport>> {
        self.gaps.iter().find(|g| g.id() == control_id)
    }
}

/// Runs the coverage stages for one tenant against a fixed catalog.
#[derive(Debug, Clone, Default)]
pub struct TenantPipeline {
    events: EventDispatcher,
}

impl TenantPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn run(&self, catalog: &Catalog, tenant: &TenantInventory) -> TenantReport {
        let classifier = GapClassifier::new();
        let index = CapabilityIndex::build_checked(&tenant.tools);
        let (index, mut warnings) = index.into_parts();

        let mut gaps = Vec::with_capacity(catalog.controls().len());
        for control in catalog.controls() {
            match classifier.classify_in_catalog(catalog, control, &index) {
                Ok(checked) => {
                    let (record, control_warnings) = checked.into_parts();
                    warnings.extend(control_warnings);
                    self.events.emit_control_classified(&ControlClassifiedEvent {
                        tenant_id: tenant.tenant_id.to_string(),
                        control_id: control.id.to_string(),
                        coverage: record.coverage,
                        hard_gaps: record.hard_gaps.len(),
                        soft_gaps: record.soft_gaps.len(),
                    });
                    gaps.push(ItemOutcome::computed(
                        control.id.as_str(),
                        GapReport::new(control, record),
                    ));
                }
                Err(error) => {
                    tracing::warn!(
                        tenant_id = %tenant.tenant_id,
                        control_id = %control.id,
                        error = %error,
                        "control could not be classified"
                    );
                    self.events.emit_item_failed(&ItemFailedEvent {
                        item_id: control.id.to_string(),
                        error_code: error.error_code().to_string(),
                        message: error.to_string(),
                    });
                    gaps.push(ItemOutcome::failed(control.id.as_str(), error));
                }
            }
        }

        let progress: Vec<ControlProgress> = catalog
            .controls()
            .iter()
            .map(|control| match tenant.statuses.get(&control.id) {
                Some(status) => ControlProgress::new(control, status),
                None => ControlProgress::new(control, ControlStatus::NotStarted.as_str()),
            })
            .collect();
        for (control_id, status) in &tenant.statuses {
            if catalog.control(control_id.as_str()).is_err() {
                tracing::warn!(
                    tenant_id = %tenant.tenant_id,
                    control_id = %control_id,
                    "status for control outside catalog ignored"
                );
                warnings.push(InputWarning::UnknownControlStatus {
                    control_id: control_id.clone(),
                    status: status.clone(),
                });
            }
        }
        let (summary, summary_warnings) = SummaryAggregator::new().summarize(&progress).into_parts();
        warnings.extend(summary_warnings);

        TenantReport {
            tenant_id: tenant.tenant_id.clone(),
            catalog_version: catalog.version().to_string(),
            gaps,
            summary,
            warnings,
        }
    }
}
