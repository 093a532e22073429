//! Tenant summary aggregation: pure counting per domain, no weighting.

use posture_core::errors::{Checked, InputWarning};
use posture_core::types::BTreeMap;

use super::types::*;

/// Rolls per-control statuses into per-domain and tenant-wide counts.
pub struct SummaryAggregator;

impl SummaryAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Summarize controls by domain. Domains are ordered by domain code.
    /// An unrecognized status counts as not started and raises a warning.
    pub fn summarize(&self, controls: &[ControlProgress]) -> Checked<TenantSummary> {
        let mut domains: BTreeMap<&str, DomainSummary> = BTreeMap::new();
        let mut warnings = Vec::new();

        for control in controls {
            let status = match ControlStatus::parse(&control.status) {
                Some(status) => status,
                None => {
                    tracing::warn!(
                        control_id = %control.control_id,
                        status = %control.status,
                        "unknown control status; counted as not started"
                    );
                    warnings.push(InputWarning::UnknownStatus {
                        control_id: control.control_id.clone(),
                        status: control.status.clone(),
                    });
                    ControlStatus::NotStarted
                }
            };

            domains
                .entry(control.domain.as_str())
                .or_insert_with(|| DomainSummary {
                    domain: control.domain.clone(),
                    ..Default::default()
                })
                .record(status);
        }

        let domains: Vec<DomainSummary> = domains.into_values().collect();
        let totals = domains.iter().fold(SummaryTotals::default(), |mut acc, d| {
            acc.total += d.total;
            acc.complete += d.complete;
            acc.in_progress += d.in_progress;
            acc.not_started += d.not_started;
            acc
        });

        Checked::with_warnings(TenantSummary { domains, totals }, warnings)
    }
}

impl Default for SummaryAggregator {
    fn default() -> Self {
        Self::new()
    }
}
