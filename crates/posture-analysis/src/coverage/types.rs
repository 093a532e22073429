//! Core types for capability coverage and control gaps.

use std::fmt;

use serde::{Deserialize, Serialize};

use posture_core::types::{CapabilityId, ControlId, ToolId};

/// Immutable capability catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub id: CapabilityId,
    pub name: String,
}

/// A capability a tool claims, with its configured strength in `[0, 1]`.
/// Strength 0 means "claimed but unconfigured".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCapability {
    pub capability_id: CapabilityId,
    pub strength: f64,
}

/// One security tool in a tenant's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: ToolId,
    pub vendor: String,
    #[serde(default)]
    pub capabilities: Vec<ToolCapability>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Tool {
    /// Create an enabled tool with the given `(capability, strength)` pairs.
    pub fn new(id: &str, vendor: &str, capabilities: &[(&str, f64)]) -> Self {
        Self {
            id: ToolId::new(id),
            vendor: vendor.to_string(),
            capabilities: capabilities
                .iter()
                .map(|(cap, strength)| ToolCapability {
                    capability_id: CapabilityId::new(*cap),
                    strength: *strength,
                })
                .collect(),
            enabled: true,
        }
    }

    /// Return a disabled copy of this tool.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A weighted capability requirement of a control.
///
/// `Hard` is a binary presence check. `Soft` additionally requires the best
/// available strength to reach `min_strength`; a soft requirement whose
/// capability is entirely absent is reported as a hard gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    Hard {
        capability_id: CapabilityId,
        weight: f64,
    },
    Soft {
        capability_id: CapabilityId,
        weight: f64,
        min_strength: f64,
    },
}

impl Requirement {
    pub fn hard(capability_id: &str, weight: f64) -> Self {
        Self::Hard {
            capability_id: CapabilityId::new(capability_id),
            weight,
        }
    }

    pub fn soft(capability_id: &str, weight: f64, min_strength: f64) -> Self {
        Self::Soft {
            capability_id: CapabilityId::new(capability_id),
            weight,
            min_strength,
        }
    }

    pub fn capability_id(&self) -> &CapabilityId {
        match self {
            Self::Hard { capability_id, .. } | Self::Soft { capability_id, .. } => capability_id,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Self::Hard { weight, .. } | Self::Soft { weight, .. } => *weight,
        }
    }
}

/// Static control catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub id: ControlId,
    pub domain: String,
    pub title: String,
    /// Reporting partition; defaults to the domain prefix before the first `.`.
    #[serde(default)]
    pub partition: Option<String>,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl Control {
    pub fn new(id: &str, domain: &str, title: &str, requirements: Vec<Requirement>) -> Self {
        Self {
            id: ControlId::new(id),
            domain: domain.to_string(),
            title: title.to_string(),
            partition: None,
            requirements,
        }
    }

    /// The reporting partition of this control's domain.
    pub fn partition(&self) -> &str {
        match &self.partition {
            Some(p) => p.as_str(),
            None => self.domain.split('.').next().unwrap_or(self.domain.as_str()),
        }
    }
}

/// A required capability absent from every enabled tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardGap {
    pub capability_id: CapabilityId,
    pub weight: f64,
}

/// A required capability present but below the minimum strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftGap {
    pub capability_id: CapabilityId,
    pub weight: f64,
    #[serde(rename = "best")]
    pub observed_strength: f64,
    #[serde(rename = "min")]
    pub min_strength: f64,
}

/// Per-control classification result. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapRecord {
    pub control_id: ControlId,
    pub coverage: f64,
    pub hard_gaps: Vec<HardGap>,
    pub soft_gaps: Vec<SoftGap>,
}

impl GapRecord {
    /// True when the control has no gaps at all.
    pub fn is_fully_covered(&self) -> bool {
        self.hard_gaps.is_empty() && self.soft_gaps.is_empty()
    }
}

/// Boundary shape of a gap record, joined with its control's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    #[serde(rename = "ControlID")]
    pub control_id: ControlId,
    #[serde(rename = "ControlTitle")]
    pub control_title: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "DomainPartition")]
    pub domain_partition: String,
    #[serde(rename = "Coverage")]
    pub coverage: f64,
    #[serde(rename = "HardGaps")]
    pub hard_gaps: Vec<HardGap>,
    #[serde(rename = "SoftGaps")]
    pub soft_gaps: Vec<SoftGap>,
}

impl GapReport {
    pub fn new(control: &Control, record: GapRecord) -> Self {
        Self {
            control_id: record.control_id,
            control_title: control.title.clone(),
            domain: control.domain.clone(),
            domain_partition: control.partition().to_string(),
            coverage: record.coverage,
            hard_gaps: record.hard_gaps,
            soft_gaps: record.soft_gaps,
        }
    }
}

/// Lifecycle status of a control. External state; never derived here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlStatus {
    NotStarted,
    InProgress,
    Complete,
}

impl ControlStatus {
    /// Parse a status string, tolerating case and `_`/`-`/space separators.
    /// Returns `None` for unrecognized values.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "notstarted" | "todo" | "open" => Some(Self::NotStarted),
            "inprogress" | "started" | "partial" => Some(Self::InProgress),
            "complete" | "completed" | "done" => Some(Self::Complete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "notStarted",
            Self::InProgress => "inProgress",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A control's domain plus its raw, caller-supplied status string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlProgress {
    pub control_id: ControlId,
    pub domain: String,
    pub status: String,
}

impl ControlProgress {
    pub fn new(control: &Control, status: &str) -> Self {
        Self {
            control_id: control.id.clone(),
            domain: control.domain.clone(),
            status: status.to_string(),
        }
    }
}

/// Control counts for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    pub domain: String,
    pub total: usize,
    pub complete: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl DomainSummary {
    pub(crate) fn record(&mut self, status: ControlStatus) {
        self.total += 1;
        match status {
            ControlStatus::Complete => self.complete += 1,
            ControlStatus::InProgress => self.in_progress += 1,
            ControlStatus::NotStarted => self.not_started += 1,
        }
    }
}

/// Tenant-wide control counts (sum of the per-domain counts).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total: usize,
    pub complete: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

/// Per-domain summaries, ordered by domain code, plus tenant totals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummary {
    pub domains: Vec<DomainSummary>,
    pub totals: SummaryTotals,
}
