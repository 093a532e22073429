//! Types for drift detection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use posture_core::errors::DriftError;
use posture_core::types::{BTreeSet, EntityId, SmallVec6};

use crate::scoring::Domain;

/// How far back the detector may look for a baseline snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LookbackWindow {
    /// 24 hours.
    #[default]
    Day,
    /// 7 days.
    Week,
    /// 30 days.
    Month,
}

impl LookbackWindow {
    pub fn duration(&self) -> Duration {
        match self {
            Self::Day => Duration::hours(24),
            Self::Week => Duration::days(7),
            Self::Month => Duration::days(30),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::Week => "7d",
            Self::Month => "30d",
        }
    }

    /// Earliest instant (inclusive) a baseline may have relative to `at`.
    pub fn start(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        at - self.duration()
    }
}

impl FromStr for LookbackWindow {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "24h" => Ok(Self::Day),
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            other => Err(DriftError::InvalidWindow(other.to_string())),
        }
    }
}

impl TryFrom<String> for LookbackWindow {
    type Error = DriftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LookbackWindow> for String {
    fn from(value: LookbackWindow) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LookbackWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative change kinds reported by the structural-diff collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriftEventType {
    ToolsAdded,
    ToolsRemoved,
    AuthChanged,
    ScopeChanged,
    EndpointChanged,
    DocsChanged,
}

/// A qualitative change between two snapshots' structural metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftEvent {
    pub entity_id: EntityId,
    pub event_type: DriftEventType,
    pub detected_at: DateTime<Utc>,
    pub summary: String,
}

/// Set difference between two flag sets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlagChanges {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

impl FlagChanges {
    pub fn between(prior: &BTreeSet<String>, current: &BTreeSet<String>) -> Self {
        Self {
            added: current.difference(prior).cloned().collect(),
            removed: prior.difference(current).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Score movement of one entity against its baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMovement {
    pub entity_id: EntityId,
    pub score_delta: i16,
    /// Domains that moved by at least one point in the same direction as
    /// the overall score, in D1..D6 order.
    pub reason_codes: SmallVec6<Domain>,
    pub evidence_confidence_delta: i8,
    /// Risk flag changes.
    pub flag_changes: FlagChanges,
    pub fail_fast_changes: FlagChanges,
}

/// Outcome of comparing a snapshot with its in-window baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "movement", rename_all = "camelCase")]
pub enum DriftClassification {
    /// No baseline inside the lookback window.
    NewEntrant,
    /// Score went up.
    Mover(ScoreMovement),
    /// Score went down.
    Downgrade(ScoreMovement),
    /// Score unchanged. Never listed among movers or downgrades.
    Stable(ScoreMovement),
}

impl DriftClassification {
    pub fn movement(&self) -> Option<&ScoreMovement> {
        match self {
            Self::NewEntrant => None,
            Self::Mover(m) | Self::Downgrade(m) | Self::Stable(m) => Some(m),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NewEntrant => "new_entrant",
            Self::Mover(_) => "mover",
            Self::Downgrade(_) => "downgrade",
            Self::Stable(_) => "stable",
        }
    }

    pub fn is_new_entrant(&self) -> bool {
        matches!(self, Self::NewEntrant)
    }

    pub fn is_mover(&self) -> bool {
        matches!(self, Self::Mover(_))
    }

    pub fn is_downgrade(&self) -> bool {
        matches!(self, Self::Downgrade(_))
    }
}
