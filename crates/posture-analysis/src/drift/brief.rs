//! Daily brief assembly: top movers, top downgrades, new entrants and
//! notable qualitative drift.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use posture_core::config::DriftConfig;
use posture_core::errors::DriftError;
use posture_core::types::{EntityId, SmallVec6};

use super::detector::{rank_movements, DriftDetector};
use super::history::SnapshotHistory;
use super::types::*;
use crate::entity::{profile_lookup, EntityProfile};
use crate::scoring::{Domain, EvidenceConfidence, Tier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoverEntry {
    pub entity_id: EntityId,
    pub server_name: String,
    pub provider_name: String,
    pub score_delta: i16,
    pub reason_codes: SmallVec6<Domain>,
    pub evidence_confidence_delta: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DowngradeEntry {
    pub entity_id: EntityId,
    pub server_name: String,
    pub provider_name: String,
    pub score_delta: i16,
    pub reason_codes: SmallVec6<Domain>,
    pub evidence_confidence_delta: i8,
    pub flag_changes: FlagChanges,
    pub fail_fast_changes: FlagChanges,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntrantEntry {
    pub entity_id: EntityId,
    pub server_name: String,
    pub provider_name: String,
    pub trust_score: u8,
    pub tier: Tier,
    pub evidence_confidence: EvidenceConfidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotableDriftEntry {
    pub entity_id: EntityId,
    pub server_name: String,
    pub event_type: DriftEventType,
    pub detected_at: DateTime<Utc>,
    pub summary: String,
}

/// The daily brief response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBrief {
    pub window: LookbackWindow,
    pub top_movers: Vec<MoverEntry>,
    pub top_downgrades: Vec<DowngradeEntry>,
    pub new_entrants: Vec<NewEntrantEntry>,
    pub notable_drift: Vec<NotableDriftEntry>,
}

/// Assembles a [`DailyBrief`] from entity histories.
///
/// Each history's latest snapshot is compared against its own in-window
/// baseline. Entities without a profile are listed under their id.
#[derive(Debug, Clone, Copy)]
pub struct DailyBriefBuilder {
    window: LookbackWindow,
    top_n: usize,
}

impl DailyBriefBuilder {
    pub fn new(window: LookbackWindow, top_n: usize) -> Self {
        Self { window, top_n }
    }

    pub fn from_config(config: &DriftConfig) -> Result<Self, DriftError> {
        Ok(Self::new(
            config.effective_window().parse()?,
            config.effective_top_n(),
        ))
    }

    pub fn window(&self) -> LookbackWindow {
        self.window
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Build the brief as of `as_of`.
    ///
    /// Each entity is represented by its newest snapshot at or before
    /// `as_of`; entities whose newest such snapshot is older than the window
    /// start are left out, and later snapshots are ignored. Only events
    /// detected within `[as_of − window, as_of]` are reported as notable
    /// drift, newest first.
    pub fn build(
        &self,
        as_of: DateTime<Utc>,
        histories: &[SnapshotHistory],
        profiles: &[EntityProfile],
        events: &[DriftEvent],
    ) -> Result<DailyBrief, DriftError> {
        let detector = DriftDetector::new();
        let profiles = profile_lookup(profiles);
        let names = |id: &EntityId| -> (String, String) {
            match profiles.get(id.as_str()) {
                Some(p) => (p.server_name.clone(), p.provider_name.clone()),
                None => (id.to_string(), String::new()),
            }
        };

        let mut movers = Vec::new();
        let mut downgrades = Vec::new();
        let mut new_entrants = Vec::new();

        let start = self.window.start(as_of);
        for history in histories {
            // Entities not assessed inside the window are not part of this brief.
            let Some(current) = history
                .latest_as_of(as_of)
                .filter(|s| s.assessed_at >= start)
            else {
                continue;
            };
            match detector.classify_in_history(current, history, self.window)? {
                DriftClassification::Mover(m) => movers.push(m),
                DriftClassification::Downgrade(m) => downgrades.push(m),
                DriftClassification::NewEntrant => {
                    let (server_name, provider_name) = names(&current.entity_id);
                    new_entrants.push(NewEntrantEntry {
                        entity_id: current.entity_id.clone(),
                        server_name,
                        provider_name,
                        trust_score: current.trust_score,
                        tier: current.tier,
                        evidence_confidence: current.evidence_confidence,
                    });
                }
                DriftClassification::Stable(_) => {}
            }
        }

        let top_movers = rank_movements(&movers, self.top_n)
            .into_iter()
            .map(|m| {
                let (server_name, provider_name) = names(&m.entity_id);
                MoverEntry {
                    entity_id: m.entity_id,
                    server_name,
                    provider_name,
                    score_delta: m.score_delta,
                    reason_codes: m.reason_codes,
                    evidence_confidence_delta: m.evidence_confidence_delta,
                }
            })
            .collect();

        let top_downgrades = rank_movements(&downgrades, self.top_n)
            .into_iter()
            .map(|m| {
                let (server_name, provider_name) = names(&m.entity_id);
                DowngradeEntry {
                    entity_id: m.entity_id,
                    server_name,
                    provider_name,
                    score_delta: m.score_delta,
                    reason_codes: m.reason_codes,
                    evidence_confidence_delta: m.evidence_confidence_delta,
                    flag_changes: m.flag_changes,
                    fail_fast_changes: m.fail_fast_changes,
                }
            })
            .collect();

        new_entrants.sort_by(|a, b| {
            (Reverse(a.trust_score), &a.entity_id).cmp(&(Reverse(b.trust_score), &b.entity_id))
        });

        let mut notable: Vec<&DriftEvent> = events
            .iter()
            .filter(|e| e.detected_at >= start && e.detected_at <= as_of)
            .collect();
        notable.sort_by(|a, b| {
            (Reverse(a.detected_at), &a.entity_id).cmp(&(Reverse(b.detected_at), &b.entity_id))
        });
        let notable_drift = notable
            .into_iter()
            .map(|e| NotableDriftEntry {
                entity_id: e.entity_id.clone(),
                server_name: names(&e.entity_id).0,
                event_type: e.event_type,
                detected_at: e.detected_at,
                summary: e.summary.clone(),
            })
            .collect();

        tracing::info!(
            window = %self.window,
            movers = movers.len(),
            downgrades = downgrades.len(),
            new_entrants = new_entrants.len(),
            "daily brief assembled"
        );

        Ok(DailyBrief {
            window: self.window,
            top_movers,
            top_downgrades,
            new_entrants,
            notable_drift,
        })
    }
}
