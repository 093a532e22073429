//! Types for the ranking list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use posture_core::types::{BTreeSet, EntityId};

use crate::drift::{LookbackWindow, SnapshotHistory};
use crate::entity::{profile_lookup, EntityProfile};
use crate::scoring::{EnterpriseFit, EvidenceConfidence, Tier};

/// One ranking row built from an entity's latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingItem {
    pub entity_id: EntityId,
    pub server_name: String,
    pub provider_name: String,
    pub category: String,
    pub deployment_type: String,
    pub auth_model: String,
    pub trust_score: u8,
    pub tier: Tier,
    pub evidence_confidence: EvidenceConfidence,
    pub enterprise_fit: EnterpriseFit,
    /// `None` when no snapshot exists inside the 24h window.
    pub score_delta_24h: Option<i16>,
    /// `None` when no snapshot exists inside the 7d window.
    pub score_delta_7d: Option<i16>,
    pub risk_flags: BTreeSet<String>,
    pub fail_fast_flags: BTreeSet<String>,
    pub last_assessed_at: DateTime<Utc>,
}

impl RankingItem {
    /// Build a row from a history's latest snapshot. Returns `None` for an
    /// empty history.
    pub fn from_history(history: &SnapshotHistory, profile: Option<&EntityProfile>) -> Option<Self> {
        let latest = history.latest()?;
        let delta = |window: LookbackWindow| {
            history
                .baseline(latest, window)
                .map(|b| i16::from(latest.trust_score) - i16::from(b.trust_score))
        };

        let (server_name, provider_name, category, deployment_type, auth_model) = match profile {
            Some(p) => (
                p.server_name.clone(),
                p.provider_name.clone(),
                p.category.clone(),
                p.deployment_type.clone(),
                p.auth_model.clone(),
            ),
            None => (
                latest.entity_id.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ),
        };

        Some(Self {
            entity_id: latest.entity_id.clone(),
            server_name,
            provider_name,
            category,
            deployment_type,
            auth_model,
            trust_score: latest.trust_score,
            tier: latest.tier,
            evidence_confidence: latest.evidence_confidence,
            enterprise_fit: latest.enterprise_fit,
            score_delta_24h: delta(LookbackWindow::Day),
            score_delta_7d: delta(LookbackWindow::Week),
            risk_flags: latest.risk_flags.clone(),
            fail_fast_flags: latest.fail_fast_flags.clone(),
            last_assessed_at: latest.assessed_at,
        })
    }

    /// Whether the entity carries `flag` as a risk or fail-fast flag.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.risk_flags.contains(flag) || self.fail_fast_flags.contains(flag)
    }
}

/// Build one row per non-empty history, in history order.
pub fn build_rankings(histories: &[SnapshotHistory], profiles: &[EntityProfile]) -> Vec<RankingItem> {
    let profiles = profile_lookup(profiles);
    histories
        .iter()
        .filter_map(|h| RankingItem::from_history(h, profiles.get(h.entity_id().as_str()).copied()))
        .collect()
}

/// Sortable ranking columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    TrustScore,
    EvidenceConfidence,
    ScoreDelta24h,
    ScoreDelta7d,
    LastAssessedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Row filters. Every set field must match; string fields compare
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingFilter {
    pub tier: Option<Tier>,
    /// Minimum evidence confidence (inclusive).
    pub evidence_confidence: Option<EvidenceConfidence>,
    pub flag: Option<String>,
    pub category: Option<String>,
    pub deployment_type: Option<String>,
    pub auth_model: Option<String>,
}

impl RankingFilter {
    pub fn matches(&self, item: &RankingItem) -> bool {
        fn text_matches(wanted: &Option<String>, actual: &str) -> bool {
            wanted
                .as_deref()
                .map_or(true, |w| w.eq_ignore_ascii_case(actual))
        }

        self.tier.map_or(true, |t| item.tier == t)
            && self
                .evidence_confidence
                .map_or(true, |min| item.evidence_confidence >= min)
            && self.flag.as_deref().map_or(true, |f| item.has_flag(f))
            && text_matches(&self.category, &item.category)
            && text_matches(&self.deployment_type, &item.deployment_type)
            && text_matches(&self.auth_model, &item.auth_model)
    }
}
