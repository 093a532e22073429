//! Ranking query: filter, sort, limit.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingQuery {
    pub sort: SortKey,
    pub direction: SortDirection,
    pub filter: RankingFilter,
    pub limit: Option<usize>,
}

impl RankingQuery {
    pub fn new(sort: SortKey, direction: SortDirection) -> Self {
        Self {
            sort,
            direction,
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: RankingFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Apply the query. Rows without a value for the sort key (a missing
    /// delta) go last in either direction; ties break by entity id.
    pub fn apply(&self, items: &[RankingItem]) -> Vec<RankingItem> {
        let mut rows: Vec<RankingItem> = items
            .iter()
            .filter(|item| self.filter.matches(item))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let by_key = match (self.sort_value(a), self.sort_value(b)) {
                (Some(x), Some(y)) => match self.direction {
                    SortDirection::Asc => x.cmp(&y),
                    SortDirection::Desc => y.cmp(&x),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            by_key.then_with(|| a.entity_id.cmp(&b.entity_id))
        });

        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        rows
    }

    fn sort_value(&self, item: &RankingItem) -> Option<i64> {
        match self.sort {
            SortKey::TrustScore => Some(i64::from(item.trust_score)),
            SortKey::EvidenceConfidence => Some(i64::from(item.evidence_confidence.level())),
            SortKey::ScoreDelta24h => item.score_delta_24h.map(i64::from),
            SortKey::ScoreDelta7d => item.score_delta_7d.map(i64::from),
            SortKey::LastAssessedAt => Some(item.last_assessed_at.timestamp_millis()),
        }
    }
}
