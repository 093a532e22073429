//! Core types for trust scoring.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use posture_core::constants::SUBSCORE_MAX;
use posture_core::types::{BTreeMap, BTreeSet, EntityId};

/// The six scored domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D1 => "D1",
            Self::D2 => "D2",
            Self::D3 => "D3",
            Self::D4 => "D4",
            Self::D5 => "D5",
            Self::D6 => "D6",
        }
    }

    pub fn all() -> &'static [Domain] {
        &[Self::D1, Self::D2, Self::D3, Self::D4, Self::D5, Self::D6]
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Six independent 0-5 ordinal subscores for one entity snapshot.
///
/// Any per-domain weighting is applied by the producer before this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainSubscores {
    pub d1: u8,
    pub d2: u8,
    pub d3: u8,
    pub d4: u8,
    pub d5: u8,
    pub d6: u8,
}

impl DomainSubscores {
    pub fn new(scores: [u8; 6]) -> Self {
        Self {
            d1: scores[0],
            d2: scores[1],
            d3: scores[2],
            d4: scores[3],
            d5: scores[4],
            d6: scores[5],
        }
    }

    pub fn get(&self, domain: Domain) -> u8 {
        match domain {
            Domain::D1 => self.d1,
            Domain::D2 => self.d2,
            Domain::D3 => self.d3,
            Domain::D4 => self.d4,
            Domain::D5 => self.d5,
            Domain::D6 => self.d6,
        }
    }

    fn get_mut(&mut self, domain: Domain) -> &mut u8 {
        match domain {
            Domain::D1 => &mut self.d1,
            Domain::D2 => &mut self.d2,
            Domain::D3 => &mut self.d3,
            Domain::D4 => &mut self.d4,
            Domain::D5 => &mut self.d5,
            Domain::D6 => &mut self.d6,
        }
    }

    /// `(domain, subscore)` pairs in D1..D6 order.
    pub fn iter(&self) -> impl Iterator<Item = (Domain, u8)> + '_ {
        Domain::all().iter().map(move |d| (*d, self.get(*d)))
    }

    pub fn sum(&self) -> u16 {
        self.iter().map(|(_, s)| u16::from(s)).sum()
    }

    /// Clamp every subscore to the 0-5 scale, returning the domains that
    /// were adjusted with their original values.
    pub fn clamped(&self) -> (Self, Vec<(Domain, u8)>) {
        let mut out = *self;
        let mut adjusted = Vec::new();
        for &domain in Domain::all() {
            let slot = out.get_mut(domain);
            if *slot > SUBSCORE_MAX {
                adjusted.push((domain, *slot));
                *slot = SUBSCORE_MAX;
            }
        }
        (out, adjusted)
    }
}

/// Letter tier bucketing the trust score. A is best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

impl Tier {
    /// Ordinal where higher is better (A = 3, D = 0).
    pub fn rank(&self) -> u8 {
        match self {
            Self::A => 3,
            Self::B => 2,
            Self::C => 1,
            Self::D => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent 0-3 rating of how well-corroborated an entity's claims are.
///
/// Never derived from the trust score: a high score with low confidence is
/// a meaningful "promising but unverified" combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EvidenceConfidence {
    /// No evidence.
    None = 0,
    /// A single unverified source.
    SingleUnverified = 1,
    /// A single verified source, or multiple unverified sources.
    Corroborated = 2,
    /// Multiple independently verified sources.
    IndependentlyVerified = 3,
}

impl EvidenceConfidence {
    pub fn level(&self) -> u8 {
        *self as u8
    }
}

impl From<EvidenceConfidence> for u8 {
    fn from(value: EvidenceConfidence) -> Self {
        value.level()
    }
}

impl TryFrom<u8> for EvidenceConfidence {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::SingleUnverified),
            2 => Ok(Self::Corroborated),
            3 => Ok(Self::IndependentlyVerified),
            other => Err(format!("evidence confidence must be 0-3, got {other}")),
        }
    }
}

/// Evidence metadata supplied by the evidence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceMetadata {
    /// Independently verified sources.
    pub verified_sources: u32,
    /// Sources that have not been verified.
    pub unverified_sources: u32,
}

/// Structural facts about an entity (fact name → holds?).
pub type StructuralFacts = BTreeMap<String, bool>;

/// Deployment suitability derived from tier and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnterpriseFit {
    Regulated,
    Standard,
    Experimental,
}

/// Everything needed to score one entity at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    pub entity_id: EntityId,
    /// Snapshot timestamp, fixed by the caller at assessment time.
    pub assessed_at: DateTime<Utc>,
    pub subscores: DomainSubscores,
    #[serde(default)]
    pub evidence: EvidenceMetadata,
    #[serde(default)]
    pub facts: StructuralFacts,
}

/// Immutable, append-only record of one assessment run for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub entity_id: EntityId,
    pub trust_score: u8,
    pub tier: Tier,
    pub evidence_confidence: EvidenceConfidence,
    #[serde(flatten)]
    pub subscores: DomainSubscores,
    pub risk_flags: BTreeSet<String>,
    pub fail_fast_flags: BTreeSet<String>,
    pub enterprise_fit: EnterpriseFit,
    pub assessed_at: DateTime<Utc>,
}
