//! Evidence confidence rating.

use super::types::{EvidenceConfidence, EvidenceMetadata};

/// Rate how well-corroborated an entity's claims are.
///
/// Depends on the evidence metadata alone, never on the trust score.
pub fn evidence_confidence(evidence: &EvidenceMetadata) -> EvidenceConfidence {
    match (evidence.verified_sources, evidence.unverified_sources) {
        (0, 0) => EvidenceConfidence::None,
        (0, 1) => EvidenceConfidence::SingleUnverified,
        (0, _) | (1, _) => EvidenceConfidence::Corroborated,
        _ => EvidenceConfidence::IndependentlyVerified,
    }
}
