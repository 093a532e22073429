//! Property-based tests for the engine's universal invariants.
//!
//! Uses proptest to fuzz-verify:
//!   - coverage bounds and the hard-gap tie-break
//!   - classifier idempotence
//!   - tier monotonicity and trust score range
//!   - drift sign consistency and new-entrant exclusivity
//!
//! Tests prefixed `regression_gate_` are CI gates: failures here
//! block merge. Run with: `cargo test regression_gate_`

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use posture_analysis::coverage::*;
use posture_analysis::drift::{DriftClassification, DriftDetector, LookbackWindow};
use posture_analysis::scoring::*;
use posture_core::types::{BTreeSet, EntityId};

const CAPS: &[&str] = &["edr", "waf", "siem", "mfa", "dlp", "ns-firewall"];

fn requirement_strategy() -> impl Strategy<Value = Requirement> {
    (0..CAPS.len(), -0.5f64..1.5, -0.2f64..1.2, any::<bool>()).prop_map(|(cap, weight, min, soft)| {
        if soft {
            Requirement::soft(CAPS[cap], weight, min)
        } else {
            Requirement::hard(CAPS[cap], weight)
        }
    })
}

fn tools_strategy() -> impl Strategy<Value = Vec<Tool>> {
    prop::collection::vec((0..CAPS.len(), -0.5f64..1.5, any::<bool>()), 0..8).prop_map(|caps| {
        caps.into_iter()
            .enumerate()
            .map(|(i, (cap, strength, enabled))| {
                let tool = Tool::new(&format!("tool-{i}"), "vendor", &[(CAPS[cap], strength)]);
                if enabled {
                    tool
                } else {
                    tool.disabled()
                }
            })
            .collect()
    })
}

fn control(requirements: Vec<Requirement>) -> Control {
    Control::new("C-1", "PR.AC", "Fuzzed control", requirements)
}

fn snapshot(trust_score: u8, subscores: [u8; 6], hours_ago: i64) -> ScoreSnapshot {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    ScoreSnapshot {
        entity_id: EntityId::new("srv"),
        trust_score,
        tier: TierLadder::default().tier_for(trust_score),
        evidence_confidence: EvidenceConfidence::None,
        subscores: DomainSubscores::new(subscores),
        risk_flags: BTreeSet::new(),
        fail_fast_flags: BTreeSet::new(),
        enterprise_fit: EnterpriseFit::Standard,
        assessed_at: now - Duration::hours(hours_ago),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Coverage Properties
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// REGRESSION GATE: coverage is always in [0.0, 1.0].
    #[test]
    fn regression_gate_coverage_bounded(
        reqs in prop::collection::vec(requirement_strategy(), 0..10),
        tools in tools_strategy(),
    ) {
        let record = GapClassifier::new()
            .classify(&control(reqs), &CapabilityIndex::build(&tools))
            .data;
        prop_assert!(record.coverage >= 0.0, "coverage < 0: {}", record.coverage);
        prop_assert!(record.coverage <= 1.0, "coverage > 1: {}", record.coverage);
    }

    /// REGRESSION GATE: a capability absent from the index is never a soft gap.
    #[test]
    fn regression_gate_absent_capability_is_hard_gap(
        reqs in prop::collection::vec(requirement_strategy(), 1..10),
        tools in tools_strategy(),
    ) {
        let index = CapabilityIndex::build(&tools);
        let record = GapClassifier::new().classify(&control(reqs.clone()), &index).data;

        for gap in &record.soft_gaps {
            prop_assert!(index.contains(gap.capability_id.as_str()));
        }
        for req in &reqs {
            if !index.contains(req.capability_id().as_str()) {
                prop_assert!(record.hard_gaps.iter().any(|g| &g.capability_id == req.capability_id()));
            }
        }
    }

    /// Identical inputs give byte-identical records.
    #[test]
    fn prop_classifier_idempotent(
        reqs in prop::collection::vec(requirement_strategy(), 0..10),
        tools in tools_strategy(),
    ) {
        let c = control(reqs);
        let first = GapClassifier::new().classify(&c, &CapabilityIndex::build(&tools));
        let second = GapClassifier::new().classify(&c, &CapabilityIndex::build(&tools));
        prop_assert_eq!(
            serde_json::to_string(&first.data).unwrap(),
            serde_json::to_string(&second.data).unwrap()
        );
    }

    /// Every indexed strength lies in [0.0, 1.0].
    #[test]
    fn prop_index_strengths_clamped(tools in tools_strategy()) {
        for (_, strength) in CapabilityIndex::build(&tools).entries() {
            prop_assert!((0.0..=1.0).contains(&strength));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Scoring Properties
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// REGRESSION GATE: a higher trust score never gets a worse tier.
    #[test]
    fn regression_gate_tier_monotonic(a in 0u8..=100, b in 0u8..=100) {
        let ladder = TierLadder::default();
        if a > b {
            prop_assert!(ladder.tier_for(a).rank() >= ladder.tier_for(b).rank());
        }
    }

    /// Trust score stays in [0, 100] and is reproducible for any subscores.
    #[test]
    fn prop_trust_score_bounded_and_deterministic(scores in prop::array::uniform6(0u8..=12)) {
        let input = AssessmentInput {
            entity_id: EntityId::new("srv"),
            assessed_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            subscores: DomainSubscores::new(scores),
            evidence: EvidenceMetadata::default(),
            facts: StructuralFacts::new(),
        };
        let engine = TrustEngine::default();
        let first = engine.score(&input).unwrap();
        let second = engine.score(&input).unwrap();
        prop_assert!(first.data.trust_score <= 100);
        prop_assert_eq!(first, second);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Drift Properties
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// REGRESSION GATE: delta > 0 ⟺ Mover, delta < 0 ⟺ Downgrade, 0 ⟺ Stable.
    #[test]
    fn regression_gate_drift_sign_consistency(
        prior_score in 0u8..=100,
        current_score in 0u8..=100,
        prior_subs in prop::array::uniform6(0u8..=5),
        current_subs in prop::array::uniform6(0u8..=5),
        hours_ago in 1i64..=24,
    ) {
        let prior = snapshot(prior_score, prior_subs, hours_ago);
        let current = snapshot(current_score, current_subs, 0);
        let result = DriftDetector::new()
            .classify(&current, Some(&prior), LookbackWindow::Day)
            .unwrap();
        let delta = i16::from(current_score) - i16::from(prior_score);

        match result {
            DriftClassification::Mover(m) => prop_assert!(delta > 0 && m.score_delta == delta),
            DriftClassification::Downgrade(m) => prop_assert!(delta < 0 && m.score_delta == delta),
            DriftClassification::Stable(m) => prop_assert!(delta == 0 && m.reason_codes.is_empty()),
            DriftClassification::NewEntrant => prop_assert!(false, "prior is inside the window"),
        }
    }

    /// REGRESSION GATE: a prior outside the window always yields NewEntrant.
    #[test]
    fn regression_gate_new_entrant_exclusivity(
        prior_score in 0u8..=100,
        current_score in 0u8..=100,
        extra_hours in 1i64..=2000,
    ) {
        let window = LookbackWindow::Week;
        let hours_ago = window.duration().num_hours() + extra_hours;
        let prior = snapshot(prior_score, [0; 6], hours_ago);
        let current = snapshot(current_score, [0; 6], 0);
        let result = DriftDetector::new().classify(&current, Some(&prior), window).unwrap();
        prop_assert!(result.is_new_entrant());
    }

    /// Reason codes always move in the same direction as the score.
    #[test]
    fn prop_reason_codes_follow_score_direction(
        prior_subs in prop::array::uniform6(0u8..=5),
        current_subs in prop::array::uniform6(0u8..=5),
    ) {
        let p = DomainSubscores::new(prior_subs);
        let c = DomainSubscores::new(current_subs);
        let prior = snapshot(compute_trust_score(&p), prior_subs, 2);
        let current = snapshot(compute_trust_score(&c), current_subs, 0);
        let result = DriftDetector::new()
            .classify(&current, Some(&prior), LookbackWindow::Day)
            .unwrap();
        if let Some(m) = result.movement() {
            for domain in &m.reason_codes {
                let d = i16::from(c.get(*domain)) - i16::from(p.get(*domain));
                prop_assert_eq!(d.signum(), m.score_delta.signum());
            }
        }
    }
}
