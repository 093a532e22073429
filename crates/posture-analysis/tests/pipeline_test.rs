//! Tests for the tenant, entity and batch pipelines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use posture_analysis::catalog::Catalog;
use posture_analysis::coverage::Tool;
use posture_analysis::drift::{DriftClassification, LookbackWindow, SnapshotHistory};
use posture_analysis::pipeline::*;
use posture_analysis::scoring::*;
use posture_core::config::{PostureConfig, RuleConfig, RuleKind, ScoringConfig};
use posture_core::errors::{InputWarning, PipelineError, PostureErrorCode};
use posture_core::events::*;
use posture_core::types::{ControlId, EntityId};

const CATALOG: &str = r#"
version = "2026.2"

[[capabilities]]
id = "edr"
name = "EDR"

[[capabilities]]
id = "ns-firewall"
name = "Firewall"

[[controls]]
id = "DE.CM-1"
domain = "DE.CM"
title = "Endpoint monitoring"
requirements = [{ type = "hard", capability_id = "edr", weight = 1.0 }]

[[controls]]
id = "PR.PT-4"
domain = "PR.PT"
title = "Network segmentation"
requirements = [{ type = "soft", capability_id = "ns-firewall", weight = 0.4, min_strength = 0.7 }]

[[controls]]
id = "PR.AC-9"
domain = "PR.AC"
title = "References an undefined capability"
requirements = [{ type = "hard", capability_id = "ghost", weight = 1.0 }]
"#;

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_toml_str(CATALOG).unwrap())
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 10, 12, 0, 0).unwrap()
}

fn input(id: &str, subscores: [u8; 6]) -> AssessmentInput {
    AssessmentInput {
        entity_id: EntityId::new(id),
        assessed_at: now(),
        subscores: DomainSubscores::new(subscores),
        evidence: EvidenceMetadata::default(),
        facts: StructuralFacts::new(),
    }
}

fn tenant(id: &str) -> TenantInventory {
    TenantInventory::new(id, vec![Tool::new("fw", "Acme", &[("ns-firewall", 0.5)])])
        .with_status("DE.CM-1", "complete")
        .with_status("PR.PT-4", "wip")
}

#[derive(Default)]
struct Recorder {
    classified: AtomicUsize,
    scored: AtomicUsize,
    downgrades: Mutex<Vec<String>>,
    failed: Mutex<Vec<String>>,
    completed: Mutex<Option<BatchCompletedEvent>>,
}

impl PostureEventHandler for Recorder {
    fn on_control_classified(&self, _event: &ControlClassifiedEvent) {
        self.classified.fetch_add(1, Ordering::SeqCst);
    }
    fn on_snapshot_scored(&self, _event: &SnapshotScoredEvent) {
        self.scored.fetch_add(1, Ordering::SeqCst);
    }
    fn on_downgrade_detected(&self, event: &DowngradeDetectedEvent) {
        self.downgrades.lock().unwrap().push(event.entity_id.clone());
    }
    fn on_item_failed(&self, event: &ItemFailedEvent) {
        self.failed.lock().unwrap().push(event.item_id.clone());
    }
    fn on_batch_completed(&self, event: &BatchCompletedEvent) {
        *self.completed.lock().unwrap() = Some(event.clone());
    }
}

// ---- Tenant pipeline ----

#[test]
fn test_tenant_pipeline_reports_per_control() {
    let catalog = catalog();
    let report = TenantPipeline::new().run(&catalog, &tenant("t-1"));

    assert_eq!(report.catalog_version, "2026.2");
    assert_eq!(report.gaps.len(), 3);
    assert_eq!(report.failed_count(), 1);

    let edr = report.gap("DE.CM-1").unwrap().data().unwrap();
    assert_eq!(edr.coverage, 0.0);
    assert_eq!(edr.hard_gaps.len(), 1);

    let fw = report.gap("PR.PT-4").unwrap().data().unwrap();
    assert!((fw.coverage - 0.5 / 0.7).abs() < 1e-9);

    let failed = report.gap("PR.AC-9").unwrap();
    assert_eq!(failed.error().unwrap().error_code(), "CATALOG_INTEGRITY");
}

#[test]
fn test_tenant_summary_covers_every_control() {
    let report = TenantPipeline::new().run(&catalog(), &tenant("t-1"));
    assert_eq!(report.summary.totals.total, 3);
    assert_eq!(report.summary.totals.complete, 1);
    // "wip" is unknown; the control without a status is not started.
    assert_eq!(report.summary.totals.not_started, 2);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].error_code(), "UNKNOWN_STATUS");
}

#[test]
fn test_status_for_control_outside_catalog_is_warned() {
    let inventory = tenant("t-1").with_status("ZZ-404", "complete");
    let report = TenantPipeline::new().run(&catalog(), &inventory);

    // Not counted against any catalog domain.
    assert_eq!(report.summary.totals.total, 3);
    assert_eq!(report.summary.totals.complete, 1);

    let stray: Vec<&InputWarning> = report
        .warnings
        .iter()
        .filter(|w| w.error_code() == "UNKNOWN_CONTROL")
        .collect();
    assert_eq!(stray.len(), 1);
    assert_eq!(
        stray[0],
        &InputWarning::UnknownControlStatus {
            control_id: ControlId::new("ZZ-404"),
            status: "complete".to_string(),
        }
    );
}

#[test]
fn test_tenant_report_json_shape() {
    let report = TenantPipeline::new().run(&catalog(), &tenant("t-1"));
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["tenantId"], "t-1");
    assert_eq!(value["catalogVersion"], "2026.2");
    assert_eq!(value["gaps"][0]["outcome"], "computed");
    assert_eq!(value["gaps"][0]["data"]["ControlID"], "DE.CM-1");
    assert_eq!(value["gaps"][2]["outcome"], "failed");
    assert_eq!(value["gaps"][2]["errorCode"], "CATALOG_INTEGRITY");
    assert_eq!(value["warnings"][0]["kind"], "unknown_status");
}

// ---- Entity pipeline ----

#[test]
fn test_entity_pipeline_scores_and_classifies() {
    let engine = TrustEngine::default();
    let mut history = SnapshotHistory::new(EntityId::new("srv-a"));
    let mut prior_input = input("srv-a", [5; 6]);
    prior_input.assessed_at = now() - Duration::hours(6);
    history.push(engine.score(&prior_input).unwrap().data).unwrap();

    let report = EntityPipeline::new(LookbackWindow::Day)
        .run(&engine, &history, &input("srv-a", [5, 5, 5, 5, 5, 2]))
        .unwrap();
    assert_eq!(report.snapshot.trust_score, 90);
    match &report.drift {
        DriftClassification::Downgrade(m) => {
            assert_eq!(m.score_delta, -10);
            assert_eq!(m.reason_codes.as_slice(), &[Domain::D6]);
        }
        other => panic!("expected downgrade, got {other:?}"),
    }

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["drift"]["kind"], "downgrade");
    assert_eq!(value["drift"]["movement"]["scoreDelta"], -10);
    assert_eq!(value["window"], "24h");
}

#[test]
fn test_entity_pipeline_first_observation() {
    let engine = TrustEngine::default();
    let assessment = EntityAssessment::first(input("srv-new", [3; 6]));
    let report = EntityPipeline::new(LookbackWindow::Week)
        .run(&engine, &assessment.history, &assessment.input)
        .unwrap();
    assert!(report.drift.is_new_entrant());
}

// ---- Batch runner ----

fn batch_input() -> BatchInput {
    let mut flagged = input("srv-c", [4; 6]);
    flagged.facts.insert("no_tls".to_string(), false);

    let engine = TrustEngine::default();
    let mut prior = input("srv-b", [5; 6]);
    prior.assessed_at = now() - Duration::hours(3);
    let history = SnapshotHistory::from_snapshots(
        EntityId::new("srv-b"),
        vec![engine.score(&prior).unwrap().data],
    )
    .unwrap();
    let mut current = input("srv-b", [3; 6]);
    current.facts.insert("no_tls".to_string(), false);

    BatchInput {
        tenants: vec![tenant("t-2"), tenant("t-1"), tenant("t-3")],
        entities: vec![
            EntityAssessment::first(flagged),
            EntityAssessment::new(current, history),
            // Missing the `no_tls` fact.
            EntityAssessment::first(input("srv-a", [5; 6])),
        ],
    }
}

fn rules_engine() -> Arc<TrustEngine> {
    Arc::new(
        TrustEngine::new(&ScoringConfig {
            rules: vec![RuleConfig {
                id: "r-tls".to_string(),
                fact: "no_tls".to_string(),
                flag: "plaintext-transport".to_string(),
                kind: RuleKind::Risk,
            }],
            thresholds_version: Some("v7".to_string()),
            ..Default::default()
        })
        .unwrap(),
    )
}

#[test]
fn test_batch_results_sorted_and_failures_isolated() {
    let runner = BatchRunner::new(catalog(), rules_engine(), LookbackWindow::Day);
    let report = runner.run(&batch_input());

    assert_eq!(report.catalog_version, "2026.2");
    assert_eq!(report.thresholds_version, "v7");

    let tenant_ids: Vec<&str> = report.tenants.iter().map(|t| t.tenant_id.as_str()).collect();
    assert_eq!(tenant_ids, vec!["t-1", "t-2", "t-3"]);

    let entity_ids: Vec<&str> = report.entities.iter().map(|e| e.id()).collect();
    assert_eq!(entity_ids, vec!["srv-a", "srv-b", "srv-c"]);

    assert!(matches!(
        report.entities[0].error(),
        Some(PipelineError::Scoring(_))
    ));
    assert!(report.entities[1].data().unwrap().drift.is_downgrade());
    assert!(report.entities[2].data().unwrap().drift.is_new_entrant());

    // One undefined-capability control per tenant plus one entity.
    assert_eq!(report.failed_items(), 4);
}

#[test]
fn test_parallel_and_sequential_runs_agree() {
    let input = batch_input();
    let parallel = BatchRunner::new(catalog(), rules_engine(), LookbackWindow::Day).run(&input);
    let sequential = BatchRunner::new(catalog(), rules_engine(), LookbackWindow::Day)
        .with_parallel(false)
        .run(&input);
    assert_eq!(parallel, sequential);
}

#[test]
fn test_batch_emits_events() {
    let recorder = Arc::new(Recorder::default());
    let mut events = EventDispatcher::new();
    events.register(recorder.clone());

    let runner = BatchRunner::new(catalog(), rules_engine(), LookbackWindow::Day).with_events(events);
    runner.run(&batch_input());

    // 3 tenants × 2 classifiable controls
    assert_eq!(recorder.classified.load(Ordering::SeqCst), 6);
    assert_eq!(recorder.scored.load(Ordering::SeqCst), 2);
    assert_eq!(*recorder.downgrades.lock().unwrap(), vec!["srv-b".to_string()]);
    assert_eq!(recorder.failed.lock().unwrap().len(), 4);

    let completed = recorder.completed.lock().unwrap().clone().unwrap();
    assert_eq!(completed.tenants_processed, 3);
    assert_eq!(completed.entities_processed, 3);
    assert_eq!(completed.failed_items, 4);
}

#[test]
fn test_runner_from_config() {
    let config = PostureConfig::from_toml(
        r#"
[scoring]
thresholds_version = "2026-08"

[drift]
default_window = "7d"
"#,
    )
    .unwrap();
    let runner = BatchRunner::from_config(catalog(), &config).unwrap();
    assert_eq!(runner.window(), LookbackWindow::Week);
    assert_eq!(runner.engine().thresholds_version(), "2026-08");
    assert_eq!(runner.catalog().version(), "2026.2");
}
