//! Criterion benchmarks for the batch pipeline.
//!
//! Targets:
//! - Gap classification, 20 requirements < 0.01ms
//! - Tenant pipeline, 200 controls × 50 tools < 1ms
//! - Entity scoring + drift, 1K entities (parallel) < 10ms
//! - Ranking query over 1K rows < 1ms

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use posture_analysis::catalog::{Catalog, CatalogFile};
use posture_analysis::coverage::*;
use posture_analysis::drift::{LookbackWindow, SnapshotHistory};
use posture_analysis::pipeline::*;
use posture_analysis::ranking::{build_rankings, RankingQuery, SortDirection, SortKey};
use posture_analysis::scoring::*;
use posture_core::types::EntityId;

fn cap(i: usize) -> String {
    format!("cap-{i:03}")
}

fn make_catalog(controls: usize, caps: usize) -> Catalog {
    let capabilities = (0..caps)
        .map(|i| Capability {
            id: cap(i).into(),
            name: format!("Capability {i}"),
        })
        .collect();
    let controls = (0..controls)
        .map(|c| {
            let reqs = (0..4)
                .map(|r| {
                    let id = cap((c * 7 + r * 13) % caps);
                    if r % 2 == 0 {
                        Requirement::hard(&id, 0.25)
                    } else {
                        Requirement::soft(&id, 0.25, 0.6)
                    }
                })
                .collect();
            Control::new(&format!("CTL-{c:04}"), &format!("D{}.X", c % 6), "Bench control", reqs)
        })
        .collect();
    Catalog::new(CatalogFile {
        version: "bench".to_string(),
        capabilities,
        controls,
    })
    .unwrap()
}

fn make_tools(n: usize, caps: usize) -> Vec<Tool> {
    (0..n)
        .map(|i| {
            let a = cap((i * 3) % caps);
            let b = cap((i * 5 + 1) % caps);
            Tool::new(&format!("tool-{i}"), "vendor", &[(a.as_str(), 0.5), (b.as_str(), 0.9)])
        })
        .collect()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn make_entities(n: usize, engine: &TrustEngine) -> Vec<EntityAssessment> {
    (0..n)
        .map(|i| {
            let id = format!("srv-{i:05}");
            let subs = |k: usize| DomainSubscores::new([0, 1, 2, 3, 4, 5].map(|d| ((d + i + k) % 6) as u8));
            let prior = AssessmentInput {
                entity_id: EntityId::new(id.as_str()),
                assessed_at: now() - Duration::hours(12),
                subscores: subs(0),
                evidence: EvidenceMetadata::default(),
                facts: StructuralFacts::new(),
            };
            let history = SnapshotHistory::from_snapshots(
                EntityId::new(id.as_str()),
                vec![engine.score(&prior).unwrap().data],
            )
            .unwrap();
            let current = AssessmentInput {
                assessed_at: now(),
                subscores: subs(i % 3),
                ..prior
            };
            EntityAssessment::new(current, history)
        })
        .collect()
}

fn bench_classifier(c: &mut Criterion) {
    let reqs: Vec<Requirement> = (0..20)
        .map(|i| Requirement::soft(&cap(i), 0.05, 0.7))
        .collect();
    let control = Control::new("CTL-1", "PR.AC", "Bench", reqs);
    let index = CapabilityIndex::build(&make_tools(50, 40));
    let classifier = GapClassifier::new();

    c.bench_function("classify_20_requirements", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&control), black_box(&index))))
    });
}

fn bench_tenant_pipeline(c: &mut Criterion) {
    let catalog = make_catalog(200, 80);
    let tenant = TenantInventory::new("bench", make_tools(50, 80));
    let pipeline = TenantPipeline::new();

    c.bench_function("tenant_pipeline_200_controls", |b| {
        b.iter(|| black_box(pipeline.run(&catalog, black_box(&tenant))))
    });
}

fn bench_entity_batch(c: &mut Criterion) {
    let engine = Arc::new(TrustEngine::default());
    let entities = make_entities(1_000, &engine);
    let runner = BatchRunner::new(Arc::new(make_catalog(10, 20)), engine, LookbackWindow::Day);

    c.bench_function("entity_batch_1k_parallel", |b| {
        b.iter(|| black_box(runner.run_entities(black_box(&entities))))
    });

    let sequential = runner.clone().with_parallel(false);
    c.bench_function("entity_batch_1k_sequential", |b| {
        b.iter(|| black_box(sequential.run_entities(black_box(&entities))))
    });
}

fn bench_ranking(c: &mut Criterion) {
    let engine = TrustEngine::default();
    let histories: Vec<SnapshotHistory> = make_entities(1_000, &engine)
        .into_iter()
        .map(|mut e| {
            let snapshot = engine.score(&e.input).unwrap().data;
            e.history.push(snapshot).unwrap();
            e.history
        })
        .collect();
    let items = build_rankings(&histories, &[]);
    let query = RankingQuery::new(SortKey::ScoreDelta24h, SortDirection::Desc).with_limit(50);

    c.bench_function("ranking_query_1k", |b| {
        b.iter(|| black_box(query.apply(black_box(&items))))
    });
}

criterion_group!(
    benches,
    bench_classifier,
    bench_tenant_pipeline,
    bench_entity_batch,
    bench_ranking
);
criterion_main!(benches);
