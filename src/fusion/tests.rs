use std::sync::Arc;

use super::*;
use crate::catalog::{CatalogIndex, ItemRecord};
use crate::embedding::MockEncoder;
use crate::knowledge::StaticKnowledge;

fn candidate(id: &str, position: usize, score: f32, signal: Signal) -> ScoredCandidate {
    ScoredCandidate::new(id, position, score, signal, format!("{} reason", signal))
}

fn engine() -> FusionEngine {
    FusionEngine::new(
        ContentScorer::default(),
        HistoryScorer::new(),
        DomainRuleScorer::new(Arc::new(StaticKnowledge::new())),
    )
}

fn snapshot() -> Snapshot {
    let encoder = MockEncoder::new(3)
        .with_item_vector("1", vec![1.0, 0.0, 0.0])
        .with_item_vector("2", vec![0.9, 0.1, 0.0])
        .with_item_vector("3", vec![0.1, 0.9, 0.0])
        .with_item_vector("4", vec![0.0, 0.2, 0.9]);
    let records = vec![
        ItemRecord {
            category: Some("Immunity".to_string()),
            domain_attribute: Some("VATA".to_string()),
            ..ItemRecord::with_id("1")
        },
        ItemRecord {
            category: Some("Immunity".to_string()),
            domain_attribute: Some("VATA, PITTA".to_string()),
            ..ItemRecord::with_id("2")
        },
        ItemRecord {
            category: Some("Digestion".to_string()),
            ..ItemRecord::with_id("3")
        },
        ItemRecord {
            category: Some("Digestion".to_string()),
            domain_attribute: Some("KAPHA".to_string()),
            ..ItemRecord::with_id("4")
        },
    ];
    Snapshot::build(CatalogIndex::load(records, &encoder, 3).unwrap()).unwrap()
}

#[test]
fn test_reducer_first_writer_sets_raw_score() {
    let mut reducer = FusionReducer::default();
    reducer.absorb(Signal::Content, vec![candidate("a", 0, 0.9, Signal::Content)]);
    reducer.absorb(
        Signal::Collaborative,
        vec![
            candidate("a", 0, 0.5, Signal::Collaborative),
            candidate("b", 1, 0.7, Signal::Collaborative),
        ],
    );
    reducer.absorb(Signal::DomainRule, vec![candidate("b", 1, 0.8, Signal::DomainRule)]);

    let fused = reducer.finish(10);

    assert_eq!(fused[0].id, "a");
    assert!((fused[0].score - (0.9 + 0.4 * 0.5)).abs() < 1e-6);
    assert_eq!(fused[0].provenance, vec![Signal::Content, Signal::Collaborative]);
    assert_eq!(fused[0].justification, "content reason");

    assert_eq!(fused[1].id, "b");
    assert!((fused[1].score - (0.7 + 0.3 * 0.8)).abs() < 1e-6);
    assert_eq!(
        fused[1].provenance,
        vec![Signal::Collaborative, Signal::DomainRule]
    );
}

#[test]
fn test_reducer_ties_break_by_id() {
    let mut reducer = FusionReducer::default();
    reducer.absorb(
        Signal::Content,
        vec![
            candidate("b", 0, 0.5, Signal::Content),
            candidate("c", 1, 0.5, Signal::Content),
            candidate("a", 2, 0.5, Signal::Content),
        ],
    );
    let ids: Vec<String> = reducer.finish(2).into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_no_signals_returns_empty() {
    let fused = engine().fuse(&snapshot(), &HybridRequest::new(), 10, &Filters::default());
    assert!(fused.is_empty());

    let empty_history = HybridRequest::new().with_history(Vec::<String>::new());
    assert!(!empty_history.has_signals());
}

#[test]
fn test_fusion_is_deterministic() {
    let snap = snapshot();
    let request = HybridRequest::new()
        .with_current_item("1")
        .with_history(["3"])
        .with_classification("VATA");

    let first = engine().fuse(&snap, &request, 3, &Filters::default());
    for _ in 0..5 {
        assert_eq!(engine().fuse(&snap, &request, 3, &Filters::default()), first);
    }
    assert!(first.len() <= 3);
}

#[test]
fn test_fusion_combines_provenance() {
    let snap = snapshot();
    let request = HybridRequest::new()
        .with_current_item("1")
        .with_classification("VATA");

    let fused = engine().fuse(&snap, &request, 3, &Filters::default());
    let two = fused.iter().find(|c| c.id == "2").unwrap();

    assert_eq!(two.provenance, vec![Signal::Content, Signal::DomainRule]);
    assert_eq!(fused[0].id, "2");
}

#[test]
fn test_failing_scorer_is_skipped() {
    let snap = snapshot();
    let request = HybridRequest::new()
        .with_current_item("missing")
        .with_classification("VATA");

    let fused = engine().fuse(&snap, &request, 10, &Filters::default());
    let ids: Vec<&str> = fused.iter().map(|c| c.id.as_str()).collect();

    assert_eq!(ids, vec!["1", "2"]);
    assert!(fused.iter().all(|c| c.provenance == vec![Signal::DomainRule]));
}

#[test]
fn test_fusion_applies_filters() {
    let snap = snapshot();
    let request = HybridRequest::new()
        .with_current_item("1")
        .with_history(["4"]);

    let fused = engine().fuse(&snap, &request, 10, &Filters::new().with_category("Digestion"));
    assert!(!fused.is_empty());
    assert!(fused.iter().all(|c| c.id == "3" || c.id == "4"));
    assert!(fused.iter().all(|c| c.id != "4" || c.provenance[0] == Signal::Content));
}

#[test]
fn test_request_deserializes_storefront_field_names() {
    let request: HybridRequest = serde_json::from_str(
        r#"{"product_id": "1", "user_history": ["2"], "dosha_type": "VATA", "health_goal": "sleep"}"#,
    )
    .unwrap();

    assert_eq!(request.current_item.as_deref(), Some("1"));
    assert_eq!(request.history, vec!["2"]);
    assert_eq!(request.classification.as_deref(), Some("VATA"));
    assert_eq!(request.goal.as_deref(), Some("sleep"));
}
