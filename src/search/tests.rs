use super::*;
use crate::catalog::{CatalogIndex, ItemRecord};
use crate::embedding::MockEncoder;
use crate::knowledge::StaticKnowledge;

const GOAL_QUERY: &str = "Ayurvedic remedy for sleep. suitable for VATA dosha";

fn encoder() -> MockEncoder {
    MockEncoder::new(3)
        .with_item_vector("calm", vec![1.0, 0.0, 0.0])
        .with_item_vector("rest", vec![0.8, 0.6, 0.0])
        .with_item_vector("gut", vec![0.0, 1.0, 0.0])
        .with_item_vector("skin", vec![0.0, 0.0, 1.0])
        .with_query_vector("sleep aid", vec![1.0, 0.0, 0.0])
        .with_query_vector("digestion", vec![0.0, 1.0, 0.0])
        .with_query_vector(GOAL_QUERY, vec![0.9, 0.1, 0.0])
        .with_query_vector(
            "Ayurvedic remedy for sleep. Natural treatment. Herbal medicine.",
            vec![0.0, 0.0, 1.0],
        )
}

fn snapshot() -> (Snapshot, SemanticSearch) {
    let encoder = encoder();
    let records = vec![
        ItemRecord {
            domain_attribute: Some("PITTA".to_string()),
            category: Some("Sleep".to_string()),
            ..ItemRecord::with_id("calm")
        },
        ItemRecord {
            domain_attribute: Some("VATA".to_string()),
            category: Some("Sleep".to_string()),
            ..ItemRecord::with_id("rest")
        },
        ItemRecord {
            category: Some("Digestion".to_string()),
            ..ItemRecord::with_id("gut")
        },
        ItemRecord::with_id("skin"),
    ];
    let catalog = CatalogIndex::load(records, &encoder, 3).unwrap();
    (
        Snapshot::build(catalog).unwrap(),
        SemanticSearch::new(Arc::new(encoder)),
    )
}

fn ids(hits: &[SearchHit]) -> Vec<&str> {
    hits.iter().map(|h| h.candidate.id.as_str()).collect()
}

#[test]
fn test_relevance_thresholds() {
    assert_eq!(Relevance::from_score(0.71), Relevance::High);
    assert_eq!(Relevance::from_score(0.7), Relevance::Medium);
    assert_eq!(Relevance::from_score(0.51), Relevance::Medium);
    assert_eq!(Relevance::from_score(0.5), Relevance::Low);
    assert_eq!(Relevance::from_score(-0.2), Relevance::Low);
}

#[test]
fn test_health_goal_query_rendering() {
    assert_eq!(QueryKind::Search.render("sleep"), "sleep");
    assert_eq!(
        QueryKind::HealthGoal.render("sleep"),
        "Ayurvedic remedy for sleep. Natural treatment. Herbal medicine."
    );
}

#[test]
fn test_search_ranks_and_labels_hits() {
    let (snap, search) = snapshot();
    let hits = search
        .search(&snap, "sleep aid", QueryKind::Search, 2, &Filters::default())
        .unwrap();

    assert_eq!(ids(&hits), vec!["calm", "rest"]);
    assert_eq!(hits[0].relevance, Relevance::High);
    assert!((hits[1].candidate.score - 0.8).abs() < 1e-6);
    assert_eq!(hits[0].candidate.provenance, vec![Signal::Search]);
}

#[test]
fn test_search_uses_query_kind() {
    let (snap, search) = snapshot();
    let hits = search
        .search(&snap, "sleep", QueryKind::HealthGoal, 1, &Filters::default())
        .unwrap();
    assert_eq!(ids(&hits), vec!["skin"]);
}

#[test]
fn test_search_filters_within_double_candidates() {
    let (snap, search) = snapshot();
    let hits = search
        .search(
            &snap,
            "sleep aid",
            QueryKind::Search,
            1,
            &Filters::new().with_classification("vata"),
        )
        .unwrap();
    assert_eq!(ids(&hits), vec!["rest"]);
}

#[test]
fn test_empty_query_is_validation_error() {
    let (snap, search) = snapshot();
    let result = search.search(&snap, "   ", QueryKind::Search, 3, &Filters::default());
    assert!(matches!(
        result,
        Err(RecommendError::Validation { field: "query", .. })
    ));
}

#[test]
fn test_multi_query_prefers_items_matched_by_more_queries() {
    let (snap, search) = snapshot();
    let queries = vec!["sleep aid".to_string(), "digestion".to_string()];
    let hits = search
        .multi_query_search(&snap, &queries, 2, &Filters::default())
        .unwrap();

    assert_eq!(ids(&hits), vec!["rest", "calm"]);
    assert_eq!(hits[0].matched_queries, queries);
    assert!((hits[0].candidate.score - 0.8).abs() < 1e-6);
    assert_eq!(hits[1].matched_queries, vec!["sleep aid".to_string()]);
}

#[test]
fn test_multi_query_serializes_matched_queries() {
    let (snap, search) = snapshot();
    let hits = search
        .multi_query_search(&snap, &["digestion".to_string()], 1, &Filters::default())
        .unwrap();

    let json = serde_json::to_value(&hits[0]).unwrap();
    assert_eq!(json["id"], "gut");
    assert_eq!(json["relevance"], "high");
    assert_eq!(json["matched_queries"][0], "digestion");
}

#[test]
fn test_domain_search_restricts_to_classification() {
    let (snap, search) = snapshot();
    let hits = search
        .domain_search(&snap, &StaticKnowledge::new(), "sleep", Some("vata"), 5)
        .unwrap();
    assert_eq!(ids(&hits), vec!["rest"]);
}

#[test]
fn test_domain_search_rejects_unknown_classification() {
    let (snap, search) = snapshot();
    let result = search.domain_search(&snap, &StaticKnowledge::new(), "sleep", Some("fire"), 5);
    assert!(matches!(
        result,
        Err(RecommendError::Validation {
            field: "classification",
            ..
        })
    ));
}
