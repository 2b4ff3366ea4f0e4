//! End-to-end recommendation scenarios through the public API.

mod common;

use common::{ItemBuilder, recommender, scenario_catalog};
use vaidya::{Filters, HybridRequest, MockEncoder, RecommendError, Signal};

#[test]
fn test_content_based_prefers_similar_same_category_item() {
    let (encoder, records) = scenario_catalog();
    let rec = recommender(encoder);
    rec.reload(records).unwrap();

    let results = rec.content_based("1", 2, &Filters::default()).unwrap();
    let ids: Vec<&str> = results.iter().map(|c| c.id.as_str()).collect();

    assert_eq!(ids, vec!["2", "3"]);
    assert!(results[0].score > results[1].score);
    assert!(results.iter().all(|c| c.justification == "Similar to your viewed product"));
}

#[test]
fn test_domain_based_keeps_only_declared_classification() {
    let records = vec![
        ItemBuilder::new("1").dosha("PITTA").build(),
        ItemBuilder::new("2").dosha("VATA, KAPHA").build(),
        ItemBuilder::new("3").build(),
    ];
    let rec = recommender(MockEncoder::new(common::DIM));
    rec.reload(records).unwrap();

    let results = rec.domain_based("VATA", None, 10, &Filters::default()).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "2");
    assert!((results[0].score - 0.8).abs() < 1e-6);
}

#[test]
fn test_cold_start_returns_first_items() {
    let (encoder, records) = scenario_catalog();
    let rec = recommender(encoder);
    rec.reload(records).unwrap();

    let results = rec.user_based(&[], 2, &Filters::default()).unwrap();

    let ids: Vec<&str> = results.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(results.iter().all(|c| c.score == 0.5));
    assert!(results.iter().all(|c| c.justification == "Popular product"));
}

#[test]
fn test_history_excludes_viewed_items() {
    let (encoder, records) = scenario_catalog();
    let rec = recommender(encoder);
    rec.reload(records).unwrap();

    let history = vec!["2".to_string()];
    let results = rec.user_based(&history, 5, &Filters::default()).unwrap();

    assert!(results.iter().all(|c| c.id != "2"));
    assert_eq!(results[0].id, "1");
}

#[test]
fn test_hybrid_merges_signals_deterministically() {
    let (encoder, mut records) = scenario_catalog();
    records[1].domain_attribute = Some("VATA".to_string());
    let rec = recommender(encoder);
    rec.reload(records).unwrap();

    let request = HybridRequest::new()
        .with_current_item("1")
        .with_history(["3"])
        .with_classification("vata");

    let first = rec.hybrid(&request, 3, &Filters::default()).unwrap();
    let second = rec.hybrid(&request, 3, &Filters::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].id, "2");
    assert_eq!(
        first[0].provenance,
        vec![Signal::Content, Signal::Collaborative, Signal::DomainRule]
    );
}

#[test]
fn test_hybrid_without_signals_is_empty() {
    let (encoder, records) = scenario_catalog();
    let rec = recommender(encoder);
    rec.reload(records).unwrap();

    let results = rec
        .hybrid(&HybridRequest::new(), 5, &Filters::default())
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_filters_from_json_restrict_results() {
    let encoder = MockEncoder::new(common::DIM);
    let records = vec![
        ItemBuilder::new("a").category("Immunity").price(5.0).stock(3).build(),
        ItemBuilder::new("b").category("Immunity").price(50.0).stock(3).build(),
        ItemBuilder::new("c").category("Immunity").price(8.0).stock(0).build(),
        ItemBuilder::new("d").category("Digestion").price(6.0).stock(1).build(),
    ];
    let rec = recommender(encoder);
    rec.reload(records).unwrap();

    let filters: Filters =
        serde_json::from_str(r#"{"category": "Immunity", "price_max": 10.0, "in_stock": true}"#)
            .unwrap();
    let results = rec.user_based(&[], 10, &filters).unwrap();

    let ids: Vec<&str> = results.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
}

#[test]
fn test_unknown_item_is_not_found() {
    let (encoder, records) = scenario_catalog();
    let rec = recommender(encoder);
    rec.reload(records).unwrap();

    assert!(matches!(
        rec.content_based("missing", 3, &Filters::default()),
        Err(RecommendError::NotFound { .. })
    ));
}
