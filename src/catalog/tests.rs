use super::*;
use crate::embedding::{MockEncoder, StubEncoder};

fn record(id: &str, category: &str) -> ItemRecord {
    ItemRecord {
        name: Some(format!("Item {}", id)),
        category: Some(category.to_string()),
        ..ItemRecord::with_id(id)
    }
}

#[test]
fn test_load_assigns_insertion_positions() {
    let encoder = StubEncoder::new(8);
    let catalog = CatalogIndex::load(
        vec![
            record("b", "Immunity"),
            record("a", "Immunity"),
            record("c", "Digestion"),
        ],
        &encoder,
        8,
    )
    .unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.position_of("b"), Some(0));
    assert_eq!(catalog.position_of("a"), Some(1));
    assert_eq!(catalog.position_of("c"), Some(2));
    assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    assert_eq!(catalog.vectors().len(), catalog.len());
}

#[test]
fn test_vector_rows_follow_item_positions() {
    let encoder = MockEncoder::new(2)
        .with_item_vector("x", vec![1.0, 0.0])
        .with_item_vector("y", vec![0.0, 1.0]);
    let catalog =
        CatalogIndex::load(vec![record("x", "A"), record("y", "B")], &encoder, 2).unwrap();

    let y = catalog.position_of("y").unwrap();
    assert_eq!(catalog.vector_at(y), Some(&[0.0, 1.0][..]));
    assert_eq!(catalog.item_at(y).unwrap().id, "y");
}

#[test]
fn test_lookup_by_id() {
    let encoder = StubEncoder::new(4);
    let catalog = CatalogIndex::load(vec![record("1", "Immunity")], &encoder, 4).unwrap();

    assert_eq!(catalog.lookup_by_id("1").unwrap().name, "Item 1");
    assert!(matches!(
        catalog.lookup_by_id("404"),
        Err(RecommendError::NotFound { id }) if id == "404"
    ));
}

#[test]
fn test_missing_id_is_validation_error() {
    let encoder = StubEncoder::new(4);
    let result = CatalogIndex::load(
        vec![record("1", "Immunity"), ItemRecord::default()],
        &encoder,
        4,
    );

    assert!(matches!(
        result,
        Err(RecommendError::Validation { field: "id", .. })
    ));
}

#[test]
fn test_blank_id_is_validation_error() {
    let encoder = StubEncoder::new(4);
    let result = CatalogIndex::load(vec![ItemRecord::with_id("  ")], &encoder, 4);
    assert!(matches!(
        result,
        Err(RecommendError::Validation { field: "id", .. })
    ));
}

#[test]
fn test_duplicate_id_is_validation_error() {
    let encoder = StubEncoder::new(4);
    let result = CatalogIndex::load(
        vec![record("1", "Immunity"), record("1", "Digestion")],
        &encoder,
        4,
    );
    assert!(matches!(
        result,
        Err(RecommendError::Validation { field: "id", .. })
    ));
}

#[test]
fn test_encoder_dimension_mismatch_is_fatal() {
    let encoder = StubEncoder::new(16);
    let result = CatalogIndex::load(vec![record("1", "A")], &encoder, 8);
    assert!(matches!(
        result,
        Err(RecommendError::DimensionMismatch {
            expected: 8,
            actual: 16
        })
    ));
}

#[test]
fn test_wrong_length_vector_is_fatal() {
    let encoder = MockEncoder::new(3).with_item_vector("1", vec![1.0, 2.0]);
    let result = CatalogIndex::load(vec![record("1", "A")], &encoder, 3);
    assert!(matches!(
        result,
        Err(RecommendError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[test]
fn test_non_finite_vector_is_rejected() {
    for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        let encoder = MockEncoder::new(3)
            .with_item_vector("1", vec![1.0, 0.0, 0.0])
            .with_item_vector("2", vec![0.0, bad, 0.0]);
        let result = CatalogIndex::load(vec![record("1", "A"), record("2", "A")], &encoder, 3);
        match result {
            Err(RecommendError::Validation { field, reason }) => {
                assert_eq!(field, "vectors");
                assert!(reason.contains("'2'"));
            }
            other => panic!("expected Validation, got {:?}", other.map(|c| c.len())),
        }
    }
}

#[test]
fn test_fingerprint_tracks_encoded_text() {
    let base = Item::try_from(record("1", "Immunity")).unwrap();

    let repriced = Item {
        price: Some(99.0),
        ..base.clone()
    };
    assert_eq!(base.fingerprint(), repriced.fingerprint());

    let recategorized = Item {
        category: Some("Digestion".to_string()),
        ..base.clone()
    };
    assert_ne!(base.fingerprint(), recategorized.fingerprint());
}

#[test]
fn test_row_labels_follow_positions() {
    let encoder = StubEncoder::new(4);
    let catalog =
        CatalogIndex::load(vec![record("b", "A"), record("a", "B")], &encoder, 4).unwrap();

    let labels = catalog.row_labels();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].id, "b");
    assert_eq!(labels[1].fingerprint, catalog.items()[1].fingerprint());
}

#[test]
fn test_encoder_failure_propagates() {
    let encoder = MockEncoder::new(3).failing_on("2");
    let result = CatalogIndex::load(vec![record("1", "A"), record("2", "A")], &encoder, 3);
    assert!(matches!(result, Err(RecommendError::Embedding(_))));
}

#[test]
fn test_parse_records_accepts_storefront_field_names() {
    let json = r#"[
        {"id": 7, "name": "Triphala", "ingredients": ["Amalaki", "Haritaki"],
         "dosha_type": "VATA, PITTA", "stock": {"quantity": 3}, "price": 12.5},
        {"id": "x-1", "category": "Digestion"}
    ]"#;

    let records = parse_records(json).unwrap();
    let items: Vec<Item> = records
        .into_iter()
        .map(|r| Item::try_from(r).unwrap())
        .collect();

    assert_eq!(items[0].id, "7");
    assert_eq!(items[0].tags, vec!["Amalaki", "Haritaki"]);
    assert_eq!(items[0].domain_attribute.as_deref(), Some("VATA, PITTA"));
    assert_eq!(items[0].stock_quantity(), Some(3));
    assert_eq!(items[0].price, Some(12.5));
    assert_eq!(items[1].id, "x-1");
    assert_eq!(items[1].name, "");
    assert!(items[1].stock.is_none());
}

#[test]
fn test_parse_records_rejects_malformed_json() {
    assert!(matches!(
        parse_records("{not json"),
        Err(RecommendError::Validation {
            field: "catalog",
            ..
        })
    ));
}

#[test]
fn test_read_records_missing_file() {
    let result = read_records(std::path::Path::new("/nonexistent/catalog.json"));
    assert!(matches!(result, Err(RecommendError::Io { .. })));
}

#[test]
fn test_shares_category() {
    let a = Item::try_from(record("a", "Immunity")).unwrap();
    let b = Item::try_from(record("b", "Immunity")).unwrap();
    let c = Item::try_from(ItemRecord::with_id("c")).unwrap();

    assert!(a.shares_category(&b));
    assert!(!a.shares_category(&c));
    assert!(!c.shares_category(&c));
}
