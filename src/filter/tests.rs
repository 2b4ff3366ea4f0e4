use super::*;
use crate::catalog::{ItemRecord, StockInfo};

fn item(record: ItemRecord) -> Item {
    Item::try_from(record).unwrap()
}

fn tonic() -> Item {
    item(ItemRecord {
        name: Some("Chyawanprash".to_string()),
        category: Some("Immunity".to_string()),
        price: Some(20.0),
        domain_attribute: Some("VATA, PITTA".to_string()),
        status: Some("ACTIVE".to_string()),
        stock: Some(StockInfo { quantity: 4 }),
        ..ItemRecord::with_id("1")
    })
}

#[test]
fn test_empty_filters_match_everything() {
    let filters = Filters::new();
    assert!(filters.is_empty());
    assert!(filters.matches(&tonic()));
    assert!(filters.matches(&item(ItemRecord::with_id("bare"))));
}

#[test]
fn test_category_equality() {
    assert!(Filters::new().with_category("Immunity").matches(&tonic()));
    assert!(!Filters::new().with_category("immunity").matches(&tonic()));
    assert!(!Filters::new()
        .with_category("Immunity")
        .matches(&item(ItemRecord::with_id("bare"))));
}

#[test]
fn test_price_bounds_are_inclusive() {
    let t = tonic();
    assert!(Filters::new().with_price_range(Some(20.0), Some(20.0)).matches(&t));
    assert!(!Filters::new().with_price_range(Some(20.01), None).matches(&t));
    assert!(!Filters::new().with_price_range(None, Some(19.99)).matches(&t));
}

#[test]
fn test_missing_price_fails_price_filter() {
    let bare = item(ItemRecord::with_id("bare"));
    assert!(!Filters::new().with_price_range(Some(0.0), None).matches(&bare));
    assert!(!Filters::new().with_price_range(None, Some(100.0)).matches(&bare));
}

#[test]
fn test_classification_substring_ignores_case() {
    let t = tonic();
    assert!(Filters::new().with_classification("pitta").matches(&t));
    assert!(!Filters::new().with_classification("KAPHA").matches(&t));
    assert!(!Filters::new()
        .with_classification("VATA")
        .matches(&item(ItemRecord::with_id("bare"))));
}

#[test]
fn test_in_stock_requires_positive_quantity() {
    let filters = Filters::new().in_stock_only();
    assert!(filters.matches(&tonic()));

    let sold_out = item(ItemRecord {
        stock: Some(StockInfo { quantity: 0 }),
        ..ItemRecord::with_id("2")
    });
    assert!(!filters.matches(&sold_out));
    assert!(!filters.matches(&item(ItemRecord::with_id("3"))));

    let not_required = Filters {
        in_stock: Some(false),
        ..Filters::default()
    };
    assert!(not_required.is_empty());
    assert!(not_required.matches(&sold_out));
}

#[test]
fn test_status_equality() {
    assert!(Filters::new().with_status("ACTIVE").matches(&tonic()));
    assert!(!Filters::new().with_status("DRAFT").matches(&tonic()));
}

#[test]
fn test_keys_are_and_combined() {
    let filters = Filters::new()
        .with_category("Immunity")
        .with_classification("vata")
        .with_price_range(None, Some(10.0));
    assert!(!filters.matches(&tonic()));
}

#[test]
fn test_deserializes_from_json_object() {
    let filters: Filters =
        serde_json::from_str(r#"{"category": "Immunity", "dosha_type": "vata", "in_stock": true}"#)
            .unwrap();

    assert_eq!(filters.category.as_deref(), Some("Immunity"));
    assert_eq!(filters.classification.as_deref(), Some("vata"));
    assert_eq!(filters.in_stock, Some(true));
    assert!(filters.matches(&tonic()));
}
