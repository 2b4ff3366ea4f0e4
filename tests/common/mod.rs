//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use vaidya::{Config, ItemRecord, MockEncoder, Recommender, StaticKnowledge, StockInfo};

pub const DIM: usize = 4;

pub fn config() -> Config {
    Config {
        embedding_dim: DIM,
        ..Config::default()
    }
}

pub struct ItemBuilder {
    record: ItemRecord,
}

impl ItemBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            record: ItemRecord {
                name: Some(format!("Product {}", id)),
                ..ItemRecord::with_id(id)
            },
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.record.category = Some(category.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.record.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn dosha(mut self, attribute: &str) -> Self {
        self.record.domain_attribute = Some(attribute.to_string());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.record.price = Some(price);
        self
    }

    pub fn stock(mut self, quantity: i64) -> Self {
        self.record.stock = Some(StockInfo { quantity });
        self
    }

    pub fn build(self) -> ItemRecord {
        self.record
    }
}

/// Items 1 and 2 nearly identical (Immunity), 3 distant (Digestion).
pub fn scenario_catalog() -> (MockEncoder, Vec<ItemRecord>) {
    let encoder = MockEncoder::new(DIM)
        .with_item_vector("1", vec![1.0, 0.0, 0.0, 0.0])
        .with_item_vector("2", vec![0.98, 0.1, 0.0, 0.0])
        .with_item_vector("3", vec![0.1, 0.2, 0.95, 0.0]);
    let records = vec![
        ItemBuilder::new("1").category("Immunity").tags(&["Ashwagandha"]).build(),
        ItemBuilder::new("2").category("Immunity").tags(&["Turmeric"]).build(),
        ItemBuilder::new("3").category("Digestion").tags(&["Triphala"]).build(),
    ];
    (encoder, records)
}

pub fn recommender(encoder: MockEncoder) -> Recommender {
    Recommender::new(Arc::new(encoder), Arc::new(StaticKnowledge::new()), &config())
        .expect("recommender")
}
