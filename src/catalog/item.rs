//! Catalog record types.

use serde::{Deserialize, Serialize};

use crate::embedding::describe_item;
use crate::error::{RecommendError, RecommendResult};

/// Item id as it appears in raw catalog JSON (string or integer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawItemId {
    Text(String),
    Number(i64),
}

impl RawItemId {
    fn into_string(self) -> String {
        match self {
            RawItemId::Text(s) => s,
            RawItemId::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for RawItemId {
    fn from(value: &str) -> Self {
        RawItemId::Text(value.to_string())
    }
}

/// Stock information attached to an item.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct StockInfo {
    pub quantity: i64,
}

/// Unvalidated catalog record, as read from JSON.
///
/// Accepts the storefront field names (`ingredients`, `dosha_type`) as aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub id: Option<RawItemId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, alias = "ingredients")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default, alias = "dosha_type", alias = "doshaType")]
    pub domain_attribute: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "shortDescription")]
    pub short_description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub stock: Option<StockInfo>,
}

impl ItemRecord {
    /// Creates a record with only an id set.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(RawItemId::Text(id.into())),
            ..Default::default()
        }
    }
}

/// Validated, immutable catalog item.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Option<f64>,
    /// Domain tags (ingredients).
    pub tags: Vec<String>,
    /// Benefit / effect labels.
    pub benefits: Vec<String>,
    /// Compatibility classification, e.g. `"VATA, PITTA"`.
    pub domain_attribute: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub status: Option<String>,
    pub stock: Option<StockInfo>,
}

impl Item {
    /// Stock quantity, if the record carried stock data.
    pub fn stock_quantity(&self) -> Option<i64> {
        self.stock.map(|s| s.quantity)
    }

    /// Returns `true` when both items declare the same category.
    pub fn shares_category(&self, other: &Item) -> bool {
        matches!((&self.category, &other.category), (Some(a), Some(b)) if a == b)
    }

    /// BLAKE3 of the text an encoder sees for this item.
    #[inline]
    pub fn fingerprint(&self) -> [u8; 32] {
        *blake3::hash(describe_item(self).as_bytes()).as_bytes()
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = RecommendError;

    fn try_from(record: ItemRecord) -> RecommendResult<Self> {
        let id = record
            .id
            .map(RawItemId::into_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RecommendError::validation("id", "item record has no id"))?;

        if let Some(price) = record.price {
            if !price.is_finite() {
                return Err(RecommendError::validation(
                    "price",
                    format!("item '{}' has non-finite price", id),
                ));
            }
        }

        Ok(Item {
            id,
            name: record.name.unwrap_or_default(),
            category: record.category,
            price: record.price,
            tags: record.tags,
            benefits: record.benefits,
            domain_attribute: record.domain_attribute,
            brand: record.brand,
            description: record.description,
            short_description: record.short_description,
            status: record.status,
            stock: record.stock,
        })
    }
}
