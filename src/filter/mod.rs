//! Caller-supplied result filters.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::catalog::Item;

/// Predicate over catalog items. Every present key must match; absent keys do not
/// constrain. Deserializes directly from a JSON filter object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Filters {
    /// Exact category.
    pub category: Option<String>,
    /// Inclusive lower price bound. Items without a price fail.
    pub price_min: Option<f64>,
    /// Inclusive upper price bound. Items without a price fail.
    pub price_max: Option<f64>,
    /// Case-insensitive substring of the item's classification attribute.
    #[serde(alias = "dosha_type", alias = "doshaType")]
    pub classification: Option<String>,
    /// When `true`, only items with positive stock pass.
    pub in_stock: Option<bool>,
    /// Exact status, e.g. `"ACTIVE"`.
    pub status: Option<String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }

    pub fn in_stock_only(mut self) -> Self {
        self.in_stock = Some(true);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns `true` when no key constrains anything.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.classification.is_none()
            && self.in_stock != Some(true)
            && self.status.is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(category) = &self.category
            && item.category.as_deref() != Some(category.as_str())
        {
            return false;
        }

        if let Some(min) = self.price_min
            && !item.price.is_some_and(|p| p >= min)
        {
            return false;
        }

        if let Some(max) = self.price_max
            && !item.price.is_some_and(|p| p <= max)
        {
            return false;
        }

        if let Some(wanted) = &self.classification
            && !item
                .domain_attribute
                .as_deref()
                .is_some_and(|attr| contains_ignore_case(attr, wanted))
        {
            return false;
        }

        if self.in_stock == Some(true) && !item.stock_quantity().is_some_and(|q| q > 0) {
            return false;
        }

        if let Some(status) = &self.status
            && item.status.as_deref() != Some(status.as_str())
        {
            return false;
        }

        true
    }
}

/// Case-insensitive substring test.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
