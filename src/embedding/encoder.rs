//! The encoder seam: item records and free-text queries become fixed-length vectors.

use crate::catalog::Item;

use super::error::EmbeddingError;

/// Maps items and queries into a shared vector space of dimension [`dim`](VectorEncoder::dim).
///
/// Implementations must always return vectors of exactly `dim()` floats; the catalog
/// treats any other length as a fatal configuration error.
pub trait VectorEncoder: Send + Sync {
    /// Output dimension.
    fn dim(&self) -> usize;

    /// Encodes arbitrary text.
    fn encode_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Encodes one catalog item from its rendered description.
    fn encode_item(&self, item: &Item) -> Result<Vec<f32>, EmbeddingError> {
        self.encode_text(&describe_item(item))
    }

    /// Encodes a whole catalog; row `i` of the result describes `items[i]`.
    fn encode_items_batch(&self, items: &[Item]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        items.iter().map(|item| self.encode_item(item)).collect()
    }

    /// Encodes a search query.
    fn encode_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.encode_text(text)
    }
}

/// Renders the text an encoder sees for an item. Absent fields are skipped.
pub fn describe_item(item: &Item) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !item.name.is_empty() {
        parts.push(format!("Product: {}", item.name));
    }
    if let Some(category) = &item.category {
        parts.push(format!("Category: {}", category));
    }
    if let Some(brand) = &item.brand {
        parts.push(format!("Brand: {}", brand));
    }
    if let Some(description) = &item.description {
        parts.push(description.clone());
    }
    if let Some(short) = &item.short_description {
        parts.push(short.clone());
    }
    if !item.tags.is_empty() {
        parts.push(format!("Ingredients: {}", item.tags.join(", ")));
    }
    if !item.benefits.is_empty() {
        parts.push(format!("Benefits: {}", item.benefits.join(", ")));
    }
    if let Some(attribute) = &item.domain_attribute {
        parts.push(format!("Dosha: {}", attribute));
    }

    parts.join(". ")
}

/// L2-normalizes in place. Zero vectors are left untouched.
#[inline]
pub fn l2_normalize(values: &mut [f32]) {
    let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in values.iter_mut() {
            *x /= norm;
        }
    }
}
