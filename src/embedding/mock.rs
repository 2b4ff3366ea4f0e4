use std::collections::HashMap;

use crate::catalog::Item;

use super::encoder::VectorEncoder;
use super::error::EmbeddingError;
use super::stub::StubEncoder;

/// Encoder with hand-picked vectors for tests.
///
/// Items are looked up by id and queries by exact text; anything else falls back to
/// [`StubEncoder`]. Vectors are returned as given, not normalized, so tests can feed
/// wrong dimensions or zero rows on purpose.
#[derive(Debug, Clone)]
pub struct MockEncoder {
    dim: usize,
    item_vectors: HashMap<String, Vec<f32>>,
    query_vectors: HashMap<String, Vec<f32>>,
    failing_items: Vec<String>,
    fallback: StubEncoder,
}

impl MockEncoder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            item_vectors: HashMap::new(),
            query_vectors: HashMap::new(),
            failing_items: Vec::new(),
            fallback: StubEncoder::new(dim),
        }
    }

    pub fn with_item_vector(mut self, id: &str, vector: Vec<f32>) -> Self {
        self.item_vectors.insert(id.to_string(), vector);
        self
    }

    pub fn with_query_vector(mut self, query: &str, vector: Vec<f32>) -> Self {
        self.query_vectors.insert(query.to_string(), vector);
        self
    }

    /// Makes encoding of the given item fail.
    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing_items.push(id.to_string());
        self
    }
}

impl VectorEncoder for MockEncoder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn encode_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match self.query_vectors.get(text) {
            Some(v) => Ok(v.clone()),
            None => self.fallback.encode_text(text),
        }
    }

    fn encode_item(&self, item: &Item) -> Result<Vec<f32>, EmbeddingError> {
        if self.failing_items.iter().any(|id| id == &item.id) {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("mock failure for item {}", item.id),
            });
        }
        match self.item_vectors.get(&item.id) {
            Some(v) => Ok(v.clone()),
            None => self.fallback.encode_text(&item.id),
        }
    }
}
