//! In-memory item catalog and its position-aligned vector matrix.
//!
//! Positions are assigned in insertion order and are the join key between the
//! catalog, the vector rows and the search-index rows. A catalog is never patched:
//! reloading builds a new [`CatalogIndex`] from scratch.

mod item;

#[cfg(test)]
mod tests;

pub use item::{Item, ItemRecord, RawItemId, StockInfo};

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::embedding::VectorEncoder;
use crate::error::{RecommendError, RecommendResult};
use crate::index::RowLabel;

/// Loaded catalog: items by position plus one vector per item.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    items: Vec<Item>,
    positions: HashMap<String, usize>,
    vectors: Vec<Vec<f32>>,
    dim: usize,
}

impl CatalogIndex {
    /// Validates `records`, encodes every item and returns the new catalog.
    ///
    /// Fails with `Validation` on a record without id or a duplicated id, and with
    /// `DimensionMismatch` when the encoder disagrees with `dim`.
    pub fn load(
        records: Vec<ItemRecord>,
        encoder: &dyn VectorEncoder,
        dim: usize,
    ) -> RecommendResult<Self> {
        if encoder.dim() != dim {
            return Err(RecommendError::DimensionMismatch {
                expected: dim,
                actual: encoder.dim(),
            });
        }

        let items = records
            .into_iter()
            .map(Item::try_from)
            .collect::<RecommendResult<Vec<_>>>()?;

        debug!(items = items.len(), "Encoding catalog items");
        let vectors = encoder.encode_items_batch(&items)?;

        let catalog = Self::from_parts(items, vectors, dim)?;
        info!(items = catalog.len(), dim = dim, "Catalog loaded");
        Ok(catalog)
    }

    /// Assembles a catalog from already-encoded items.
    pub fn from_parts(items: Vec<Item>, vectors: Vec<Vec<f32>>, dim: usize) -> RecommendResult<Self> {
        if vectors.len() != items.len() {
            return Err(RecommendError::validation(
                "vectors",
                format!(
                    "{} vectors for {} items",
                    vectors.len(),
                    items.len()
                ),
            ));
        }

        if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
            return Err(RecommendError::DimensionMismatch {
                expected: dim,
                actual: bad.len(),
            });
        }

        if let Some(position) = vectors
            .iter()
            .position(|v| v.iter().any(|x| !x.is_finite()))
        {
            return Err(RecommendError::validation(
                "vectors",
                format!(
                    "vector for item '{}' has non-finite components",
                    items[position].id
                ),
            ));
        }

        let mut positions = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if positions.insert(item.id.clone(), position).is_some() {
                return Err(RecommendError::validation(
                    "id",
                    format!("duplicate item id '{}'", item.id),
                ));
            }
        }

        Ok(Self {
            items,
            positions,
            vectors,
            dim,
        })
    }

    /// Returns the item with `id`, or `NotFound`.
    pub fn lookup_by_id(&self, id: &str) -> RecommendResult<&Item> {
        self.position_of(id)
            .map(|p| &self.items[p])
            .ok_or_else(|| RecommendError::not_found(id))
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn item_at(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn vector_at(&self, position: usize) -> Option<&[f32]> {
        self.vectors.get(position).map(Vec::as_slice)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// Id and content fingerprint of every row, in position order.
    pub fn row_labels(&self) -> Vec<RowLabel> {
        self.items
            .iter()
            .map(|item| RowLabel {
                id: item.id.clone(),
                fingerprint: item.fingerprint(),
            })
            .collect()
    }

    /// Drops the vectors, keeping the items in position order.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Item ids in position order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parses a JSON array of item records.
pub fn parse_records(json: &str) -> RecommendResult<Vec<ItemRecord>> {
    serde_json::from_str(json)
        .map_err(|e| RecommendError::validation("catalog", format!("malformed catalog JSON: {}", e)))
}

/// Reads and parses a catalog JSON file.
pub fn read_records(path: &Path) -> RecommendResult<Vec<ItemRecord>> {
    let json = std::fs::read_to_string(path).map_err(|source| RecommendError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&json)
}
