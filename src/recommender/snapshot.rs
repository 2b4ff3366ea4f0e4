use crate::catalog::{CatalogIndex, Item};
use crate::error::{RecommendError, RecommendResult};
use crate::index::{RowLabel, SearchIndex};

/// One generation of catalog plus its search index.
///
/// Immutable after construction; readers hold it through an `Arc` while a reload
/// builds the next generation.
#[derive(Debug)]
pub struct Snapshot {
    catalog: CatalogIndex,
    index: SearchIndex,
}

impl Snapshot {
    /// Builds a fresh search index over the catalog's vectors.
    pub fn build(catalog: CatalogIndex) -> RecommendResult<Self> {
        let index = SearchIndex::built(catalog.dim(), catalog.vectors().to_vec())?;
        Self::aligned(catalog.into_items(), index)
    }

    /// Pairs a catalog with a previously saved index whose rows are described by `labels`.
    ///
    /// Each label must carry the catalog id at the same position and the fingerprint of
    /// that item's current content; anything else is `IndexCatalogMismatch`.
    pub fn with_index(
        catalog: CatalogIndex,
        index: SearchIndex,
        labels: &[RowLabel],
    ) -> RecommendResult<Self> {
        if index.dim() != catalog.dim() {
            return Err(RecommendError::DimensionMismatch {
                expected: catalog.dim(),
                actual: index.dim(),
            });
        }
        Self::from_saved(catalog.into_items(), index, labels)
    }

    /// Like [`with_index`](Self::with_index) for items that were never encoded.
    pub fn from_saved(
        items: Vec<Item>,
        index: SearchIndex,
        labels: &[RowLabel],
    ) -> RecommendResult<Self> {
        if labels.len() != items.len() {
            return Err(RecommendError::IndexCatalogMismatch {
                reason: format!(
                    "index has {} rows, catalog has {} items",
                    labels.len(),
                    items.len()
                ),
            });
        }
        for (position, (label, item)) in labels.iter().zip(&items).enumerate() {
            if label.id != item.id {
                return Err(RecommendError::IndexCatalogMismatch {
                    reason: format!(
                        "row {} is '{}' in the index but '{}' in the catalog",
                        position, label.id, item.id
                    ),
                });
            }
            if label.fingerprint != item.fingerprint() {
                return Err(RecommendError::IndexCatalogMismatch {
                    reason: format!("item '{}' changed since the index was saved", item.id),
                });
            }
        }
        Self::aligned(items, index)
    }

    // Catalog vectors become the index rows; one vector source per snapshot.
    fn aligned(items: Vec<Item>, index: SearchIndex) -> RecommendResult<Self> {
        let catalog = CatalogIndex::from_parts(items, index.rows()?, index.dim())?;
        Ok(Self { catalog, index })
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Item at `position`; positions come from this snapshot's index, so a miss is a bug.
    pub(crate) fn item(&self, position: usize) -> RecommendResult<&Item> {
        self.catalog
            .item_at(position)
            .ok_or_else(|| RecommendError::not_found(position.to_string()))
    }
}
