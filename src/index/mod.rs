//! Exact inner-product nearest-neighbor index.
//!
//! Rows are L2-normalized at build time, so inner product equals cosine similarity.
//! The index is built once from the catalog matrix and only read afterwards; a
//! catalog change means building a new index.

mod persist;


pub use persist::{INDEX_FORMAT_VERSION, INDEX_HEADER_LEN, INDEX_MAGIC};

use std::cmp::Ordering;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::embedding::l2_normalize;
use crate::error::{RecommendError, RecommendResult};

/// One search hit: catalog position and cosine similarity in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub position: usize,
    pub score: f32,
}

/// What a saved row describes: the item id plus a BLAKE3 fingerprint of the text it
/// was encoded from. A differing fingerprint means the row is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLabel {
    pub id: String,
    pub fingerprint: [u8; 32],
}

/// Orders by score descending, then position ascending.
#[inline]
pub(crate) fn rank_order(a_score: f32, a_pos: usize, b_score: f32, b_pos: usize) -> Ordering {
    b_score.total_cmp(&a_score).then(a_pos.cmp(&b_pos))
}

#[derive(Debug, Clone, PartialEq)]
struct VectorStore {
    rows: usize,
    /// Normalized rows, row-major.
    data: Vec<f32>,
}

impl VectorStore {
    fn row(&self, position: usize, dim: usize) -> &[f32] {
        &self.data[position * dim..(position + 1) * dim]
    }
}

/// Flat exact search over normalized vectors.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    dim: usize,
    store: Option<VectorStore>,
}

impl SearchIndex {
    /// Creates an empty, unbuilt index of dimension `dim`.
    pub fn new(dim: usize) -> Self {
        Self { dim, store: None }
    }

    /// Convenience for `new` followed by `build`.
    pub fn built(dim: usize, vectors: Vec<Vec<f32>>) -> RecommendResult<Self> {
        let mut index = Self::new(dim);
        index.build(vectors)?;
        Ok(index)
    }

    /// Takes ownership of `vectors`, normalizes every row and replaces any previous contents.
    ///
    /// Zero rows stay zero and therefore score 0 against every query.
    pub fn build(&mut self, vectors: Vec<Vec<f32>>) -> RecommendResult<()> {
        let rows = vectors.len();
        let mut data = Vec::with_capacity(rows * self.dim);

        for mut row in vectors {
            if row.len() != self.dim {
                return Err(RecommendError::DimensionMismatch {
                    expected: self.dim,
                    actual: row.len(),
                });
            }
            l2_normalize(&mut row);
            data.extend_from_slice(&row);
        }

        self.store = Some(VectorStore { rows, data });
        info!(rows = rows, dim = self.dim, "Search index built");
        Ok(())
    }

    /// Returns up to `k` rows by descending cosine similarity to `vector`.
    ///
    /// Ties are broken by ascending position. `k` beyond the row count returns all rows.
    pub fn query(&self, vector: &[f32], k: usize) -> RecommendResult<Vec<Neighbor>> {
        let store = self.store.as_ref().ok_or(RecommendError::NotReady)?;

        if vector.len() != self.dim {
            return Err(RecommendError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }

        let k = k.min(store.rows);
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut query = vector.to_vec();
        l2_normalize(&mut query);

        let mut hits: Vec<Neighbor> = (0..store.rows)
            .map(|position| {
                let score = dot(&query, store.row(position, self.dim));
                Neighbor {
                    position,
                    score: score.clamp(-1.0, 1.0),
                }
            })
            .collect();

        let by_rank = |a: &Neighbor, b: &Neighbor| rank_order(a.score, a.position, b.score, b.position);

        if k < hits.len() {
            hits.select_nth_unstable_by(k - 1, by_rank);
            hits.truncate(k);
        }
        hits.sort_by(by_rank);

        debug!(
            k = k,
            rows = store.rows,
            best_score = hits.first().map(|n| n.score),
            "Index query complete"
        );

        Ok(hits)
    }

    /// Returns the stored (normalized) row at `position`.
    pub fn reconstruct(&self, position: usize) -> RecommendResult<&[f32]> {
        let store = self.store.as_ref().ok_or(RecommendError::NotReady)?;
        if position >= store.rows {
            return Err(RecommendError::not_found(position.to_string()));
        }
        Ok(store.row(position, self.dim))
    }

    /// Copies every stored row out, in position order.
    pub fn rows(&self) -> RecommendResult<Vec<Vec<f32>>> {
        let store = self.store.as_ref().ok_or(RecommendError::NotReady)?;
        Ok((0..store.rows)
            .map(|position| store.row(position, self.dim).to_vec())
            .collect())
    }

    /// Writes the vector store to `path`; `labels` describe rows by position.
    pub fn save(&self, labels: &[RowLabel], path: &Path) -> RecommendResult<()> {
        let store = self.store.as_ref().ok_or(RecommendError::NotReady)?;
        if labels.len() != store.rows {
            return Err(RecommendError::validation(
                "labels",
                format!("{} labels for {} index rows", labels.len(), store.rows),
            ));
        }
        persist::write_index(path, self.dim, store.rows, labels, &store.data)
    }

    /// Reads an index written by [`save`](Self::save), returning it with its row labels.
    pub fn load(path: &Path) -> RecommendResult<(Self, Vec<RowLabel>)> {
        let stored = persist::read_index(path)?;
        let index = Self {
            dim: stored.dim,
            store: Some(VectorStore {
                rows: stored.labels.len(),
                data: stored.vectors,
            }),
        };
        Ok((index, stored.labels))
    }

    pub fn is_built(&self) -> bool {
        self.store.is_some()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of rows (0 when unbuilt).
    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, |s| s.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub(crate) fn same_vectors(&self, other: &SearchIndex) -> bool {
        self.dim == other.dim && self.store == other.store
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
