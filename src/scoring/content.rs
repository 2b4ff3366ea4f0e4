use tracing::debug;

use crate::constants::DEFAULT_CATEGORY_BOOST;
use crate::error::{RecommendError, RecommendResult};
use crate::filter::Filters;
use crate::recommender::Snapshot;

use super::types::{ScoredCandidate, Signal, sort_by_rank};

pub const CONTENT_JUSTIFICATION: &str = "Similar to your viewed product";

/// Ranks items by vector similarity to a source item, boosting same-category items.
#[derive(Debug, Clone, Copy)]
pub struct ContentScorer {
    category_boost: f32,
}

impl Default for ContentScorer {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY_BOOST)
    }
}

impl ContentScorer {
    pub fn new(category_boost: f32) -> Self {
        Self { category_boost }
    }

    pub fn category_boost(&self) -> f32 {
        self.category_boost
    }

    /// Up to `n` items similar to `source_id`, never including the source itself.
    pub fn score(
        &self,
        snapshot: &Snapshot,
        source_id: &str,
        n: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<ScoredCandidate>> {
        let catalog = snapshot.catalog();
        let source_position = catalog
            .position_of(source_id)
            .ok_or_else(|| RecommendError::not_found(source_id))?;
        let source = snapshot.item(source_position)?;

        if n == 0 {
            return Ok(Vec::new());
        }

        let source_vector = snapshot.index().reconstruct(source_position)?;
        let neighbors = snapshot
            .index()
            .query(source_vector, n.saturating_mul(2))?;

        let mut candidates = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            if neighbor.position == source_position {
                continue;
            }
            let item = snapshot.item(neighbor.position)?;
            if !filters.matches(item) {
                continue;
            }
            let score = if source.shares_category(item) {
                neighbor.score + self.category_boost
            } else {
                neighbor.score
            };
            candidates.push(ScoredCandidate::new(
                item.id.clone(),
                neighbor.position,
                score,
                Signal::Content,
                CONTENT_JUSTIFICATION,
            ));
        }
        sort_by_rank(&mut candidates);
        candidates.truncate(n);

        debug!(
            item_id = %source_id,
            returned = candidates.len(),
            "Content scoring complete"
        );
        Ok(candidates)
    }
}
