use std::collections::HashSet;

use tracing::debug;

use crate::constants::COLD_START_SCORE;
use crate::error::RecommendResult;
use crate::filter::Filters;
use crate::recommender::Snapshot;

use super::types::{ScoredCandidate, Signal, sort_by_rank};

pub const HISTORY_JUSTIFICATION: &str = "Based on your browsing history";
pub const COLD_START_JUSTIFICATION: &str = "Popular product";

/// Ranks items by similarity to the mean vector of an interaction history.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryScorer;

impl HistoryScorer {
    pub fn new() -> Self {
        Self
    }

    /// Up to `n` items similar to `history`, never including a history item.
    ///
    /// Unknown ids are skipped. With nothing to work from, falls back to
    /// [`cold_start`](Self::cold_start).
    pub fn score(
        &self,
        snapshot: &Snapshot,
        history: &[String],
        n: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<ScoredCandidate>> {
        let catalog = snapshot.catalog();
        let index = snapshot.index();

        // Mean of normalized index rows, never raw encoder output.
        let mut profile = vec![0.0_f32; index.dim()];
        let mut resolved = 0usize;
        for id in history {
            let Some(position) = catalog.position_of(id) else {
                debug!(item_id = %id, "Skipping unknown history item");
                continue;
            };
            for (acc, x) in profile.iter_mut().zip(index.reconstruct(position)?) {
                *acc += x;
            }
            resolved += 1;
        }

        if resolved == 0 {
            debug!(history = history.len(), "No resolvable history, using cold start");
            return self.cold_start(snapshot, n, filters);
        }

        let scale = 1.0 / resolved as f32;
        profile.iter_mut().for_each(|x| *x *= scale);

        let seen: HashSet<&str> = history.iter().map(String::as_str).collect();
        let neighbors = index.query(&profile, n.saturating_add(history.len()))?;

        let mut candidates = Vec::with_capacity(n);
        for neighbor in neighbors {
            let item = snapshot.item(neighbor.position)?;
            if seen.contains(item.id.as_str()) || !filters.matches(item) {
                continue;
            }
            candidates.push(ScoredCandidate::new(
                item.id.clone(),
                neighbor.position,
                neighbor.score,
                Signal::Collaborative,
                HISTORY_JUSTIFICATION,
            ));
        }
        sort_by_rank(&mut candidates);
        candidates.truncate(n);

        debug!(
            history = history.len(),
            resolved = resolved,
            returned = candidates.len(),
            "History scoring complete"
        );
        Ok(candidates)
    }

    /// First `n` catalog items passing `filters`, in insertion order, each scored 0.5.
    pub fn cold_start(
        &self,
        snapshot: &Snapshot,
        n: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<ScoredCandidate>> {
        Ok(snapshot
            .catalog()
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| filters.matches(item))
            .take(n)
            .map(|(position, item)| {
                ScoredCandidate::new(
                    item.id.clone(),
                    position,
                    COLD_START_SCORE,
                    Signal::Collaborative,
                    COLD_START_JUSTIFICATION,
                )
            })
            .collect())
    }
}
