//! Free-text semantic search over a snapshot.

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::constants::{RELEVANCE_HIGH_THRESHOLD, RELEVANCE_MEDIUM_THRESHOLD};
use crate::embedding::VectorEncoder;
use crate::error::{RecommendError, RecommendResult};
use crate::filter::Filters;
use crate::knowledge::DomainKnowledge;
use crate::recommender::Snapshot;
use crate::scoring::{ScoredCandidate, Signal};

/// How a query string is turned into encoder input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryKind {
    /// Used verbatim.
    #[default]
    Search,
    /// Wrapped in remedy / treatment context.
    HealthGoal,
}

impl QueryKind {
    pub fn render(&self, query: &str) -> String {
        match self {
            QueryKind::Search => query.to_string(),
            QueryKind::HealthGoal => format!(
                "Ayurvedic remedy for {}. Natural treatment. Herbal medicine.",
                query
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    /// `High` above 0.7, `Medium` above 0.5, else `Low`.
    pub fn from_score(score: f32) -> Self {
        if score > RELEVANCE_HIGH_THRESHOLD {
            Relevance::High
        } else if score > RELEVANCE_MEDIUM_THRESHOLD {
            Relevance::Medium
        } else {
            Relevance::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One search result.
pub struct SearchHit {
    #[serde(flatten)]
    pub candidate: ScoredCandidate,
    pub relevance: Relevance,
    /// Queries that returned this item (multi-query search only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matched_queries: Vec<String>,
}

/// Semantic search front-end bound to an encoder.
#[derive(Clone)]
pub struct SemanticSearch {
    encoder: Arc<dyn VectorEncoder>,
}

impl std::fmt::Debug for SemanticSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticSearch")
            .field("dim", &self.encoder.dim())
            .finish()
    }
}

impl SemanticSearch {
    pub fn new(encoder: Arc<dyn VectorEncoder>) -> Self {
        Self { encoder }
    }

    /// Top `k` items for `query`. Inspects `2k` neighbors so filtering can still fill `k`.
    pub fn search(
        &self,
        snapshot: &Snapshot,
        query: &str,
        kind: QueryKind,
        k: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(RecommendError::validation("query", "query is empty"));
        }

        let vector = self.encoder.encode_query(&kind.render(query))?;
        let neighbors = snapshot.index().query(&vector, k.saturating_mul(2))?;

        let mut hits = Vec::with_capacity(k);
        for neighbor in neighbors {
            if hits.len() >= k {
                break;
            }
            let item = snapshot.item(neighbor.position)?;
            if !filters.matches(item) {
                continue;
            }
            hits.push(SearchHit {
                candidate: ScoredCandidate::new(
                    item.id.clone(),
                    neighbor.position,
                    neighbor.score,
                    Signal::Search,
                    format!("Matches \"{}\"", query.trim()),
                ),
                relevance: Relevance::from_score(neighbor.score),
                matched_queries: Vec::new(),
            });
        }

        debug!(query_len = query.len(), k = k, returned = hits.len(), "Search complete");
        Ok(hits)
    }

    /// Runs every query and merges hits by item: best score wins, matched queries are
    /// collected. Items matched by more queries rank first, then by score, then by id.
    pub fn multi_query_search(
        &self,
        snapshot: &Snapshot,
        queries: &[String],
        k: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<SearchHit>> {
        let mut merged: HashMap<String, SearchHit> = HashMap::new();

        for query in queries {
            for hit in self.search(snapshot, query, QueryKind::Search, k, filters)? {
                match merged.get_mut(&hit.candidate.id) {
                    Some(existing) => {
                        if hit.candidate.score > existing.candidate.score {
                            existing.candidate.score = hit.candidate.score;
                            existing.relevance = hit.relevance;
                        }
                        existing.matched_queries.push(query.clone());
                    }
                    None => {
                        let id = hit.candidate.id.clone();
                        merged.insert(
                            id,
                            SearchHit {
                                matched_queries: vec![query.clone()],
                                ..hit
                            },
                        );
                    }
                }
            }
        }

        let mut hits: Vec<SearchHit> = merged.into_values().collect();
        hits.sort_by(|a, b| {
            b.matched_queries
                .len()
                .cmp(&a.matched_queries.len())
                .then_with(|| b.candidate.score.total_cmp(&a.candidate.score))
                .then_with(|| a.candidate.id.cmp(&b.candidate.id))
        });
        hits.truncate(k);

        debug!(queries = queries.len(), returned = hits.len(), "Multi-query search complete");
        Ok(hits)
    }

    /// Search phrased around a health goal, restricted to a classification when one is given.
    pub fn domain_search(
        &self,
        snapshot: &Snapshot,
        knowledge: &dyn DomainKnowledge,
        goal: &str,
        classification: Option<&str>,
        k: usize,
    ) -> RecommendResult<Vec<SearchHit>> {
        if goal.trim().is_empty() {
            return Err(RecommendError::validation("goal", "goal is empty"));
        }

        let mut query = format!("Ayurvedic remedy for {}", goal.trim());
        let mut filters = Filters::default();

        if let Some(raw) = classification {
            let canonical = knowledge.canonical_classification(raw).ok_or_else(|| {
                RecommendError::validation(
                    "classification",
                    format!("unknown classification '{}'", raw.trim()),
                )
            })?;
            query.push_str(&format!(". suitable for {} dosha", canonical));
            filters.classification = Some(canonical.as_str().to_string());
        }

        self.search(snapshot, &query, QueryKind::Search, k, &filters)
    }
}
