//! Hybrid fusion of the content, history and domain-rule scorers.
//!
//! Scorers run in a fixed order (content, history, domain rule). The reducer keys
//! candidates by item id:
//!
//! - the first scorer to propose an item sets its raw score, provenance and justification;
//! - every later scorer adds `weight * score` for its signal and appends its provenance.
//!
//! Final scores therefore depend on invocation order. The policy is kept as-is for
//! compatibility with existing rankings.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::constants::{COLLABORATIVE_WEIGHT, CONTENT_WEIGHT, DOMAIN_RULE_WEIGHT};
use crate::error::RecommendResult;
use crate::filter::Filters;
use crate::recommender::Snapshot;
use crate::scoring::{ContentScorer, DomainRuleScorer, HistoryScorer, ScoredCandidate, Signal};

/// Signals available for one hybrid request. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HybridRequest {
    /// Item currently being viewed.
    #[serde(alias = "product_id")]
    pub current_item: Option<String>,
    /// Interaction history, most relevant first.
    #[serde(alias = "user_history")]
    pub history: Vec<String>,
    /// Declared classification (dosha).
    #[serde(alias = "dosha_type")]
    pub classification: Option<String>,
    /// Optional health goal, only used with a classification.
    #[serde(alias = "health_goal")]
    pub goal: Option<String>,
}

impl HybridRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current_item(mut self, id: impl Into<String>) -> Self {
        self.current_item = Some(id.into());
        self
    }

    pub fn with_history<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// `true` when at least one scorer would run.
    pub fn has_signals(&self) -> bool {
        self.current_item.is_some() || !self.history.is_empty() || self.classification.is_some()
    }
}

/// Weights applied when a signal contributes to an item another scorer proposed first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalWeights {
    pub content: f32,
    pub collaborative: f32,
    pub domain_rule: f32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            content: CONTENT_WEIGHT,
            collaborative: COLLABORATIVE_WEIGHT,
            domain_rule: DOMAIN_RULE_WEIGHT,
        }
    }
}

impl SignalWeights {
    pub fn for_signal(&self, signal: Signal) -> f32 {
        match signal {
            Signal::Content => self.content,
            Signal::Collaborative => self.collaborative,
            Signal::DomainRule => self.domain_rule,
            Signal::Search => 0.0,
        }
    }
}

/// Order-sensitive accumulator keyed by item id.
#[derive(Debug, Default)]
pub struct FusionReducer {
    weights: SignalWeights,
    candidates: HashMap<String, ScoredCandidate>,
}

impl FusionReducer {
    pub fn new(weights: SignalWeights) -> Self {
        Self {
            weights,
            candidates: HashMap::new(),
        }
    }

    /// Folds one scorer's output into the running totals.
    pub fn absorb(&mut self, signal: Signal, scored: Vec<ScoredCandidate>) {
        let weight = self.weights.for_signal(signal);
        for candidate in scored {
            match self.candidates.get_mut(&candidate.id) {
                Some(existing) => {
                    existing.score += weight * candidate.score;
                    existing.add_signal(signal);
                }
                None => {
                    self.candidates.insert(candidate.id.clone(), candidate);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Best `n` by total score, ties by item id ascending.
    pub fn finish(self, n: usize) -> Vec<ScoredCandidate> {
        let mut fused: Vec<ScoredCandidate> = self.candidates.into_values().collect();
        fused.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        fused.truncate(n);
        fused
    }
}

/// Runs the scorers for a [`HybridRequest`] and fuses their output.
#[derive(Debug, Clone)]
pub struct FusionEngine {
    content: ContentScorer,
    history: HistoryScorer,
    domain: DomainRuleScorer,
    weights: SignalWeights,
}

impl FusionEngine {
    pub fn new(content: ContentScorer, history: HistoryScorer, domain: DomainRuleScorer) -> Self {
        Self {
            content,
            history,
            domain,
            weights: SignalWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: SignalWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Fused top `n`. A request without signals yields an empty list; a failing scorer
    /// is logged and skipped.
    pub fn fuse(
        &self,
        snapshot: &Snapshot,
        request: &HybridRequest,
        n: usize,
        filters: &Filters,
    ) -> Vec<ScoredCandidate> {
        if !request.has_signals() {
            debug!("Hybrid request carries no signals");
            return Vec::new();
        }

        let mut reducer = FusionReducer::new(self.weights);

        if let Some(current) = &request.current_item {
            let scored = self.content.score(snapshot, current, n, filters);
            absorb_or_warn(&mut reducer, Signal::Content, scored);
        }

        if !request.history.is_empty() {
            let scored = self.history.score(snapshot, &request.history, n, filters);
            absorb_or_warn(&mut reducer, Signal::Collaborative, scored);
        }

        if let Some(classification) = &request.classification {
            let scored = self.domain.score(
                snapshot,
                classification,
                request.goal.as_deref(),
                n,
                filters,
            );
            absorb_or_warn(&mut reducer, Signal::DomainRule, scored);
        }

        let pooled = reducer.len();
        let fused = reducer.finish(n);
        debug!(pooled = pooled, returned = fused.len(), "Hybrid fusion complete");
        fused
    }
}

fn absorb_or_warn(
    reducer: &mut FusionReducer,
    signal: Signal,
    scored: RecommendResult<Vec<ScoredCandidate>>,
) {
    match scored {
        Ok(candidates) => reducer.absorb(signal, candidates),
        Err(e) => warn!(signal = %signal, error = %e, "Scorer failed, skipping signal"),
    }
}
