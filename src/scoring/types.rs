use serde::Serialize;

use crate::index::rank_order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Scoring signal that contributed to a candidate.
pub enum Signal {
    /// Vector similarity to a viewed item.
    Content,
    /// Similarity to the interaction-history profile.
    Collaborative,
    /// Static classification / goal rules.
    DomainRule,
    /// Free-text semantic search.
    Search,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Content => "content",
            Signal::Collaborative => "collaborative",
            Signal::DomainRule => "domain_rule",
            Signal::Search => "search",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Item proposed by a scorer or by fusion.
pub struct ScoredCandidate {
    /// Item id.
    pub id: String,
    /// Catalog position.
    pub position: usize,
    /// Higher is better.
    pub score: f32,
    /// Signals in the order they contributed; no duplicates.
    pub provenance: Vec<Signal>,
    /// Human-readable reason.
    pub justification: String,
}

impl ScoredCandidate {
    pub fn new(
        id: impl Into<String>,
        position: usize,
        score: f32,
        signal: Signal,
        justification: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            score,
            provenance: vec![signal],
            justification: justification.into(),
        }
    }

    /// Appends `signal` unless it is already present.
    pub fn add_signal(&mut self, signal: Signal) {
        if !self.provenance.contains(&signal) {
            self.provenance.push(signal);
        }
    }
}

/// Sorts by score descending, then catalog position ascending.
pub(crate) fn sort_by_rank(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| rank_order(a.score, a.position, b.score, b.position));
}
