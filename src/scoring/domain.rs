use std::sync::Arc;

use tracing::debug;

use crate::catalog::Item;
use crate::constants::{
    DOMAIN_BASE_SCORE, DOMAIN_CLASSIFICATION_BONUS, DOMAIN_GOAL_BONUS, DOMAIN_TAG_BONUS,
    DOMAIN_TAG_SATURATION,
};
use crate::error::{RecommendError, RecommendResult};
use crate::filter::{Filters, contains_ignore_case};
use crate::knowledge::{Classification, DomainKnowledge};
use crate::recommender::Snapshot;

use super::types::{ScoredCandidate, Signal, sort_by_rank};

/// Rule-based scorer over declared classification, benefits and tag count.
#[derive(Clone)]
pub struct DomainRuleScorer {
    knowledge: Arc<dyn DomainKnowledge>,
}

impl std::fmt::Debug for DomainRuleScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainRuleScorer").finish_non_exhaustive()
    }
}

impl DomainRuleScorer {
    pub fn new(knowledge: Arc<dyn DomainKnowledge>) -> Self {
        Self { knowledge }
    }

    /// Resolves a raw classification name, or fails with `Validation`.
    pub fn resolve_classification(&self, raw: &str) -> RecommendResult<Classification> {
        self.knowledge.canonical_classification(raw).ok_or_else(|| {
            RecommendError::validation(
                "classification",
                format!("unknown classification '{}'", raw.trim()),
            )
        })
    }

    /// Items scoring above the base score, best first, at most `n`.
    pub fn score(
        &self,
        snapshot: &Snapshot,
        classification: &str,
        goal: Option<&str>,
        n: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<ScoredCandidate>> {
        let classification = self.resolve_classification(classification)?;
        let goal = goal.map(str::trim).filter(|g| !g.is_empty());

        let mut candidates: Vec<ScoredCandidate> = snapshot
            .catalog()
            .items()
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let score = rule_score(item, classification, goal);
                (score > DOMAIN_BASE_SCORE && filters.matches(item)).then(|| {
                    ScoredCandidate::new(
                        item.id.clone(),
                        position,
                        score,
                        Signal::DomainRule,
                        self.justification(item, classification),
                    )
                })
            })
            .collect();

        sort_by_rank(&mut candidates);
        candidates.truncate(n);

        debug!(
            classification = %classification,
            goal = ?goal,
            returned = candidates.len(),
            "Domain-rule scoring complete"
        );
        Ok(candidates)
    }

    fn justification(&self, item: &Item, classification: Classification) -> String {
        let label = self.knowledge.item_compatibility(&item.tags, classification);
        if label.is_neutral() {
            format!("Recommended for {} dosha", classification)
        } else {
            format!("Recommended for {} dosha ({})", classification, label)
        }
    }
}

/// Base 0.5, +0.3 classification match, +0.2 goal match, up to +0.1 for tags.
pub fn rule_score(item: &Item, classification: Classification, goal: Option<&str>) -> f32 {
    let mut score = DOMAIN_BASE_SCORE;

    if item
        .domain_attribute
        .as_deref()
        .is_some_and(|attr| contains_ignore_case(attr, classification.as_str()))
    {
        score += DOMAIN_CLASSIFICATION_BONUS;
    }

    if let Some(goal) = goal
        && item.benefits.iter().any(|b| contains_ignore_case(b, goal))
    {
        score += DOMAIN_GOAL_BONUS;
    }

    let tag_ratio = (item.tags.len() as f32 / DOMAIN_TAG_SATURATION as f32).min(1.0);
    score + DOMAIN_TAG_BONUS * tag_ratio
}
