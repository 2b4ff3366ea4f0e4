//! Independent candidate scorers.
//!
//! Each scorer reads one [`Snapshot`](crate::recommender::Snapshot) and returns at most
//! `n` [`ScoredCandidate`]s, best first, already passed through the caller's filters.
//!
//! - [`ContentScorer`]: neighbors of a viewed item, with a same-category boost.
//! - [`HistoryScorer`]: neighbors of the mean history vector; cold start when empty.
//! - [`DomainRuleScorer`]: classification / goal / tag rules, no vectors involved.

pub mod content;
pub mod domain;
pub mod history;
pub mod types;


pub use content::{CONTENT_JUSTIFICATION, ContentScorer};
pub use domain::{DomainRuleScorer, rule_score};
pub use history::{COLD_START_JUSTIFICATION, HISTORY_JUSTIFICATION, HistoryScorer};
pub use types::{ScoredCandidate, Signal};
