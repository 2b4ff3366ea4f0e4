//! Tunable defaults and scoring weights.
//!
//! The embedding dimension is shared by the encoder, the catalog matrix and the
//! search index; every constructor that takes a `dim` checks it against the others.

/// Output dimension of `all-MiniLM-L6-v2`.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub const DEFAULT_RESULT_LIMIT: usize = 10;

pub const DEFAULT_CATEGORY_BOOST: f32 = 0.2;

/// Score assigned to every cold-start item.
pub const COLD_START_SCORE: f32 = 0.5;

pub const DOMAIN_BASE_SCORE: f32 = 0.5;
pub const DOMAIN_CLASSIFICATION_BONUS: f32 = 0.3;
pub const DOMAIN_GOAL_BONUS: f32 = 0.2;
pub const DOMAIN_TAG_BONUS: f32 = 0.1;
/// Tag count at which the tag bonus is fully earned.
pub const DOMAIN_TAG_SATURATION: usize = 5;

// Fusion weights. The first signal to contribute an item is added unweighted.
pub const CONTENT_WEIGHT: f32 = 0.3;
pub const COLLABORATIVE_WEIGHT: f32 = 0.4;
pub const DOMAIN_RULE_WEIGHT: f32 = 0.3;

pub const RELEVANCE_HIGH_THRESHOLD: f32 = 0.7;
pub const RELEVANCE_MEDIUM_THRESHOLD: f32 = 0.5;
