//! Vaidya library crate (used by the CLI binary and integration tests).
//!
//! Hybrid recommendation and semantic search over an Ayurvedic product catalog.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Recommender`], [`Snapshot`] - Lifecycle and entry points
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`RecommendError`] - Error taxonomy
//!
//! ## Catalog & Index
//! - [`CatalogIndex`], [`Item`], [`ItemRecord`] - Items and their vectors
//! - [`SearchIndex`], [`Neighbor`] - Exact inner-product search, save/load
//!
//! ## Scoring
//! - [`ContentScorer`], [`HistoryScorer`], [`DomainRuleScorer`] - Independent signals
//! - [`FusionEngine`], [`HybridRequest`] - Order-sensitive fusion
//! - [`SemanticSearch`], [`QueryKind`] - Free-text search
//! - [`Filters`] - Result filters
//!
//! ## Encoders & Knowledge
//! - [`VectorEncoder`], [`StubEncoder`], [`MiniLmEncoder`] - Text to vectors
//! - [`DomainKnowledge`], [`StaticKnowledge`] - Classification and ingredient tables
//!
//! ## Test/Mock Support
//! [`MockEncoder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod error;
pub mod filter;
pub mod fusion;
pub mod index;
pub mod knowledge;
pub mod recommender;
pub mod scoring;
pub mod search;

pub use catalog::{CatalogIndex, Item, ItemRecord, RawItemId, StockInfo, parse_records, read_records};
pub use config::{Config, ConfigError};
pub use embedding::{
    EmbeddingError, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEncoder, StubEncoder, VectorEncoder,
    describe_item,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEncoder;
pub use error::{RecommendError, RecommendResult};
pub use filter::Filters;
pub use fusion::{FusionEngine, FusionReducer, HybridRequest, SignalWeights};
pub use index::{Neighbor, RowLabel, SearchIndex};
pub use knowledge::{
    Classification, ClassificationProfile, CompatibilityLabel, DomainKnowledge, GoalProfile,
    IngredientCompatibility, StaticKnowledge,
};
pub use recommender::{Recommendation, Recommender, Snapshot};
pub use scoring::{ContentScorer, DomainRuleScorer, HistoryScorer, ScoredCandidate, Signal};
pub use search::{QueryKind, Relevance, SearchHit, SemanticSearch};
