//! Process-wide recommendation state with an explicit lifecycle.
//!
//! A [`Recommender`] starts empty. [`reload`](Recommender::reload) encodes a catalog and
//! builds its index; [`restore`](Recommender::restore) and
//! [`load_index`](Recommender::load_index) reuse a saved index. Each of these builds a
//! complete [`Snapshot`] first and then swaps it in under one write lock, so queries see
//! either the old generation or the new one, never a mix.

mod snapshot;


pub use snapshot::Snapshot;

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{info, instrument};

use crate::catalog::{CatalogIndex, Item, ItemRecord};
use crate::config::Config;
use crate::embedding::VectorEncoder;
use crate::error::{RecommendError, RecommendResult};
use crate::filter::Filters;
use crate::fusion::{FusionEngine, HybridRequest};
use crate::index::{RowLabel, SearchIndex};
use crate::knowledge::DomainKnowledge;
use crate::scoring::{ContentScorer, DomainRuleScorer, HistoryScorer, ScoredCandidate, Signal};
use crate::search::{QueryKind, SearchHit, SemanticSearch};

/// Candidate joined with the item fields a client displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub domain_attribute: Option<String>,
    pub score: f32,
    pub provenance: Vec<Signal>,
    pub justification: String,
}

impl Recommendation {
    pub fn new(item: &Item, candidate: ScoredCandidate) -> Self {
        Self {
            id: candidate.id,
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price,
            domain_attribute: item.domain_attribute.clone(),
            score: candidate.score,
            provenance: candidate.provenance,
            justification: candidate.justification,
        }
    }
}

/// Entry point for every recommendation and search operation.
pub struct Recommender {
    encoder: Arc<dyn VectorEncoder>,
    knowledge: Arc<dyn DomainKnowledge>,
    dim: usize,
    default_limit: usize,
    content: ContentScorer,
    history: HistoryScorer,
    domain: DomainRuleScorer,
    fusion: FusionEngine,
    search: SemanticSearch,
    state: RwLock<Option<Arc<Snapshot>>>,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("dim", &self.dim)
            .field("default_limit", &self.default_limit)
            .field("items", &self.state.read().as_ref().map(|s| s.catalog().len()))
            .finish()
    }
}

impl Recommender {
    /// Creates an empty recommender. Fails when the encoder's dimension differs from
    /// `config.embedding_dim`.
    pub fn new(
        encoder: Arc<dyn VectorEncoder>,
        knowledge: Arc<dyn DomainKnowledge>,
        config: &Config,
    ) -> RecommendResult<Self> {
        if encoder.dim() != config.embedding_dim {
            return Err(RecommendError::DimensionMismatch {
                expected: config.embedding_dim,
                actual: encoder.dim(),
            });
        }

        let content = ContentScorer::new(config.category_boost);
        let history = HistoryScorer::new();
        let domain = DomainRuleScorer::new(Arc::clone(&knowledge));

        Ok(Self {
            fusion: FusionEngine::new(content, history, domain.clone()),
            search: SemanticSearch::new(Arc::clone(&encoder)),
            encoder,
            knowledge,
            dim: config.embedding_dim,
            default_limit: config.default_limit,
            content,
            history,
            domain,
            state: RwLock::new(None),
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn knowledge(&self) -> &dyn DomainKnowledge {
        self.knowledge.as_ref()
    }

    /// Current snapshot, or `NotReady` before the first load.
    pub fn snapshot(&self) -> RecommendResult<Arc<Snapshot>> {
        self.state.read().clone().ok_or(RecommendError::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.state.read().is_some()
    }

    fn install(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        *self.state.write() = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Encodes `records`, builds a new index and swaps both in.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn reload(&self, records: Vec<ItemRecord>) -> RecommendResult<Arc<Snapshot>> {
        let catalog = CatalogIndex::load(records, self.encoder.as_ref(), self.dim)?;
        let snapshot = self.install(Snapshot::build(catalog)?);
        info!(items = snapshot.catalog().len(), "Catalog snapshot installed");
        Ok(snapshot)
    }

    /// [`reload`](Self::reload) on tokio's blocking pool.
    pub async fn reload_blocking(
        self: &Arc<Self>,
        records: Vec<ItemRecord>,
    ) -> RecommendResult<Arc<Snapshot>> {
        let this = Arc::clone(self);
        match tokio::task::spawn_blocking(move || this.reload(records)).await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            // Runtime shutting down; the previous snapshot (if any) stays installed.
            Err(_) => Err(RecommendError::NotReady),
        }
    }

    /// Similar items to `item_id`.
    #[instrument(skip(self, filters), fields(item_id = %item_id))]
    pub fn content_based(
        &self,
        item_id: &str,
        n: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<ScoredCandidate>> {
        let snapshot = self.snapshot()?;
        self.content.score(&snapshot, item_id, n, filters)
    }

    /// Items similar to an interaction history; cold start when it is empty.
    #[instrument(skip(self, history, filters), fields(history = history.len()))]
    pub fn user_based(
        &self,
        history: &[String],
        n: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<ScoredCandidate>> {
        let snapshot = self.snapshot()?;
        self.history.score(&snapshot, history, n, filters)
    }

    /// Classification and goal rules.
    #[instrument(skip(self, filters))]
    pub fn domain_based(
        &self,
        classification: &str,
        goal: Option<&str>,
        n: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<ScoredCandidate>> {
        let snapshot = self.snapshot()?;
        self.domain.score(&snapshot, classification, goal, n, filters)
    }

    /// Fused recommendations from whatever signals `request` carries.
    #[instrument(skip(self, request, filters), fields(signals = request.has_signals()))]
    pub fn hybrid(
        &self,
        request: &HybridRequest,
        n: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<ScoredCandidate>> {
        let snapshot = self.snapshot()?;
        Ok(self.fusion.fuse(&snapshot, request, n, filters))
    }

    #[instrument(skip(self, query, filters), fields(query_len = query.len()))]
    pub fn search(
        &self,
        query: &str,
        kind: QueryKind,
        k: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<SearchHit>> {
        let snapshot = self.snapshot()?;
        self.search.search(&snapshot, query, kind, k, filters)
    }

    #[instrument(skip(self, queries, filters), fields(queries = queries.len()))]
    pub fn multi_query_search(
        &self,
        queries: &[String],
        k: usize,
        filters: &Filters,
    ) -> RecommendResult<Vec<SearchHit>> {
        let snapshot = self.snapshot()?;
        self.search.multi_query_search(&snapshot, queries, k, filters)
    }

    #[instrument(skip(self))]
    pub fn domain_search(
        &self,
        goal: &str,
        classification: Option<&str>,
        k: usize,
    ) -> RecommendResult<Vec<SearchHit>> {
        let snapshot = self.snapshot()?;
        self.search
            .domain_search(&snapshot, self.knowledge.as_ref(), goal, classification, k)
    }

    /// Joins candidates with their items from the current snapshot.
    pub fn describe(&self, candidates: Vec<ScoredCandidate>) -> RecommendResult<Vec<Recommendation>> {
        let snapshot = self.snapshot()?;
        candidates
            .into_iter()
            .map(|candidate| {
                let item = snapshot.catalog().lookup_by_id(&candidate.id)?;
                Ok(Recommendation::new(item, candidate))
            })
            .collect()
    }

    /// Saves the current index, labelled with each row's id and content fingerprint.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn save_index(&self, path: &Path) -> RecommendResult<()> {
        let snapshot = self.snapshot()?;
        snapshot.index().save(&snapshot.catalog().row_labels(), path)
    }

    /// Replaces the current index with a saved one describing the same catalog.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_index(&self, path: &Path) -> RecommendResult<Arc<Snapshot>> {
        let current = self.snapshot()?;
        let (index, labels) = self.read_index(path)?;
        let snapshot =
            self.install(Snapshot::with_index(current.catalog().clone(), index, &labels)?);
        info!(items = snapshot.catalog().len(), "Saved index installed");
        Ok(snapshot)
    }

    /// Builds a snapshot from `records` and a saved index without re-encoding.
    ///
    /// Fails with `IndexCatalogMismatch` when any record was added, removed, reordered
    /// or edited since the index was saved.
    #[instrument(skip(self, records), fields(records = records.len(), path = %path.display()))]
    pub fn restore(&self, records: Vec<ItemRecord>, path: &Path) -> RecommendResult<Arc<Snapshot>> {
        let items = records
            .into_iter()
            .map(Item::try_from)
            .collect::<RecommendResult<Vec<_>>>()?;
        let (index, labels) = self.read_index(path)?;

        let snapshot = self.install(Snapshot::from_saved(items, index, &labels)?);
        info!(items = snapshot.catalog().len(), "Catalog restored from saved index");
        Ok(snapshot)
    }

    fn read_index(&self, path: &Path) -> RecommendResult<(SearchIndex, Vec<RowLabel>)> {
        let (index, labels) = SearchIndex::load(path)?;
        if index.dim() != self.dim {
            return Err(RecommendError::DimensionMismatch {
                expected: self.dim,
                actual: index.dim(),
            });
        }
        Ok((index, labels))
    }
}
