//! Error taxonomy shared by the catalog, index, scorers and recommender.

use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
/// Errors returned by recommendation and search operations.
pub enum RecommendError {
    /// Malformed or missing input.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Offending input field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Referenced item id is not in the loaded catalog.
    #[error("item not found: {id}")]
    NotFound {
        /// Requested item id.
        id: String,
    },

    /// Query issued before the search index was built.
    #[error("search index has not been built")]
    NotReady,

    /// Saved index failed header, checksum or archive validation.
    #[error("corrupt index file '{path}': {reason}")]
    CorruptIndex {
        /// Index file path.
        path: PathBuf,
        /// Error message.
        reason: String,
    },

    /// A loaded index does not describe the current catalog.
    #[error("index does not match catalog: {reason}")]
    IndexCatalogMismatch {
        /// Error message.
        reason: String,
    },

    /// Encoder, catalog and index disagree on the vector dimension.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// The vector encoder failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Filesystem error while saving or loading an index.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RecommendError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptIndex {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience result type for recommendation operations.
pub type RecommendResult<T> = Result<T, RecommendError>;
