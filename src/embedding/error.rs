use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading an encoder or turning text into a vector.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// A required model file or directory is missing.
    #[error("encoder model file missing: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("could not load encoder model: {reason}")]
    ModelLoadFailed { reason: String },

    /// Forward pass or tensor conversion failed.
    #[error("encoding failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenizer error: {reason}")]
    TokenizationFailed { reason: String },

    /// Model config disagrees with the requested encoder settings.
    #[error("encoder misconfigured: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: format!("reading model files: {}", err),
        }
    }
}
