use std::path::{Path, PathBuf};

use crate::embedding::error::EmbeddingError;

/// Token budget of `all-MiniLM-L6-v2`.
pub const MINILM_MAX_SEQ_LEN: usize = 256;

const CONFIG_FILE: &str = "config.json";
const WEIGHTS_FILE: &str = "model.safetensors";
const TOKENIZER_FILE: &str = "tokenizer.json";

#[derive(Debug, Clone)]
/// Configuration for [`MiniLmEncoder`](super::MiniLmEncoder).
pub struct MiniLmConfig {
    /// Directory containing `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Tokens kept per text; longer inputs are truncated.
    pub max_seq_len: usize,
    /// Expected output dimension (must equal the model's hidden size).
    pub embedding_dim: usize,
}

impl MiniLmConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P, embedding_dim: usize) -> Self {
        Self {
            model_dir: model_dir.into(),
            max_seq_len: MINILM_MAX_SEQ_LEN,
            embedding_dim,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.model_dir.join(CONFIG_FILE)
    }

    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join(WEIGHTS_FILE)
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(TOKENIZER_FILE)
    }

    /// Checks that the model directory holds every file the encoder needs.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be > 0".to_string(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be > 0".to_string(),
            });
        }
        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }
        for path in [
            self.config_path(),
            self.weights_path(),
            self.tokenizer_path(),
        ] {
            require_file(&path)?;
        }
        Ok(())
    }
}

fn require_file(path: &Path) -> Result<(), EmbeddingError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(EmbeddingError::ModelNotFound {
            path: path.to_path_buf(),
        })
    }
}
