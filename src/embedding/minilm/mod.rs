//! Sentence-transformers style BERT encoder (`all-MiniLM-L6-v2` and compatible models).
//!
//! Mean-pools the last hidden layer over all tokens and L2-normalizes the result.

mod config;

#[cfg(test)]
mod tests;

pub use config::{MINILM_MAX_SEQ_LEN, MiniLmConfig};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

use super::encoder::{VectorEncoder, l2_normalize};
use super::error::EmbeddingError;

/// BERT encoder with mean pooling.
pub struct MiniLmEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    config: MiniLmConfig,
}

impl std::fmt::Debug for MiniLmEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEncoder")
            .field("device", &format!("{:?}", self.device))
            .field("model_dir", &self.config.model_dir)
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl MiniLmEncoder {
    /// Loads weights, model config and tokenizer from `config.model_dir`.
    pub fn load(config: MiniLmConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device();
        debug!(?device, "Selected compute device for MiniLM");

        let bert_config: BertConfig =
            serde_json::from_str(&std::fs::read_to_string(config.config_path())?).map_err(
                |e| EmbeddingError::ModelLoadFailed {
                    reason: format!("Failed to parse config.json: {}", e),
                },
            )?;

        if bert_config.hidden_size != config.embedding_dim {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "model hidden_size ({}) does not match embedding_dim ({})",
                    bert_config.hidden_size, config.embedding_dim
                ),
            });
        }

        // SAFETY: the weights file is not modified while the encoder is alive.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[config.weights_path()], DType::F32, &device)?
        };

        // Sentence-transformers exports omit the `bert.` prefix; HF checkpoints keep it.
        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &bert_config)
        } else {
            BertModel::load(vb, &bert_config)
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("Failed to load BERT weights: {}", e),
        })?;

        let mut tokenizer = Tokenizer::from_file(config.tokenizer_path()).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_seq_len,
                ..Default::default()
            }))
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to configure truncation: {}", e),
            })?;

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            num_layers = bert_config.num_hidden_layers,
            "MiniLM encoder loaded"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            config,
        })
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }

    fn forward_mean_pooled(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            self.tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        debug!(
            text_len = text.len(),
            token_count = ids.len(),
            "Generating embedding (BERT forward pass)"
        );

        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        // [1, seq_len, hidden]
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let (_, seq_len, _) = hidden.dims3()?;

        let pooled = hidden
            .sum(1)?
            .affine(1.0 / seq_len as f64, 0.0)?
            .squeeze(0)?
            .to_vec1::<f32>()?;

        let mut embedding = pooled;
        l2_normalize(&mut embedding);
        Ok(embedding)
    }
}

impl VectorEncoder for MiniLmEncoder {
    fn dim(&self) -> usize {
        self.config.embedding_dim
    }

    fn encode_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.forward_mean_pooled(text)
    }
}

/// Picks Metal or CUDA when compiled in and available, otherwise the CPU.
fn select_device() -> Device {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => return device,
        Err(e) => warn!(error = %e, "Metal device unavailable"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => return device,
        Err(e) => warn!(error = %e, "CUDA device unavailable"),
    }

    if cfg!(any(feature = "metal", feature = "cuda")) {
        warn!("Falling back to CPU device");
    }
    Device::Cpu
}
