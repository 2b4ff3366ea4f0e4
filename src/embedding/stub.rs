//! Deterministic, model-free encoder.

use tracing::debug;

use super::encoder::{VectorEncoder, l2_normalize};
use super::error::EmbeddingError;

/// Produces unit vectors seeded from a BLAKE3 hash of the text.
///
/// Equal texts map to equal vectors across processes, so stub-built indexes can be
/// saved and reloaded. Similarity between different texts is meaningless.
#[derive(Debug, Clone)]
pub struct StubEncoder {
    dim: usize,
}

impl StubEncoder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn seed(text: &str) -> u64 {
        let hash = blake3::hash(text.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[0..8]);
        u64::from_le_bytes(bytes)
    }
}

impl VectorEncoder for StubEncoder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn encode_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let mut state = Self::seed(text);
        let mut embedding = Vec::with_capacity(self.dim);

        for _ in 0..self.dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        l2_normalize(&mut embedding);
        Ok(embedding)
    }
}
