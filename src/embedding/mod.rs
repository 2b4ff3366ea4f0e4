//! Vector encoders.
//!
//! The recommendation core only depends on the [`VectorEncoder`] trait.
//! - [`stub`] gives deterministic vectors without model files.
//! - [`minilm`] runs a sentence-transformers BERT model through candle.

pub mod encoder;
mod error;
/// MiniLM / BERT mean-pooling encoder.
pub mod minilm;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// Hash-seeded stub encoder.
pub mod stub;

pub use encoder::{VectorEncoder, describe_item, l2_normalize};
pub use error::EmbeddingError;
pub use minilm::{MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEncoder};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEncoder;
pub use stub::StubEncoder;
