//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VAIDYA_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_CATEGORY_BOOST, DEFAULT_EMBEDDING_DIM, DEFAULT_RESULT_LIMIT};

/// Recommender configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VAIDYA_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Vector dimension shared by encoder, catalog and index. Default: `384`.
    pub embedding_dim: usize,

    /// Directory holding a MiniLM model (`config.json`, `model.safetensors`,
    /// `tokenizer.json`). When unset the stub encoder is used.
    pub model_path: Option<PathBuf>,

    /// JSON file with the catalog records.
    pub catalog_path: Option<PathBuf>,

    /// Where the search index is saved to / loaded from.
    pub index_path: Option<PathBuf>,

    /// Result count used when a caller does not pass one. Default: `10`.
    pub default_limit: usize,

    /// Same-category boost for content similarity. Default: `0.2`.
    pub category_boost: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            model_path: None,
            catalog_path: None,
            index_path: None,
            default_limit: DEFAULT_RESULT_LIMIT,
            category_boost: DEFAULT_CATEGORY_BOOST,
        }
    }
}

impl Config {
    const ENV_EMBEDDING_DIM: &'static str = "VAIDYA_EMBEDDING_DIM";
    const ENV_MODEL_PATH: &'static str = "VAIDYA_MODEL_PATH";
    const ENV_CATALOG_PATH: &'static str = "VAIDYA_CATALOG_PATH";
    const ENV_INDEX_PATH: &'static str = "VAIDYA_INDEX_PATH";
    const ENV_DEFAULT_LIMIT: &'static str = "VAIDYA_DEFAULT_LIMIT";
    const ENV_CATEGORY_BOOST: &'static str = "VAIDYA_CATEGORY_BOOST";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let embedding_dim =
            Self::parse_usize_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let catalog_path = Self::parse_optional_path_from_env(Self::ENV_CATALOG_PATH);
        let index_path = Self::parse_optional_path_from_env(Self::ENV_INDEX_PATH);
        let default_limit =
            Self::parse_usize_from_env(Self::ENV_DEFAULT_LIMIT, defaults.default_limit)?;
        let category_boost =
            Self::parse_f32_from_env(Self::ENV_CATEGORY_BOOST, defaults.category_boost)?;

        Ok(Self {
            embedding_dim,
            model_path,
            catalog_path,
            index_path,
            default_limit,
            category_boost,
        })
    }

    /// Validates paths and numeric invariants (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_dim == 0 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_EMBEDDING_DIM,
                value: "0".to_string(),
            });
        }

        if self.default_limit == 0 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_DEFAULT_LIMIT,
                value: "0".to_string(),
            });
        }

        if !self.category_boost.is_finite() || self.category_boost < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_CATEGORY_BOOST,
                value: self.category_boost.to_string(),
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.catalog_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if let Some(ref path) = self.index_path {
            if path.is_dir() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if !parent.is_dir() {
                    return Err(ConfigError::NotADirectory {
                        path: parent.to_path_buf(),
                    });
                }
            }
        }

        Ok(())
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::IntParseError {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_f32_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::FloatParseError {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
