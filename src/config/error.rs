use std::path::PathBuf;
use thiserror::Error;

/// Rejected `VAIDYA_*` settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}='{value}' is not an integer: {source}")]
    IntParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{name}='{value}' is not a number: {source}")]
    FloatParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Parsed, but zero, negative or non-finite where that makes no sense.
    #[error("{name}='{value}' is out of range")]
    OutOfRange { name: &'static str, value: String },

    #[error("configured path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Expected a regular file (catalog JSON or saved index).
    #[error("expected a file at {path}")]
    NotAFile { path: PathBuf },

    /// Expected a directory (model directory or the index's parent).
    #[error("expected a directory at {path}")]
    NotADirectory { path: PathBuf },
}
