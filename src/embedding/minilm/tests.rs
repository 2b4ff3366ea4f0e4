use super::*;
use std::fs;

#[test]
fn test_config_paths() {
    let config = MiniLmConfig::new("/models/minilm", 384);

    assert_eq!(config.max_seq_len, MINILM_MAX_SEQ_LEN);
    assert!(config.config_path().ends_with("config.json"));
    assert!(config.weights_path().ends_with("model.safetensors"));
    assert!(config.tokenizer_path().ends_with("tokenizer.json"));
}

#[test]
fn test_validate_missing_directory() {
    let config = MiniLmConfig::new("/nonexistent/minilm", 384);
    assert!(matches!(
        config.validate(),
        Err(EmbeddingError::ModelNotFound { .. })
    ));
}

#[test]
fn test_validate_missing_weights() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{}").unwrap();
    fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

    let config = MiniLmConfig::new(dir.path(), 384);
    match config.validate() {
        Err(EmbeddingError::ModelNotFound { path }) => {
            assert!(path.ends_with("model.safetensors"));
        }
        other => panic!("expected ModelNotFound, got {:?}", other),
    }
}

#[test]
fn test_validate_zero_dimension() {
    let dir = tempfile::tempdir().unwrap();
    let config = MiniLmConfig::new(dir.path(), 0);
    assert!(matches!(
        config.validate(),
        Err(EmbeddingError::InvalidConfig { .. })
    ));
}

#[test]
fn test_load_rejects_incomplete_model_dir() {
    let dir = tempfile::tempdir().unwrap();
    let result = MiniLmEncoder::load(MiniLmConfig::new(dir.path(), 384));
    assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
}

#[test]
fn test_load_rejects_unparseable_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "not json").unwrap();
    fs::write(dir.path().join("model.safetensors"), b"").unwrap();
    fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

    let result = MiniLmEncoder::load(MiniLmConfig::new(dir.path(), 384));
    assert!(matches!(result, Err(EmbeddingError::ModelLoadFailed { .. })));
}
