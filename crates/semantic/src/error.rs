use std::io;
use thiserror::Error;

/// Errors surfaced while loading an embedder or embedding text.
#[derive(Debug, Error)]
pub enum SemanticError {
    /// The ONNX model could not be located locally.
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    /// The tokenizer JSON is missing.
    #[error("tokenizer missing: {0}")]
    TokenizerMissing(String),
    /// Configuration is inconsistent (zero dimension, empty model name, ...).
    #[error("invalid semantic config: {0}")]
    InvalidConfig(String),
    /// Low-level IO failures while touching the filesystem.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// ONNX Runtime or tokenizer errors.
    #[error("inference failure: {0}")]
    Inference(String),
    /// Two vectors that should live in the same space do not.
    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}
