use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::SemanticError;

/// Which embedder [`load_embedder`](crate::load_embedder) should build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedderBackend {
    /// Deterministic feature hashing. No model files, no native runtime.
    #[default]
    Hashing,
    /// Sentence-transformer ONNX export. Needs the `onnx` feature plus the
    /// model and tokenizer files on disk.
    Onnx,
}

/// Runtime configuration describing which model/tokenizer to use.
///
/// # Example
/// ```
/// use semantic::{EmbedderBackend, SemanticConfig};
/// use std::path::PathBuf;
///
/// let cfg = SemanticConfig {
///     backend: EmbedderBackend::Onnx,
///     model_path: PathBuf::from("/opt/models/all-MiniLM-L6-v2/model.onnx"),
///     tokenizer_path: PathBuf::from("/opt/models/all-MiniLM-L6-v2/tokenizer.json"),
///     ..Default::default()
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SemanticConfig {
    pub backend: EmbedderBackend,
    /// Friendly label, logged and reported by [`Embedder::model_name`](crate::Embedder::model_name).
    pub model_name: String,
    /// Local path to the ONNX file.
    pub model_path: PathBuf,
    /// Local path to `tokenizer.json`.
    pub tokenizer_path: PathBuf,
    /// Output dimension. For the ONNX backend this must match the model
    /// (384 for MiniLM-L6).
    pub dimension: usize,
    /// Tokens beyond this are truncated before inference.
    pub max_sequence_length: usize,
}

impl SemanticConfig {
    pub fn validate(&self) -> Result<(), SemanticError> {
        if self.dimension == 0 {
            return Err(SemanticError::InvalidConfig(
                "dimension must be greater than zero".into(),
            ));
        }
        if self.max_sequence_length == 0 {
            return Err(SemanticError::InvalidConfig(
                "max_sequence_length must be greater than zero".into(),
            ));
        }
        if self.model_name.trim().is_empty() {
            return Err(SemanticError::InvalidConfig(
                "model_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            backend: EmbedderBackend::Hashing,
            model_name: "all-MiniLM-L6-v2".into(),
            model_path: PathBuf::from("./models/all-MiniLM-L6-v2/model.onnx"),
            tokenizer_path: PathBuf::from("./models/all-MiniLM-L6-v2/tokenizer.json"),
            dimension: 384,
            max_sequence_length: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = SemanticConfig::default();
        assert_eq!(cfg.backend, EmbedderBackend::Hashing);
        assert_eq!(cfg.model_name, "all-MiniLM-L6-v2");
        assert_eq!(
            cfg.model_path,
            PathBuf::from("./models/all-MiniLM-L6-v2/model.onnx")
        );
        assert_eq!(cfg.dimension, 384);
        assert_eq!(cfg.max_sequence_length, 256);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = SemanticConfig {
            backend: EmbedderBackend::Onnx,
            model_name: "test-model".into(),
            model_path: PathBuf::from("/test/model.onnx"),
            tokenizer_path: PathBuf::from("/test/tokenizer.json"),
            dimension: 768,
            max_sequence_length: 512,
        };

        let serialized = serde_json::to_string(&cfg).unwrap();
        assert!(serialized.contains("\"backend\":\"onnx\""));
        let deserialized: SemanticConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(cfg, deserialized);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: SemanticConfig = serde_json::from_str(r#"{"backend":"onnx"}"#).unwrap();
        assert_eq!(cfg.backend, EmbedderBackend::Onnx);
        assert_eq!(cfg.dimension, 384);
    }

    #[test]
    fn zero_sizes_are_invalid() {
        let zero_dim = SemanticConfig {
            dimension: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_dim.validate(),
            Err(SemanticError::InvalidConfig(_))
        ));

        let zero_len = SemanticConfig {
            max_sequence_length: 0,
            ..Default::default()
        };
        assert!(zero_len.validate().is_err());

        let unnamed = SemanticConfig {
            model_name: "  ".into(),
            ..Default::default()
        };
        assert!(unnamed.validate().is_err());
    }
}
