//! YAML configuration for the checker.
//!
//! One file covers every stage. Every section is optional and falls back to
//! its defaults, so an empty document (or just `version: "1.0"`) is valid.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! threshold: 0.7
//!
//! weights:
//!   cosine: 0.3
//!   semantic: 0.3
//!   fuzzy: 0.2
//!   levenshtein: 0.2
//!
//! normalizer:
//!   version: 1
//!   normalize_unicode: true
//!   strip_markup: true
//!   remove_stop_words: true
//!   lemmatize: true
//!
//! semantic:
//!   backend: "onnx"
//!   model_name: "all-MiniLM-L6-v2"
//!   model_path: "./models/all-MiniLM-L6-v2/model.onnx"
//!   tokenizer_path: "./models/all-MiniLM-L6-v2/tokenizer.json"
//!   dimension: 384
//!   max_sequence_length: 256
//! ```
//!
//! ## Environment overrides
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `PLAGCHECK_THRESHOLD` | replaces `threshold` |
//! | `PLAGCHECK_MODEL_PATH` | replaces `semantic.model_path` and selects the ONNX backend |
//! | `PLAGCHECK_TOKENIZER_PATH` | replaces `semantic.tokenizer_path` |

use std::fs;
use std::path::{Path, PathBuf};

use canonical::NormalizeConfig;
use matcher::{validate_threshold, MetricWeights, DEFAULT_THRESHOLD};
use semantic::{EmbedderBackend, SemanticConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const ENV_THRESHOLD: &str = "PLAGCHECK_THRESHOLD";
pub const ENV_MODEL_PATH: &str = "PLAGCHECK_MODEL_PATH";
pub const ENV_TOKENIZER_PATH: &str = "PLAGCHECK_TOKENIZER_PATH";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for a [`Checker`](crate::Checker).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlagcheckConfig {
    /// Configuration format version. Only `"1"` / `"1.0"` are understood.
    pub version: String,

    /// Combined similarity must be strictly above this to flag a pair.
    pub threshold: f64,

    pub weights: MetricWeights,

    pub normalizer: NormalizeConfig,

    pub semantic: SemanticConfig,
}

impl Default for PlagcheckConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            threshold: DEFAULT_THRESHOLD,
            weights: MetricWeights::default(),
            normalizer: NormalizeConfig::default(),
            semantic: SemanticConfig::default(),
        }
    }
}

impl PlagcheckConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        // serde_yaml rejects an empty document; treat it as all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: PlagcheckConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PLAGCHECK_*` environment variables on top of this config, then
    /// re-validate.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigLoadError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// [`apply_env_overrides`](Self::apply_env_overrides) with an arbitrary
    /// lookup, so callers (and tests) need not touch the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_THRESHOLD) {
            self.threshold = raw.trim().parse().map_err(|_| {
                ConfigLoadError::Validation(format!("{ENV_THRESHOLD} is not a number: {raw:?}"))
            })?;
            debug!(threshold = self.threshold, "threshold overridden from environment");
        }
        if let Some(path) = lookup(ENV_MODEL_PATH) {
            self.semantic.model_path = PathBuf::from(path);
            self.semantic.backend = EmbedderBackend::Onnx;
        }
        if let Some(path) = lookup(ENV_TOKENIZER_PATH) {
            self.semantic.tokenizer_path = PathBuf::from(path);
        }
        self.validate()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        validate_threshold(self.threshold).map_err(validation)?;
        self.weights.validate().map_err(validation)?;
        self.normalizer.validate().map_err(validation)?;
        self.semantic.validate().map_err(validation)?;

        Ok(())
    }
}

fn validation(err: impl std::fmt::Display) -> ConfigLoadError {
    ConfigLoadError::Validation(err.to_string())
}
