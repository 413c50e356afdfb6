//! Semantic embeddings
//!
//! This crate turns normalized text into meaning-aware vectors so two documents
//! can be compared on what they say, not just which characters they share.
//!
//! Two backends:
//!
//! - **ONNX** (`onnx` feature) - a local sentence-transformer export, by
//!   default `all-MiniLM-L6-v2`. Needs `model.onnx` + `tokenizer.json`.
//! - **Hashing** - deterministic feature hashing of words and character
//!   trigrams. No files, no native runtime, good enough for tests and for
//!   machines without a model.
//!
//! The nice thing is the fallback behavior. If the model files are missing (or
//! the crate was built without `onnx`), [`load_embedder`] logs a warning and
//! hands back the hashing embedder instead of failing the whole comparison.
//!
//! ## Threading notes
//!
//! An embedder is built once and shared as `Arc<dyn Embedder>`. The ONNX
//! backend opens its session inside [`load_embedder`]; every later call, from
//! any thread, runs on that one session.
//!
//! ## Quick example
//!
//! ```
//! use semantic::{cosine_similarity, load_embedder, SemanticConfig};
//!
//! let embedder = load_embedder(&SemanticConfig::default()).unwrap();
//! let a = embedder.embed("machine learning model").unwrap();
//! let b = embedder.embed("machine learning technique").unwrap();
//! let score = cosine_similarity(&a, &b).unwrap();
//! assert!(score > 0.0 && score < 1.0);
//! ```

pub mod config;
pub mod error;

mod assets;
mod concepts;
mod embedder;
mod hashing;
mod normalize;

#[cfg(feature = "onnx")]
mod session;
#[cfg(feature = "onnx")]
mod onnx;

use std::sync::Arc;

use tracing::{info, warn};

pub use crate::config::{EmbedderBackend, SemanticConfig};
pub use crate::embedder::Embedder;
pub use crate::error::SemanticError;
pub use crate::hashing::{HashingEmbedder, DEFAULT_DIMENSION};
pub use crate::normalize::{cosine_similarity, l2_normalize_in_place};
#[cfg(feature = "onnx")]
pub use crate::onnx::OnnxEmbedder;

use crate::assets::{resolve_model_assets, should_fallback_to_hashing};

/// Build the embedder described by `cfg`.
///
/// Missing model assets degrade to [`HashingEmbedder`] with a warning. Invalid
/// configuration and broken model files are errors.
pub fn load_embedder(cfg: &SemanticConfig) -> Result<Arc<dyn Embedder>, SemanticError> {
    cfg.validate()?;

    match cfg.backend {
        EmbedderBackend::Hashing => hashing_embedder(cfg),
        EmbedderBackend::Onnx => {
            let assets = match resolve_model_assets(cfg) {
                Ok(assets) => assets,
                Err(err) if should_fallback_to_hashing(&err) => {
                    warn!(error = %err, "model assets unavailable, falling back to hashing embedder");
                    return hashing_embedder(cfg);
                }
                Err(err) => return Err(err),
            };
            load_onnx(cfg, assets)
        }
    }
}

fn hashing_embedder(cfg: &SemanticConfig) -> Result<Arc<dyn Embedder>, SemanticError> {
    let embedder = HashingEmbedder::new(cfg.dimension)?;
    info!(dimension = cfg.dimension, "using hashing embedder");
    Ok(Arc::new(embedder))
}

#[cfg(feature = "onnx")]
fn load_onnx(
    cfg: &SemanticConfig,
    assets: assets::ModelAssets,
) -> Result<Arc<dyn Embedder>, SemanticError> {
    Ok(Arc::new(OnnxEmbedder::load(cfg, assets)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(
    cfg: &SemanticConfig,
    assets: assets::ModelAssets,
) -> Result<Arc<dyn Embedder>, SemanticError> {
    warn!(
        model = %assets.model_path.display(),
        tokenizer = %assets.tokenizer_path.display(),
        "built without the `onnx` feature, falling back to hashing embedder"
    );
    hashing_embedder(cfg)
}
