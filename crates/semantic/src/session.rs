//! ONNX Runtime plumbing for [`OnnxEmbedder`](crate::OnnxEmbedder).
//!
//! The runtime environment is process-wide and built once. Each embedder owns
//! exactly one session, opened when the embedder is loaded and shared by every
//! thread that calls it.

use std::fmt::Display;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::OnceCell;
use onnxruntime::{environment::Environment, session::Session, GraphOptimizationLevel};
use tokenizers::Tokenizer;
use tracing::debug;

use crate::assets::ModelAssets;
use crate::SemanticError;

static RUNTIME: OnceCell<Environment> = OnceCell::new();

/// Owned ONNX session handle.
struct SessionHandle(Session<'static>);

// SAFETY: an OrtSession may be used from any thread; `Run` is documented as
// thread-safe by ONNX Runtime. The handle is only reached through the mutex
// in `LoadedModel`, so `&mut Session` is never aliased.
unsafe impl Send for SessionHandle {}

/// Tokenizer plus session for one model, loaded once.
pub(crate) struct LoadedModel {
    tokenizer: Tokenizer,
    session: Mutex<SessionHandle>,
}

impl LoadedModel {
    pub(crate) fn open(assets: &ModelAssets) -> Result<Self, SemanticError> {
        let tokenizer = Tokenizer::from_file(&assets.tokenizer_path)
            .map_err(|e| load_failure(&assets.tokenizer_path, e))?;

        let session = runtime()?
            .new_session_builder()
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Basic))
            .and_then(|builder| builder.with_model_from_file(assets.model_path.clone()))
            .map_err(|e| load_failure(&assets.model_path, e))?;

        debug!(model = %assets.model_path.display(), "onnx session opened");
        Ok(Self {
            tokenizer,
            session: Mutex::new(SessionHandle(session)),
        })
    }

    pub(crate) fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Exclusive access to the session for one `run`.
    pub(crate) fn session(&self) -> Result<SessionGuard<'_>, SemanticError> {
        self.session
            .lock()
            .map(SessionGuard)
            .map_err(|_| SemanticError::Inference("onnx session lock poisoned".into()))
    }
}

pub(crate) struct SessionGuard<'a>(MutexGuard<'a, SessionHandle>);

impl SessionGuard<'_> {
    pub(crate) fn get(&mut self) -> &mut Session<'static> {
        &mut self.0 .0
    }
}

fn runtime() -> Result<&'static Environment, SemanticError> {
    RUNTIME.get_or_try_init(|| {
        Environment::builder()
            .with_name("content-semantic")
            .build()
            .map_err(|e| SemanticError::Inference(format!("onnx runtime init: {e}")))
    })
}

fn load_failure(path: &Path, err: impl Display) -> SemanticError {
    SemanticError::Inference(format!("failed to load {}: {err}", path.display()))
}
