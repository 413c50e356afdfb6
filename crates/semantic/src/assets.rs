use std::path::{Path, PathBuf};

use crate::{SemanticConfig, SemanticError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ModelAssets {
    pub(crate) model_path: PathBuf,
    pub(crate) tokenizer_path: PathBuf,
}

/// Missing files are recoverable (fall back to hashing); anything else is not.
pub(crate) fn should_fallback_to_hashing(err: &SemanticError) -> bool {
    matches!(
        err,
        SemanticError::ModelNotFound(_) | SemanticError::TokenizerMissing(_)
    )
}

/// Ensures that the model and tokenizer exist locally.
pub(crate) fn resolve_model_assets(cfg: &SemanticConfig) -> Result<ModelAssets, SemanticError> {
    let model_path = ensure_local_file(&cfg.model_path, || {
        SemanticError::ModelNotFound(cfg.model_path.display().to_string())
    })?;
    let tokenizer_path = ensure_local_file(&cfg.tokenizer_path, || {
        SemanticError::TokenizerMissing(cfg.tokenizer_path.display().to_string())
    })?;

    Ok(ModelAssets {
        model_path,
        tokenizer_path,
    })
}

fn ensure_local_file<F>(target: &Path, on_missing: F) -> Result<PathBuf, SemanticError>
where
    F: FnOnce() -> SemanticError,
{
    if target.is_file() {
        return Ok(target.to_path_buf());
    }
    Err(on_missing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_model_is_recoverable() {
        let cfg = SemanticConfig {
            model_path: PathBuf::from("/nope/model.onnx"),
            ..Default::default()
        };
        let err = resolve_model_assets(&cfg).unwrap_err();
        assert!(matches!(err, SemanticError::ModelNotFound(_)));
        assert!(should_fallback_to_hashing(&err));
    }

    #[test]
    fn missing_tokenizer_is_reported_after_model() {
        let dir = tempdir().unwrap();
        let model = dir.path().join("model.onnx");
        fs::write(&model, b"onnx").unwrap();
        let cfg = SemanticConfig {
            model_path: model,
            tokenizer_path: dir.path().join("tokenizer.json"),
            ..Default::default()
        };
        let err = resolve_model_assets(&cfg).unwrap_err();
        assert!(matches!(err, SemanticError::TokenizerMissing(_)));
    }

    #[test]
    fn present_assets_resolve() {
        let dir = tempdir().unwrap();
        let model = dir.path().join("model.onnx");
        let tokenizer = dir.path().join("tokenizer.json");
        fs::write(&model, b"onnx").unwrap();
        fs::write(&tokenizer, b"{}").unwrap();
        let cfg = SemanticConfig {
            model_path: model.clone(),
            tokenizer_path: tokenizer.clone(),
            ..Default::default()
        };
        let assets = resolve_model_assets(&cfg).unwrap();
        assert_eq!(assets.model_path, model);
        assert_eq!(assets.tokenizer_path, tokenizer);
    }

    #[test]
    fn inference_errors_do_not_fall_back() {
        assert!(!should_fallback_to_hashing(&SemanticError::Inference(
            "boom".into()
        )));
    }
}
