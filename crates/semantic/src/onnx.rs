use std::fmt;

use onnxruntime::ndarray::{Array, Array2};
use onnxruntime::session::Session;
use tokenizers::Tokenizer;
use tracing::info;

use crate::assets::ModelAssets;
use crate::normalize::l2_normalize_in_place;
use crate::session::LoadedModel;
use crate::{Embedder, SemanticConfig, SemanticError};

/// Sentence-transformer embedder backed by a local ONNX export
/// (`all-MiniLM-L6-v2` by default).
///
/// Output is the attention-masked mean of the last hidden state, L2
/// normalized. The model is opened once in [`load`](Self::load) and owned by
/// the embedder; share it behind an `Arc` and calls from any thread reuse the
/// same session.
pub struct OnnxEmbedder {
    model: LoadedModel,
    model_name: String,
    dimension: usize,
    max_sequence_length: usize,
}

impl OnnxEmbedder {
    /// Open the model and smoke-test it, so a broken export fails here rather
    /// than mid-comparison.
    pub(crate) fn load(cfg: &SemanticConfig, assets: ModelAssets) -> Result<Self, SemanticError> {
        let embedder = Self {
            model: LoadedModel::open(&assets)?,
            model_name: cfg.model_name.clone(),
            dimension: cfg.dimension,
            max_sequence_length: cfg.max_sequence_length,
        };
        embedder.embed("warm up")?;
        info!(
            model = %embedder.model_name,
            dimension = embedder.dimension,
            "onnx embedder ready"
        );
        Ok(embedder)
    }
}

impl Embedder for OnnxEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        // an empty document carries no meaning, even if the tokenizer adds specials
        if text.trim().is_empty() {
            return Ok(vec![0.0; self.dimension]);
        }
        let mut embedding = run_onnx_embedding(&self.model, text, self.max_sequence_length)?;
        if embedding.len() != self.dimension {
            return Err(SemanticError::DimensionMismatch {
                left: embedding.len(),
                right: self.dimension,
            });
        }
        l2_normalize_in_place(&mut embedding);
        Ok(embedding)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

impl fmt::Debug for OnnxEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxEmbedder")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("max_sequence_length", &self.max_sequence_length)
            .finish_non_exhaustive()
    }
}

fn run_onnx_embedding(
    model: &LoadedModel,
    text: &str,
    max_sequence_length: usize,
) -> Result<Vec<f32>, SemanticError> {
    let (ids, mask) = encode(model.tokenizer(), text, max_sequence_length)?;
    let seq_len = ids.len();
    let input_ids = Array::from_shape_vec((1, seq_len), ids)
        .map_err(|e| SemanticError::Inference(e.to_string()))?;
    let attn_mask = Array::from_shape_vec((1, seq_len), mask.clone())
        .map_err(|e| SemanticError::Inference(e.to_string()))?;
    let (flat, shape) = {
        let mut session = model.session()?;
        execute_session(session.get(), input_ids, attn_mask)?
    };
    mean_pool(&flat, &shape, &mask)
}

fn encode(
    tokenizer: &Tokenizer,
    text: &str,
    max_sequence_length: usize,
) -> Result<(Vec<i64>, Vec<i64>), SemanticError> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| SemanticError::Inference(e.to_string()))?;
    let mut ids: Vec<i64> = encoding.get_ids().iter().map(|&x| x as i64).collect();
    let mut mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&x| x as i64)
        .collect();
    if ids.len() != mask.len() {
        return Err(SemanticError::Inference(
            "tokenizer produced mismatched id/mask lengths".into(),
        ));
    }
    ids.truncate(max_sequence_length);
    mask.truncate(max_sequence_length);
    if ids.is_empty() {
        return Err(SemanticError::Inference("tokenizer produced no tokens".into()));
    }
    Ok((ids, mask))
}

fn execute_session(
    session_ref: &mut Session<'static>,
    input_ids: Array2<i64>,
    attn_mask: Array2<i64>,
) -> Result<(Vec<f32>, Vec<usize>), SemanticError> {
    let (batch, seq_len) = input_ids.dim();
    let mut runtime_inputs = Vec::with_capacity(session_ref.inputs.len());
    let mut input_ids_tensor = Some(input_ids);
    let mut attn_mask_tensor = Some(attn_mask);

    for input in &session_ref.inputs {
        match input.name.as_str() {
            "input_ids" => {
                let tensor = input_ids_tensor.take().ok_or_else(|| {
                    SemanticError::InvalidConfig(
                        "model requested `input_ids` multiple times".into(),
                    )
                })?;
                runtime_inputs.push(tensor.into_dyn());
            }
            "attention_mask" => {
                let tensor = attn_mask_tensor.take().ok_or_else(|| {
                    SemanticError::InvalidConfig(
                        "model requested `attention_mask` multiple times".into(),
                    )
                })?;
                runtime_inputs.push(tensor.into_dyn());
            }
            "token_type_ids" => {
                let tensor = Array::from_elem((batch, seq_len), 0_i64);
                runtime_inputs.push(tensor.into_dyn());
            }
            other => {
                return Err(SemanticError::Inference(format!(
                    "unsupported model input '{other}'"
                )))
            }
        }
    }

    let outputs = session_ref
        .run::<i64, f32, _>(runtime_inputs)
        .map_err(|e| SemanticError::Inference(e.to_string()))?;
    let output_tensor = outputs
        .into_iter()
        .next()
        .ok_or_else(|| SemanticError::Inference("model returned no outputs".into()))?;

    let shape = output_tensor.shape().to_vec();
    let flat: Vec<f32> = output_tensor.iter().copied().collect();
    Ok((flat, shape))
}

/// Average the token vectors whose mask is set.
///
/// `[1, seq, hidden]` is a token-level output and gets pooled; `[1, hidden]`
/// is already a sentence vector and passes through.
fn mean_pool(flat: &[f32], shape: &[usize], mask: &[i64]) -> Result<Vec<f32>, SemanticError> {
    match *shape {
        [1, hidden] if flat.len() == hidden => Ok(flat.to_vec()),
        [1, seq, hidden] if flat.len() == seq * hidden && seq == mask.len() => {
            let mut pooled = vec![0f32; hidden];
            let mut kept = 0usize;
            for (row, &m) in flat.chunks(hidden).zip(mask) {
                if m == 0 {
                    continue;
                }
                kept += 1;
                for (acc, &x) in pooled.iter_mut().zip(row) {
                    *acc += x;
                }
            }
            if kept > 0 {
                let inv = (kept as f32).recip();
                pooled.iter_mut().for_each(|x| *x *= inv);
            }
            Ok(pooled)
        }
        _ => Err(SemanticError::Inference(format!(
            "unexpected model output shape {shape:?}"
        ))),
    }
}
