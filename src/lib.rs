//! Pairwise document plagiarism checker.
//!
//! This crate stitches the workspace together: extraction (`extract`),
//! normalization (`canonical`), embeddings (`semantic`) and scoring plus the
//! decision (`matcher`), behind a single [`Checker`].
//!
//! ```no_run
//! use std::path::Path;
//!
//! let verdict = plagcheck::compare(Path::new("essay.docx"), Path::new("source.pdf"), 0.7)?;
//! println!("{}", verdict.combined_similarity);
//! # Ok::<(), plagcheck::PipelineError>(())
//! ```
//!
//! Each side is extracted and normalized independently (concurrently, on the
//! rayon pool); the four metrics then run concurrently as well. Nothing is
//! cached between calls except the embedder held by the [`Checker`].

pub mod config;
pub mod metrics;

use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

pub use canonical::{NormalizeConfig, NormalizedText, Normalizer};
pub use extract::{DocumentFormat, ExtractError, ExtractionCause, PlainText, RawDocument};
pub use matcher::{
    DecisionMaker, MatchError, MetricWeights, PlagiarismVerdict, SimilarityEngine,
    SimilarityScores, DEFAULT_THRESHOLD,
};
pub use semantic::{load_embedder, Embedder, EmbedderBackend, SemanticConfig, SemanticError};

pub use crate::config::{ConfigLoadError, PlagcheckConfig};
pub use crate::metrics::{set_pipeline_metrics, PipelineMetrics};

use crate::metrics::MetricsSpan;

/// Errors that can occur while comparing two documents.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Unsupported extension, unreadable file or malformed document.
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// In-memory document bytes could not be parsed.
    #[error("document extraction failed: {0}")]
    Document(#[from] ExtractionCause),
    #[error("normalizer setup failed: {0}")]
    Normalize(#[from] canonical::CanonicalError),
    #[error("embedder setup failed: {0}")]
    Semantic(#[from] semantic::SemanticError),
    #[error("scoring failed: {0}")]
    Match(#[from] MatchError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigLoadError),
}

/// A configured comparison pipeline.
///
/// Building one may load an embedding model, so build it once and reuse it;
/// `&Checker` can be shared freely across threads.
#[derive(Debug)]
pub struct Checker {
    normalizer: Normalizer,
    engine: SimilarityEngine,
    decision: DecisionMaker,
    threshold: f64,
}

impl Default for Checker {
    /// Default normalizer, hashing embedder, default weights, threshold 0.7.
    fn default() -> Self {
        Self {
            normalizer: Normalizer::default(),
            engine: SimilarityEngine::default(),
            decision: DecisionMaker::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Checker {
    pub fn new(
        normalizer: Normalizer,
        engine: SimilarityEngine,
        decision: DecisionMaker,
        threshold: f64,
    ) -> Result<Self, PipelineError> {
        let threshold = matcher::validate_threshold(threshold)?;
        Ok(Self {
            normalizer,
            engine,
            decision,
            threshold,
        })
    }

    /// Build every stage from a loaded [`PlagcheckConfig`].
    pub fn from_config(cfg: &PlagcheckConfig) -> Result<Self, PipelineError> {
        cfg.validate()?;
        let normalizer = Normalizer::new(cfg.normalizer.clone())?;
        let embedder = load_embedder(&cfg.semantic)?;
        info!(
            model = embedder.model_name(),
            dimension = embedder.dimension(),
            threshold = cfg.threshold,
            "checker ready"
        );
        Self::new(
            normalizer,
            SimilarityEngine::new(embedder),
            DecisionMaker::new(cfg.weights)?,
            cfg.threshold,
        )
    }

    /// Same checker with a different default threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, PipelineError> {
        self.threshold = matcher::validate_threshold(threshold)?;
        Ok(self)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }

    /// Compare two files; each one's format comes from its extension.
    pub fn compare(&self, path_a: &Path, path_b: &Path) -> Result<PlagiarismVerdict, PipelineError> {
        info!(
            doc_a = %path_a.display(),
            doc_b = %path_b.display(),
            "comparing documents"
        );
        let (a, b) = rayon::join(|| self.prepare_path(path_a), || self.prepare_path(path_b));
        self.score_and_decide(&a?, &b?)
    }

    /// Compare two in-memory documents.
    pub fn compare_documents(
        &self,
        doc_a: &RawDocument,
        doc_b: &RawDocument,
    ) -> Result<PlagiarismVerdict, PipelineError> {
        info!(
            format_a = %doc_a.format,
            format_b = %doc_b.format,
            "comparing in-memory documents"
        );
        let (a, b) = rayon::join(|| self.prepare_raw(doc_a), || self.prepare_raw(doc_b));
        self.score_and_decide(&a?, &b?)
    }

    /// Compare two already-extracted texts. Skips extraction entirely.
    pub fn compare_texts(&self, text_a: &str, text_b: &str) -> Result<PlagiarismVerdict, PipelineError> {
        let (a, b) = rayon::join(|| self.normalize(text_a), || self.normalize(text_b));
        self.score_and_decide(&a, &b)
    }

    fn prepare_path(&self, path: &Path) -> Result<NormalizedText, PipelineError> {
        let span = MetricsSpan::start();
        let extracted = extract::extract_path(path).map_err(PipelineError::from);
        if let Some(span) = span {
            span.record_extract(extracted.as_ref().map(|_| ()));
        }
        let text = extracted?;
        debug!(path = %path.display(), chars = text.as_str().chars().count(), "extracted");
        Ok(self.normalize(text.as_str()))
    }

    fn prepare_raw(&self, doc: &RawDocument) -> Result<NormalizedText, PipelineError> {
        let span = MetricsSpan::start();
        let extracted = doc.extract_text().map_err(PipelineError::from);
        if let Some(span) = span {
            span.record_extract(extracted.as_ref().map(|_| ()));
        }
        Ok(self.normalize(extracted?.as_str()))
    }

    fn normalize(&self, text: &str) -> NormalizedText {
        let span = MetricsSpan::start();
        let normalized = self.normalizer.normalize(text);
        if let Some(span) = span {
            span.record_normalize(normalized.len());
        }
        normalized
    }

    fn score_and_decide(
        &self,
        a: &NormalizedText,
        b: &NormalizedText,
    ) -> Result<PlagiarismVerdict, PipelineError> {
        let threshold = self.threshold;
        let start = Instant::now();
        let span = MetricsSpan::start();
        let result = self
            .engine
            .score(a, b)
            .map(|scores| self.decision.decide(scores, threshold))
            .map_err(PipelineError::from);
        if let Some(span) = span {
            span.record_score(result.as_ref());
        }
        let verdict = result?;
        info!(
            combined = verdict.combined_similarity,
            threshold,
            plagiarized = verdict.is_plagiarized,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "comparison finished"
        );
        Ok(verdict)
    }
}

/// Compare two files with the default pipeline (hashing embedder, default
/// weights) and the given threshold.
pub fn compare(
    path_a: &Path,
    path_b: &Path,
    threshold: f64,
) -> Result<PlagiarismVerdict, PipelineError> {
    Checker::default().with_threshold(threshold)?.compare(path_a, path_b)
}
