use std::sync::Arc;
use std::time::Instant;

use canonical::NormalizedText;
use semantic::{Embedder, HashingEmbedder};
use tracing::debug;

use crate::similarity::{fuzzy_ratio, levenshtein_similarity, semantic_similarity, tfidf_cosine};
use crate::types::{MatchError, SimilarityScores};


/// Scores a pair of normalized documents on all four metrics.
///
/// Holds the embedder only; everything else is stateless. Cheap to clone and
/// safe to share across threads.
#[derive(Clone)]
pub struct SimilarityEngine {
    embedder: Arc<dyn Embedder>,
}

impl SimilarityEngine {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    /// Compute all four scores for `(a, b)`.
    ///
    /// The metrics are independent, so they run on the rayon pool. Only the
    /// semantic branch can fail; its error is returned as-is.
    pub fn score(
        &self,
        a: &NormalizedText,
        b: &NormalizedText,
    ) -> Result<SimilarityScores, MatchError> {
        let start = Instant::now();

        let ((cosine, semantic), (fuzzy, levenshtein)) = rayon::join(
            || {
                rayon::join(
                    || tfidf_cosine(a.tokens(), b.tokens()),
                    || semantic_similarity(self.embedder.as_ref(), a.text(), b.text()),
                )
            },
            || {
                rayon::join(
                    || fuzzy_ratio(a.text(), b.text()),
                    || levenshtein_similarity(a.text(), b.text()),
                )
            },
        );

        let scores = SimilarityScores {
            cosine,
            semantic: semantic?,
            fuzzy,
            levenshtein,
        };

        debug!(
            model = self.embedder.model_name(),
            cosine = scores.cosine,
            semantic = scores.semantic,
            fuzzy = scores.fuzzy,
            levenshtein = scores.levenshtein,
            elapsed_us = start.elapsed().as_micros() as u64,
            "scored document pair"
        );

        Ok(scores)
    }
}

impl Default for SimilarityEngine {
    /// Uses the hashing embedder at its default dimension.
    fn default() -> Self {
        Self::new(Arc::new(HashingEmbedder::default()))
    }
}

impl std::fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("model", &self.embedder.model_name())
            .field("dimension", &self.embedder.dimension())
            .finish()
    }
}
