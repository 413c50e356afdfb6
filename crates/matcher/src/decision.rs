use serde::{Deserialize, Serialize};

use crate::types::{MatchError, Metric, PlagiarismVerdict, SimilarityScores};

/// Threshold used when the caller does not pick one.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Per-metric weights for the combined score.
///
/// Defaults to 0.3 cosine, 0.3 semantic, 0.2 fuzzy, 0.2 levenshtein.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricWeights {
    pub cosine: f64,
    pub semantic: f64,
    pub fuzzy: f64,
    pub levenshtein: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            cosine: 0.3,
            semantic: 0.3,
            fuzzy: 0.2,
            levenshtein: 0.2,
        }
    }
}

impl MetricWeights {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cosine => self.cosine,
            Metric::Semantic => self.semantic,
            Metric::Fuzzy => self.fuzzy,
            Metric::Levenshtein => self.levenshtein,
        }
    }

    /// Every weight finite and non-negative, and the four sum to 1.
    pub fn validate(&self) -> Result<(), MatchError> {
        for metric in Metric::ALL {
            let w = self.get(metric);
            if !w.is_finite() || w < 0.0 {
                return Err(MatchError::InvalidWeights(format!(
                    "{} weight must be a finite, non-negative number, got {w}",
                    metric.key()
                )));
            }
        }
        let sum: f64 = Metric::ALL.iter().map(|&m| self.get(m)).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MatchError::InvalidWeights(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }

    /// Weighted sum, clamped into `[0, 1]`.
    pub fn combine(&self, scores: &SimilarityScores) -> f64 {
        let combined = self.cosine * scores.cosine
            + self.semantic * scores.semantic
            + self.fuzzy * scores.fuzzy
            + self.levenshtein * scores.levenshtein;
        combined.clamp(0.0, 1.0)
    }
}

/// A finite threshold, or [`MatchError::InvalidThreshold`]. Any finite value
/// is accepted; values outside `[0, 1]` just make the verdict constant.
pub fn validate_threshold(threshold: f64) -> Result<f64, MatchError> {
    if threshold.is_finite() {
        Ok(threshold)
    } else {
        Err(MatchError::InvalidThreshold(threshold))
    }
}

/// Combines the four scores and compares against a threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionMaker {
    weights: MetricWeights,
}

impl DecisionMaker {
    pub fn new(weights: MetricWeights) -> Result<Self, MatchError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &MetricWeights {
        &self.weights
    }

    /// `is_plagiarized` is `combined > threshold`, strictly.
    pub fn decide(&self, scores: SimilarityScores, threshold: f64) -> PlagiarismVerdict {
        let combined_similarity = self.weights.combine(&scores);
        PlagiarismVerdict {
            scores,
            combined_similarity,
            is_plagiarized: combined_similarity > threshold,
            plagiarism_threshold: threshold,
        }
    }
}

/// [`DecisionMaker::decide`] with the default weights.
pub fn decide(scores: SimilarityScores, threshold: f64) -> PlagiarismVerdict {
    DecisionMaker::default().decide(scores, threshold)
}
