use semantic::SemanticError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four similarity signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// TF-IDF cosine over the two token sequences.
    Cosine,
    /// Cosine of the two sentence embeddings, clamped to `[0, 1]`.
    Semantic,
    /// Character-level indel ratio, `2·LCS / (|a| + |b|)`.
    Fuzzy,
    /// `1 - lev(a, b) / max(|a|, |b|)` over characters.
    Levenshtein,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Cosine,
        Metric::Semantic,
        Metric::Fuzzy,
        Metric::Levenshtein,
    ];

    /// Key used in serialized verdicts.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Cosine => "cosine_similarity",
            Metric::Semantic => "semantic_similarity",
            Metric::Fuzzy => "fuzzy_similarity",
            Metric::Levenshtein => "levenshtein_similarity",
        }
    }
}

/// Per-metric scores for one document pair, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimilarityScores {
    #[serde(rename = "cosine_similarity")]
    pub cosine: f64,
    #[serde(rename = "semantic_similarity")]
    pub semantic: f64,
    #[serde(rename = "fuzzy_similarity")]
    pub fuzzy: f64,
    #[serde(rename = "levenshtein_similarity")]
    pub levenshtein: f64,
}

impl SimilarityScores {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cosine => self.cosine,
            Metric::Semantic => self.semantic,
            Metric::Fuzzy => self.fuzzy,
            Metric::Levenshtein => self.levenshtein,
        }
    }
}

/// Scores plus the weighted decision.
///
/// Serializes flat:
///
/// ```json
/// {
///   "cosine_similarity": 0.30,
///   "semantic_similarity": 0.79,
///   "fuzzy_similarity": 0.60,
///   "levenshtein_similarity": 0.40,
///   "combined_similarity": 0.53,
///   "is_plagiarized": true,
///   "plagiarism_threshold": 0.5
/// }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlagiarismVerdict {
    #[serde(flatten)]
    pub scores: SimilarityScores,
    pub combined_similarity: f64,
    pub is_plagiarized: bool,
    pub plagiarism_threshold: f64,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Embedding either side failed. Never replaced by a default score.
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),
    /// Metric weights are negative, non-finite, or do not sum to 1.
    #[error("invalid metric weights: {0}")]
    InvalidWeights(String),
    /// Threshold is NaN or infinite.
    #[error("invalid plagiarism threshold: {0}")]
    InvalidThreshold(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serializes_flat_with_all_keys() {
        let verdict = PlagiarismVerdict {
            scores: SimilarityScores {
                cosine: 0.25,
                semantic: 0.5,
                fuzzy: 0.75,
                levenshtein: 1.0,
            },
            combined_similarity: 0.55,
            is_plagiarized: true,
            plagiarism_threshold: 0.5,
        };
        let value = serde_json::to_value(verdict).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        for metric in Metric::ALL {
            assert_eq!(obj[metric.key()].as_f64().unwrap(), verdict.scores.get(metric));
        }
        assert_eq!(obj["combined_similarity"], 0.55);
        assert_eq!(obj["is_plagiarized"], true);
        assert_eq!(obj["plagiarism_threshold"], 0.5);

        let back: PlagiarismVerdict = serde_json::from_value(value).unwrap();
        assert_eq!(back, verdict);
    }

    #[test]
    fn semantic_error_converts() {
        let err: MatchError = SemanticError::Inference("boom".into()).into();
        assert!(err.to_string().contains("boom"));
    }
}
