//! # Matcher (`matcher`)
//!
//! Pairwise similarity between two normalized documents, and the weighted
//! plagiarism decision on top of it.
//!
//! ## Metrics
//!
//! | Metric        | Input           | Weight |
//! |---------------|-----------------|--------|
//! | TF-IDF cosine | token sequences | 0.3    |
//! | Semantic      | embeddings      | 0.3    |
//! | Fuzzy ratio   | joined text     | 0.2    |
//! | Levenshtein   | joined text     | 0.2    |
//!
//! Each metric lands in `[0, 1]` and is symmetric. The combined score is the
//! weighted sum; a pair is flagged when it is *strictly* above the threshold
//! (default [`DEFAULT_THRESHOLD`]).
//!
//! ## Core Types
//!
//! - [`SimilarityEngine`]: holds the embedder and computes [`SimilarityScores`]
//!   for a pair. The four metrics run concurrently on the rayon pool.
//! - [`DecisionMaker`]: applies [`MetricWeights`] and a threshold to produce a
//!   [`PlagiarismVerdict`].
//! - [`MatchError`]: embedding failures plus bad weights or thresholds.
//!
//! ## Example Usage
//!
//! ```
//! use canonical::normalize;
//! use matcher::{decide, SimilarityEngine, DEFAULT_THRESHOLD};
//!
//! let engine = SimilarityEngine::default();
//! let a = normalize("Borrowing rules keep Rust programs memory safe.");
//! let b = normalize("Rust programs stay memory safe thanks to borrowing rules.");
//!
//! let scores = engine.score(&a, &b).expect("hashing embedder never fails");
//! let verdict = decide(scores, DEFAULT_THRESHOLD);
//! assert!((0.0..=1.0).contains(&verdict.combined_similarity));
//! ```

pub mod decision;
pub mod engine;
pub mod similarity;
pub mod types;

pub use crate::decision::{
    decide, validate_threshold, DecisionMaker, MetricWeights, DEFAULT_THRESHOLD,
};
pub use crate::engine::SimilarityEngine;
pub use crate::similarity::{fuzzy_ratio, levenshtein_similarity, semantic_similarity, tfidf_cosine};
pub use crate::types::{MatchError, Metric, PlagiarismVerdict, SimilarityScores};
