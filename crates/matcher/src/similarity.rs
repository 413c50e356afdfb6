//! The four pairwise metrics as free functions.
//!
//! All of them are symmetric and land in `[0, 1]`. Iteration order is fixed
//! (sorted vocabulary, char order) so `f(a, b) == f(b, a)` bit for bit.

use std::collections::BTreeMap;

use semantic::{cosine_similarity, Embedder};

use crate::types::MatchError;

/// TF-IDF cosine over exactly two documents.
///
/// Raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1` with `n = 2`,
/// then cosine of the two weighted rows. Terms shorter than two characters
/// are not part of the vocabulary. Either side empty → 0.0.
pub fn tfidf_cosine<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut counts: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for t in a.iter().map(AsRef::as_ref).filter(|t| is_vocabulary_term(t)) {
        counts.entry(t).or_default().0 += 1;
    }
    for t in b.iter().map(AsRef::as_ref).filter(|t| is_vocabulary_term(t)) {
        counts.entry(t).or_default().1 += 1;
    }

    const N_DOCS: f64 = 2.0;
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for &(ca, cb) in counts.values() {
        let df = f64::from(u8::from(ca > 0) + u8::from(cb > 0));
        let idf = ((1.0 + N_DOCS) / (1.0 + df)).ln() + 1.0;
        let wa = f64::from(ca) * idf;
        let wb = f64::from(cb) * idf;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

fn is_vocabulary_term(term: &str) -> bool {
    term.chars().nth(1).is_some()
}

/// Character-level indel ratio `2·LCS / (|a| + |b|)`.
///
/// Both empty → 1.0 (identical); exactly one empty → 0.0.
pub fn fuzzy_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let lcs = lcs_len(&a, &b);
    (2 * lcs) as f64 / total as f64
}

/// Longest common subsequence length, two-row DP over the shorter side.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; inner.len() + 1];
    let mut cur = vec![0usize; inner.len() + 1];
    for &x in outer {
        for (j, &y) in inner.iter().enumerate() {
            cur[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[inner.len()]
}

/// `1 - lev(a, b) / max(|a|, |b|)`, lengths in chars.
///
/// Two empty strings are identical: 1.0, not a division by zero.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    let distance = strsim::levenshtein(a, b);
    1.0 - distance as f64 / longest as f64
}

/// Embedding cosine, clamped into `[0, 1]`. Embedding failures propagate.
pub fn semantic_similarity(embedder: &dyn Embedder, a: &str, b: &str) -> Result<f64, MatchError> {
    let va = embedder.embed(a)?;
    let vb = embedder.embed(b)?;
    Ok(cosine_similarity(&va, &vb)?.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use semantic::{HashingEmbedder, SemanticError};

    fn words(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    #[test]
    fn tfidf_identical_documents_score_one() {
        let doc = words("sample document machine learn");
        assert!((tfidf_cosine(&doc, &doc) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tfidf_disjoint_documents_score_zero() {
        assert_eq!(tfidf_cosine(&words("alpha beta"), &words("gamma delta")), 0.0);
    }

    #[test]
    fn tfidf_empty_side_scores_zero() {
        let empty: Vec<&str> = Vec::new();
        assert_eq!(tfidf_cosine(&empty, &words("alpha")), 0.0);
        assert_eq!(tfidf_cosine(&empty, &empty), 0.0);
    }

    #[test]
    fn tfidf_matches_reference_values() {
        let a = words("sample document machine learn artificial intelligence");
        let b = words("another document discuss machine learn technique ai");
        let score = tfidf_cosine(&a, &b);
        assert!((score - 0.304_125_741_875).abs() < 1e-9, "{score}");
        assert_eq!(score, tfidf_cosine(&b, &a));
    }

    #[test]
    fn tfidf_ignores_single_character_terms() {
        let plain = tfidf_cosine(&words("rust safe"), &words("rust fast"));
        let padded = tfidf_cosine(&words("rust safe 1 x"), &words("rust fast 2 y"));
        assert_eq!(plain, padded);
        // shared single characters do not count as overlap
        assert_eq!(tfidf_cosine(&words("a 1 alpha"), &words("a 1 beta")), 0.0);
        assert_eq!(tfidf_cosine(&words("a b c"), &words("a b c")), 0.0);
    }

    #[test]
    fn tfidf_counts_repeated_terms() {
        let once = tfidf_cosine(&words("rust safe"), &words("rust fast"));
        let repeated = tfidf_cosine(&words("rust rust rust safe"), &words("rust fast"));
        assert!(repeated > once);
    }

    #[test]
    fn fuzzy_edge_cases() {
        assert_eq!(fuzzy_ratio("", ""), 1.0);
        assert_eq!(fuzzy_ratio("abc", ""), 0.0);
        assert_eq!(fuzzy_ratio("", "abc"), 0.0);
        assert_eq!(fuzzy_ratio("same", "same"), 1.0);
    }

    #[test]
    fn fuzzy_known_values() {
        // LCS("kitten", "sitting") = 4 ("ittn")
        assert!((fuzzy_ratio("kitten", "sitting") - 8.0 / 13.0).abs() < 1e-12);
        assert_eq!(fuzzy_ratio("abcd", "wxyz"), 0.0);
    }

    #[test]
    fn fuzzy_counts_chars_not_bytes() {
        assert_eq!(fuzzy_ratio("café", "cafe"), 0.75);
    }

    #[test]
    fn levenshtein_edge_cases() {
        assert_eq!(levenshtein_similarity("", ""), 1.0);
        assert_eq!(levenshtein_similarity("abc", ""), 0.0);
        assert_eq!(levenshtein_similarity("same", "same"), 1.0);
    }

    #[test]
    fn levenshtein_known_values() {
        // lev("kitten", "sitting") = 3, longest = 7
        assert!((levenshtein_similarity("kitten", "sitting") - 4.0 / 7.0).abs() < 1e-12);
        assert!((levenshtein_similarity("naïve", "naive") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn string_metrics_are_symmetric() {
        let pairs = [
            ("sample document machine learn", "another document discuss machine learn"),
            ("abc", "cba"),
            ("", "x"),
        ];
        for (a, b) in pairs {
            assert_eq!(fuzzy_ratio(a, b), fuzzy_ratio(b, a));
            assert_eq!(levenshtein_similarity(a, b), levenshtein_similarity(b, a));
        }
    }

    #[test]
    fn semantic_is_clamped_and_symmetric() {
        let e = HashingEmbedder::default();
        let ab = semantic_similarity(&e, "machine learn", "deep learn").unwrap();
        let ba = semantic_similarity(&e, "deep learn", "machine learn").unwrap();
        assert_eq!(ab, ba);
        assert!((0.0..=1.0).contains(&ab));
        assert_eq!(semantic_similarity(&e, "", "anything").unwrap(), 0.0);
    }

    struct Failing;

    impl Embedder for Failing {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, SemanticError> {
            Err(SemanticError::Inference("model crashed".into()))
        }
        fn model_name(&self) -> &str {
            "failing"
        }
        fn dimension(&self) -> usize {
            1
        }
    }

    #[test]
    fn semantic_failure_propagates() {
        let err = semantic_similarity(&Failing, "a", "b").unwrap_err();
        assert!(matches!(err, MatchError::Semantic(SemanticError::Inference(_))));
    }
}
