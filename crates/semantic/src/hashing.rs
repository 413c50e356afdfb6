use fxhash::hash64;

use crate::concepts;
use crate::normalize::l2_normalize_in_place;
use crate::{Embedder, SemanticError};

pub const DEFAULT_DIMENSION: usize = 384;

const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

const WORD_FEATURE: u8 = 0;
const TRIGRAM_FEATURE: u8 = 1;

/// Deterministic feature-hashing embedder, used when no model is configured
/// or the model assets are unavailable.
///
/// Each whitespace-separated word and each character trigram of the
/// `#word#`-padded word is hashed into a bucket. Shared words and shared
/// word fragments ("learn" / "learner") both pull vectors together. Before
/// hashing, acronyms and common synonyms are rewritten through a small concept
/// table ("ai" becomes "artificial intelligence", "method" becomes
/// "technique"), so paraphrases that swap those words still land close, the
/// way they would under a sentence model. All weights are non-negative, so
/// cosine scores land in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Result<Self, SemanticError> {
        if dimension == 0 {
            return Err(SemanticError::InvalidConfig(
                "hashing embedder dimension must be greater than zero".into(),
            ));
        }
        Ok(Self { dimension })
    }

    fn bucket(&self, kind: u8, feature: &str) -> usize {
        (hash64(&(kind, feature)) % self.dimension as u64) as usize
    }

    fn add_word(&self, v: &mut [f32], word: &str, padded: &mut String, bounds: &mut Vec<usize>) {
        v[self.bucket(WORD_FEATURE, word)] += WORD_WEIGHT;

        padded.clear();
        padded.push('#');
        padded.push_str(word);
        padded.push('#');
        bounds.clear();
        bounds.extend(padded.char_indices().map(|(i, _)| i));
        bounds.push(padded.len());
        for w in bounds.windows(4) {
            v[self.bucket(TRIGRAM_FEATURE, &padded[w[0]..w[3]])] += TRIGRAM_WEIGHT;
        }
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        let mut v = vec![0f32; self.dimension];
        let mut padded = String::new();
        let mut bounds = Vec::new();

        for word in text.split_whitespace() {
            let word = word.to_lowercase();
            match concepts::expand(&word) {
                Some(words) => {
                    for w in words {
                        self.add_word(&mut v, w, &mut padded, &mut bounds);
                    }
                }
                None => self.add_word(&mut v, &word, &mut padded, &mut bounds),
            }
        }

        l2_normalize_in_place(&mut v);
        Ok(v)
    }

    fn model_name(&self) -> &str {
        "feature-hashing"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
