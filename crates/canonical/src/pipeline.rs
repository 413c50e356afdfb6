use std::borrow::Cow;

use tracing::trace;
use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;
use crate::document::NormalizedText;
use crate::error::CanonicalError;
use crate::lemma::lemmatize;
use crate::markup::strip_markup;
use crate::stopwords::is_stop_word;
use crate::token::{is_alphanumeric_word, tokenize};
use crate::whitespace::collapse_whitespace;

/// Reusable normalizer. Build once, call [`normalize`](Self::normalize) for
/// every document; it holds no per-call state and is `Send + Sync`.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    cfg: NormalizeConfig,
}

impl Normalizer {
    pub fn new(cfg: NormalizeConfig) -> Result<Self, CanonicalError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.cfg
    }

    /// Normalize `text` in this order:
    ///
    /// 1. strip markup, one space per tag
    /// 2. NFKC
    /// 3. collapse whitespace
    /// 4. split on Unicode word boundaries
    /// 5. keep alphanumeric words, lowercased, minus stop words
    /// 6. lemmatize
    ///
    /// Never fails; empty input gives an empty result.
    pub fn normalize(&self, text: &str) -> NormalizedText {
        let cfg = &self.cfg;

        let text: Cow<str> = if cfg.strip_markup {
            strip_markup(text)
        } else {
            Cow::Borrowed(text)
        };

        // NFKC can change word boundaries, so it runs before tokenizing.
        let text: Cow<str> = if cfg.normalize_unicode {
            Cow::Owned(text.nfkc().collect::<String>())
        } else {
            text
        };

        let collapsed = collapse_whitespace(&text);

        let tokens = tokenize(&collapsed)
            .into_iter()
            .filter(|word| is_alphanumeric_word(word))
            .map(str::to_lowercase)
            .filter(|word| !(cfg.remove_stop_words && is_stop_word(word)))
            .map(|word| {
                if cfg.lemmatize {
                    lemmatize(&word).into_owned()
                } else {
                    word
                }
            });

        let normalized = NormalizedText::from_tokens(tokens);
        trace!(tokens = normalized.len(), "normalized text");
        normalized
    }
}

/// One-shot normalization with the default config.
pub fn normalize(text: &str) -> NormalizedText {
    Normalizer::default().normalize(text)
}
