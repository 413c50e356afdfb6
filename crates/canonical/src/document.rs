//! Output of the normalizer.

use serde::{Deserialize, Serialize};

/// Normalized token sequence plus its space-joined string form.
///
/// Invariants:
/// - tokens keep source order
/// - no token is empty
/// - `text() == tokens().join(" ")`
///
/// Built only through [`NormalizedText::from_tokens`] (or the normalizer), so
/// the two views cannot drift apart.
///
/// ```rust
/// use canonical::{normalize, NormalizedText};
///
/// let doc = normalize("<p>Machine learning is fun</p>");
/// assert_eq!(doc.tokens(), ["machine", "learn", "fun"]);
/// assert_eq!(doc.text(), "machine learn fun");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedText {
    tokens: Vec<String>,
    text: String,
}

impl NormalizedText {
    /// Build from tokens, dropping any empty ones.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();
        let text = tokens.join(" ");
        Self { tokens, text }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The space-joined form. This is what the string metrics compare.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
