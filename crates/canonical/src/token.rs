use unicode_segmentation::UnicodeSegmentation;

/// Split text into words on Unicode word boundaries (UAX #29).
///
/// Punctuation and whitespace segments are dropped; contractions and
/// decimals stay whole ("don't", "3.14"). Deterministic and locale-free.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

/// True when every char is alphabetic or numeric and there is at least one.
pub(crate) fn is_alphanumeric_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphanumeric)
}
