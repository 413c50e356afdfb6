//! Character-encoding detection for text-like documents.
//!
//! Order of evidence:
//!
//! 1. A byte-order mark decides outright.
//! 2. Bytes that already form valid UTF-8 are UTF-8 (this also covers ASCII).
//! 3. Otherwise `chardetng` guesses, and the guess is scored by how much of
//!    the input decodes without replacement characters.
//!
//! Empty input, or a guess that decodes nothing cleanly, degrades to UTF-8
//! with zero confidence. Detection never fails.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::error::ExtractionCause;

/// Best-guess encoding for a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodingGuess {
    pub encoding: &'static Encoding,
    /// Confidence in `[0, 1]`. Zero means "no signal, fell back to UTF-8".
    pub confidence: f32,
    /// Length of the byte-order mark to skip before decoding.
    pub bom_length: usize,
}

impl EncodingGuess {
    fn fallback() -> Self {
        Self {
            encoding: UTF_8,
            confidence: 0.0,
            bom_length: 0,
        }
    }

    /// WHATWG name of the guessed encoding, e.g. `"UTF-8"` or `"windows-1252"`.
    pub fn label(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn is_fallback(&self) -> bool {
        self.confidence <= 0.0
    }
}

/// Infer the encoding of `bytes`.
pub fn detect_encoding(bytes: &[u8]) -> EncodingGuess {
    if bytes.is_empty() {
        return EncodingGuess::fallback();
    }

    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        return EncodingGuess {
            encoding,
            confidence: 1.0,
            bom_length,
        };
    }

    if std::str::from_utf8(bytes).is_ok() {
        return EncodingGuess {
            encoding: UTF_8,
            confidence: 1.0,
            bom_length: 0,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let confidence = clean_decode_ratio(encoding, bytes);
    if confidence <= 0.0 {
        return EncodingGuess::fallback();
    }

    EncodingGuess {
        encoding,
        confidence,
        bom_length: 0,
    }
}

/// Decode `bytes` strictly with the guessed encoding. Malformed sequences are
/// an error, never silently replaced.
pub fn decode_text(bytes: &[u8], guess: &EncodingGuess) -> Result<String, ExtractionCause> {
    let body = bytes.get(guess.bom_length..).unwrap_or_default();
    guess
        .encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or(ExtractionCause::Decode {
            encoding: guess.encoding.name(),
        })
}

/// Share of decoded characters that are not U+FFFD.
fn clean_decode_ratio(encoding: &'static Encoding, bytes: &[u8]) -> f32 {
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let replaced = text
        .chars()
        .filter(|&c| c == char::REPLACEMENT_CHARACTER)
        .count();
    1.0 - replaced as f32 / total as f32
}
