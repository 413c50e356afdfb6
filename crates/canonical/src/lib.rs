//! Text normalization layer.
//!
//! Turns extracted document text into a deterministic token sequence that the
//! similarity metrics can compare. Formatting noise (tags, entities, spacing,
//! case, Unicode composition) goes away; wording stays.
//!
//! ## What we do
//!
//! - Markup stripping, one space per tag, plus entity decoding
//! - Unicode NFKC (configurable)
//! - Whitespace collapsing
//! - UAX #29 word segmentation
//! - Alphanumeric-only, lowercased, NLTK English stop words removed
//! - English lemmatization ("learning", "learned" and "learns" all become "learn")
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. Same text + same [`NormalizeConfig`] gives the
//! same [`NormalizedText`] on any machine.

mod config;
mod document;
mod error;
mod lemma;
mod markup;
mod pipeline;
mod stopwords;
mod token;
mod whitespace;

pub use crate::config::NormalizeConfig;
pub use crate::document::NormalizedText;
pub use crate::error::CanonicalError;
pub use crate::lemma::lemmatize;
pub use crate::markup::strip_markup;
pub use crate::pipeline::{normalize, Normalizer};
pub use crate::stopwords::{is_stop_word, ENGLISH_STOP_WORDS};
pub use crate::token::tokenize;
pub use crate::whitespace::collapse_whitespace;
