//! Configuration for the normalizer.
//!
//! # Versioning
//!
//! The `version` field pins normalization behavior. Any change to how text is
//! normalized (even a bug fix) should come with a version bump so scores from
//! different versions are never silently compared.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.strip_markup);
//! assert!(config.lemmatize);
//! ```
//!
//! Keep stop words, e.g. to compare short quotes:
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig {
//!     remove_stop_words: false,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Knobs for [`Normalizer`](crate::Normalizer).
///
/// Every step is on by default. Missing fields in a YAML/JSON document fall
/// back to the defaults:
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": true,
///   "strip_markup": true,
///   "remove_stop_words": true,
///   "lemmatize": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Behavior version. Must be >= 1; 0 is reserved and rejected with
    /// [`CanonicalError::InvalidConfig`].
    pub version: u32,

    /// Apply Unicode NFKC before tokenizing, so composed and decomposed forms
    /// ("é" vs "e" + U+0301) and compatibility characters ("ﬁ") compare equal.
    pub normalize_unicode: bool,

    /// Replace markup tags (`<p>`, `</b>`, `<!-- ... -->`) with a single space
    /// and decode the common character entities.
    pub strip_markup: bool,

    /// Drop tokens from the fixed English stop-word list.
    pub remove_stop_words: bool,

    /// Reduce each token to its English dictionary form ("studies" -> "study").
    pub lemmatize: bool,
}

impl NormalizeConfig {
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            strip_markup: true,
            remove_stop_words: true,
            lemmatize: true,
        }
    }
}
