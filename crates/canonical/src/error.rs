use thiserror::Error;

/// Errors that can occur while building a normalizer.
///
/// Normalizing text itself never fails: empty or degenerate input simply
/// yields an empty token sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
