//! Whitespace normalization.
//!
//! Uses Unicode's definition of whitespace (space, tab, CR/LF, NBSP, and the
//! rest of the `White_Space` property), so text pulled out of PDFs and Word
//! documents with odd spacing collapses the same way as plain text.

/// Collapse whitespace runs into single ASCII spaces and trim both ends.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  hello \t\r\n  world  "), "hello world");
/// assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
