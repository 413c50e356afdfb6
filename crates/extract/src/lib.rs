//! Plain-text extraction for the documents we compare.
//!
//! Give us a path and a declared extension, get back the document's text or a
//! typed error explaining why not.
//!
//! ## What we handle
//!
//! | Extension | How |
//! |-----------|-----|
//! | `txt`, `md` | Encoding detection (BOM, UTF-8, then `chardetng`), strict decode |
//! | `pdf` | `lopdf`, page texts concatenated in page order |
//! | `docx` | `word/document.xml` out of the zip, one line per paragraph |
//!
//! Markdown is returned verbatim; markup stripping is the normalizer's job.
//!
//! ## Failure policy
//!
//! Every failure is an [`ExtractError`]. We never hand back empty text to
//! paper over a broken file. A PDF page with no text layer is fine and just
//! contributes nothing.

mod document;
mod docx;
mod encoding;
mod error;
mod format;
mod pdf;

use std::path::Path;

use tracing::{debug, instrument};

pub use crate::document::{PlainText, RawDocument};
pub use crate::encoding::{decode_text, detect_encoding, EncodingGuess};
pub use crate::error::{ExtractError, ExtractionCause};
pub use crate::format::DocumentFormat;

/// Extract text from `path`, read as the format named by `extension`.
///
/// The extension is checked before the file is touched, so an unsupported
/// format never reports an I/O error.
#[instrument(skip_all, fields(path = %path.display(), extension = extension))]
pub fn extract(path: &Path, extension: &str) -> Result<PlainText, ExtractError> {
    let format = DocumentFormat::from_extension(extension)?;
    extract_as(path, format)
}

/// Like [`extract`], with the format inferred from the path's extension.
pub fn extract_path(path: &Path) -> Result<PlainText, ExtractError> {
    let format = DocumentFormat::from_path(path)?;
    extract_as(path, format)
}

/// Extract text from `path` as an already-parsed format.
pub fn extract_as(path: &Path, format: DocumentFormat) -> Result<PlainText, ExtractError> {
    let raw = RawDocument::read(path, format).map_err(|e| ExtractError::extraction(path, e))?;
    let text = raw
        .extract_text()
        .map_err(|e| ExtractError::extraction(path, e))?;
    debug!(%format, chars = text.as_str().chars().count(), "extracted document text");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::fixtures::docx_with_paragraphs;
    use crate::pdf::fixtures::pdf_with_pages;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn txt_file_round_trips_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "This is a sample document about machine learning.").unwrap();

        let text = extract(&path, "txt").unwrap();
        assert_eq!(
            text.as_str(),
            "This is a sample document about machine learning."
        );
    }

    #[test]
    fn unsupported_extension_wins_over_missing_file() {
        let err = extract(Path::new("/definitely/not/here.xyz"), "xyz").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_is_an_extraction_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = extract(&path, "txt").unwrap_err();
        match err {
            ExtractError::Extraction { path: p, source } => {
                assert_eq!(p, path);
                assert!(matches!(source, ExtractionCause::Io(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_utf8_is_never_silently_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        // valid UTF-8 prefix, then a truncated multi-byte sequence
        let mut bytes = "résumé ".as_bytes().to_vec();
        bytes.extend_from_slice(&[0xE2, 0x82]);
        fs::write(&path, &bytes).unwrap();

        match extract(&path, "txt") {
            Ok(text) => assert!(!text.as_str().contains('\u{FFFD}')),
            Err(ExtractError::Extraction { source, .. }) => {
                assert!(matches!(source, ExtractionCause::Decode { .. }));
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extract_path_uses_file_extension() {
        let dir = tempdir().unwrap();
        let pdf = dir.path().join("paper.PDF");
        fs::write(&pdf, pdf_with_pages(&[Some("Page one"), Some("Page two")])).unwrap();
        let docx = dir.path().join("paper.docx");
        fs::write(&docx, docx_with_paragraphs(&["One", "Two"])).unwrap();

        let pdf_text = extract_path(&pdf).unwrap();
        assert!(pdf_text.as_str().contains("Page one"));
        assert!(pdf_text.as_str().contains("Page two"));
        assert_eq!(extract_path(&docx).unwrap().as_str(), "One\nTwo");
    }

    #[test]
    fn corrupt_docx_is_an_extraction_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        fs::write(&path, b"PK\x03\x04 not really").unwrap();
        let err = extract(&path, "docx").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Extraction {
                source: ExtractionCause::Zip(_),
                ..
            }
        ));
    }

    #[test]
    fn plain_text_serializes_as_string() {
        let text = PlainText::from("hello".to_string());
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"hello\"");
    }
}
