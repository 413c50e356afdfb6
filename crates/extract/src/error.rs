//! Error types produced by the extract crate.
//!
//! Two layers:
//!
//! | Error | When |
//! |-------|------|
//! | [`UnsupportedFormat`](ExtractError::UnsupportedFormat) | The extension is not one of `txt`, `md`, `pdf`, `docx` |
//! | [`Extraction`](ExtractError::Extraction) | Reading or parsing the file failed; carries the path and an [`ExtractionCause`] |
//!
//! Format-level failures never turn into empty text. The only text-less
//! success is a PDF page that simply has nothing to extract.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`extract`](crate::extract) and friends.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The declared extension has no extractor.
    #[error("unsupported document format: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// The file could not be read or parsed.
    #[error("failed to extract text from {}: {source}", path.display())]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractionCause,
    },
}

impl ExtractError {
    pub(crate) fn unsupported(extension: impl Into<String>) -> Self {
        ExtractError::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    pub(crate) fn extraction(path: impl Into<PathBuf>, source: impl Into<ExtractionCause>) -> Self {
        ExtractError::Extraction {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Underlying reason an extraction failed.
#[derive(Debug, Error)]
pub enum ExtractionCause {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The bytes are malformed for the encoding they were decoded with.
    #[error("content is not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error("pdf error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("docx archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("docx xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A mandatory part is missing from an otherwise valid archive.
    #[error("docx archive has no {0}")]
    MissingPart(&'static str),
}
