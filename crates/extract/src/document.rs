use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::docx::extract_docx_text;
use crate::encoding::{decode_text, detect_encoding};
use crate::error::ExtractionCause;
use crate::format::DocumentFormat;
use crate::pdf::extract_pdf_text;

/// Undecoded document bytes plus the format they should be read as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(format: DocumentFormat, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            format,
            bytes: bytes.into(),
        }
    }

    /// Read the whole file into memory.
    pub fn read(path: &Path, format: DocumentFormat) -> Result<Self, ExtractionCause> {
        let bytes = fs::read(path)?;
        Ok(Self::new(format, bytes))
    }

    /// Run the format's extractor over the in-memory bytes.
    pub fn extract_text(&self) -> Result<PlainText, ExtractionCause> {
        let text = match self.format {
            DocumentFormat::PlainText | DocumentFormat::Markdown => {
                let guess = detect_encoding(&self.bytes);
                debug!(
                    encoding = guess.label(),
                    confidence = guess.confidence,
                    "detected text encoding"
                );
                decode_text(&self.bytes, &guess)?
            }
            DocumentFormat::Pdf => extract_pdf_text(&self.bytes)?,
            DocumentFormat::WordDocument => extract_docx_text(&self.bytes)?,
        };
        Ok(PlainText(text))
    }
}

/// Extracted, decoded text. May be empty; never partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlainText(String);

impl PlainText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for PlainText {
    fn from(value: String) -> Self {
        PlainText(value)
    }
}

impl AsRef<str> for PlainText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
