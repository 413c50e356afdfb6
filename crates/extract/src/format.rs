use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Document formats with a dedicated extractor.
///
/// Dispatch is a closed `match` over this enum, so a new format is a
/// compile-time decision rather than another string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Markdown,
    Pdf,
    WordDocument,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::PlainText,
        DocumentFormat::Markdown,
        DocumentFormat::Pdf,
        DocumentFormat::WordDocument,
    ];

    /// Parse a file extension. Case-insensitive; a leading dot is ignored.
    pub fn from_extension(extension: &str) -> Result<Self, ExtractError> {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Ok(DocumentFormat::PlainText),
            "md" => Ok(DocumentFormat::Markdown),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::WordDocument),
            _ => Err(ExtractError::unsupported(extension.trim())),
        }
    }

    /// Infer the format from a path's extension. A path without an extension
    /// is unsupported.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&extension)
    }

    /// Canonical extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "txt",
            DocumentFormat::Markdown => "md",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::WordDocument => "docx",
        }
    }

    /// Text-like formats go through encoding detection.
    pub fn is_text(self) -> bool {
        matches!(self, DocumentFormat::PlainText | DocumentFormat::Markdown)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_parse() {
        for format in DocumentFormat::ALL {
            assert_eq!(DocumentFormat::from_extension(format.extension()).unwrap(), format);
        }
    }

    #[test]
    fn extension_parsing_ignores_case_and_dot() {
        assert_eq!(
            DocumentFormat::from_extension(".PDF").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_extension("Md").unwrap(),
            DocumentFormat::Markdown
        );
    }

    #[test]
    fn unknown_extension_is_rejected_with_its_name() {
        let err = DocumentFormat::from_extension(".xyz").unwrap_err();
        match err {
            ExtractError::UnsupportedFormat { extension } => assert_eq!(extension, ".xyz"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn path_without_extension_is_unsupported() {
        let err = DocumentFormat::from_path(Path::new("/tmp/README")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat { ref extension } if extension.is_empty()));
    }

    #[test]
    fn path_extension_is_used() {
        let format = DocumentFormat::from_path(Path::new("essays/final.DOCX")).unwrap();
        assert_eq!(format, DocumentFormat::WordDocument);
        assert!(!format.is_text());
        assert!(DocumentFormat::Markdown.is_text());
    }
}
