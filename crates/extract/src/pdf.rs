use lopdf::Document;
use tracing::debug;

use crate::error::ExtractionCause;

/// Concatenate the text of every page in page order.
///
/// A page with nothing to extract contributes an empty string. Parse and
/// decoding failures bubble up.
pub(crate) fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionCause> {
    let doc = Document::load_mem(bytes)?;
    let pages = doc.get_pages();

    let mut text = String::new();
    for &page_number in pages.keys() {
        let page_text = doc.extract_text(&[page_number])?;
        if page_text.trim().is_empty() {
            debug!(page = page_number, "pdf page has no extractable text");
            continue;
        }
        // keep the last word of one page from gluing onto the next
        if !text.is_empty() && !text.ends_with(char::is_whitespace) {
            text.push('\n');
        }
        text.push_str(&page_text);
    }

    debug!(pages = pages.len(), chars = text.len(), "pdf text extracted");
    Ok(text)
}
