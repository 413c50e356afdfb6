use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::ExtractionCause;

const DOCUMENT_PART: &str = "word/document.xml";

/// Pull paragraph text out of a DOCX archive, one line per `w:p`.
///
/// Only body-level paragraphs count, in document order; paragraphs nested in
/// a table (`w:tbl`) are skipped. Within a paragraph only characters inside
/// `w:t` runs count. `w:tab` becomes a tab and `w:br`/`w:cr` become newlines.
pub(crate) fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionCause> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml)?;
        }
        Err(ZipError::FileNotFound) => return Err(ExtractionCause::MissingPart(DOCUMENT_PART)),
        Err(err) => return Err(err.into()),
    }

    let paragraphs = paragraphs_from_xml(&xml)?;
    debug!(paragraphs = paragraphs.len(), "docx text extracted");
    Ok(paragraphs.join("\n"))
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, ExtractionCause> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text_run = false;
    let mut table_depth = 0usize;

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(e) if e.name().as_ref() == b"w:tbl" => {
                table_depth += 1;
                continue;
            }
            Event::End(e) if e.name().as_ref() == b"w:tbl" => {
                table_depth = table_depth.saturating_sub(1);
                continue;
            }
            Event::Eof => break,
            _ if table_depth > 0 => continue,
            _ => {}
        }

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text_run = true,
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                // self-closing paragraph: an empty line
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(t) if in_text_run => current.push_str(&t.unescape()?),
            Event::CData(t) if in_text_run => {
                current.push_str(&String::from_utf8_lossy(&t.into_inner()));
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" if in_paragraph => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            _ => {}
        }
    }

    Ok(paragraphs)
}
