//! DOCX paragraph text extraction.
//!
//! Reads `word/document.xml` from the OOXML zip container and emits one
//! block per non-empty `w:p` paragraph, in document order. Run text
//! (`w:t`) is concatenated without separators; paragraphs are joined with
//! a blank line.

use std::io::{Cursor, Read};

use anyhow::Context;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use zip::ZipArchive;

use crate::error::{ExtractError, Result};

/// Main document part inside the container.
const DOCUMENT_PART: &str = "word/document.xml";

const WORDPROCESSING_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const MARKUP_COMPATIBILITY_NS: &[u8] = b"http://schemas.openxmlformats.org/markup-compatibility/2006";

/// Extract paragraph text from DOCX bytes.
pub fn extract_docx(bytes: &[u8]) -> Result<String> {
    let xml = read_document_part(bytes).map_err(|e| ExtractError::invalid("DOCX", e))?;
    let paragraphs = parse_paragraphs(&xml).map_err(|e| ExtractError::invalid("DOCX", e))?;
    Ok(paragraphs.join("\n\n"))
}

fn read_document_part(bytes: &[u8]) -> anyhow::Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).context("not a zip archive")?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("missing {DOCUMENT_PART}"))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .with_context(|| format!("failed to read {DOCUMENT_PART}"))?;
    Ok(xml)
}

/// Non-empty paragraph texts in document order.
///
/// Paragraphs can nest (text boxes inside a paragraph); each open `w:p`
/// collects its own runs and is emitted when it closes. Only elements in
/// the WordprocessingML namespace count, so DrawingML `a:p`/`a:t` are
/// skipped, as is everything under `mc:Fallback` (the VML copy of content
/// already present under `mc:Choice`).
fn parse_paragraphs(xml: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = NsReader::from_str(xml);
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;
    let mut fallback_depth = 0usize;
    let mut paragraphs = Vec::new();

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .context("malformed document XML")?;
        match event {
            Event::Start(e) => match element(&ns, e.local_name().as_ref()) {
                Element::Fallback => fallback_depth += 1,
                _ if fallback_depth > 0 => {}
                Element::Paragraph => open.push(String::new()),
                Element::Text => in_text = true,
                Element::Other => {}
            },
            Event::End(e) => match element(&ns, e.local_name().as_ref()) {
                Element::Fallback => fallback_depth = fallback_depth.saturating_sub(1),
                _ if fallback_depth > 0 => {}
                Element::Paragraph => {
                    if let Some(text) = open.pop().filter(|t| !t.is_empty()) {
                        paragraphs.push(text);
                    }
                }
                Element::Text => in_text = false,
                Element::Other => {}
            },
            Event::Text(t) if in_text => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&t.unescape().context("bad entity in run text")?);
                }
            }
            Event::CData(t) if in_text => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

enum Element {
    Paragraph,
    Text,
    Fallback,
    Other,
}

fn element(ns: &ResolveResult<'_>, local: &[u8]) -> Element {
    let ResolveResult::Bound(Namespace(uri)) = ns else {
        return Element::Other;
    };
    match (*uri, local) {
        (WORDPROCESSING_NS, b"p") => Element::Paragraph,
        (WORDPROCESSING_NS, b"t") => Element::Text,
        (MARKUP_COMPATIBILITY_NS, b"Fallback") => Element::Fallback,
        _ => Element::Other,
    }
}
