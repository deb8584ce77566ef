//! PDF extraction: embedded text layer first, OCR fallback.
//!
//! # Pipeline
//!
//! ```text
//! open (empty-password retry) → per-page text layer ─ any text? ─ yes → labeled pages
//!                                                               └ no  → render @ DPI → image pipeline
//! metadata (sorted, prefix-stripped) + content → text
//! ```
//!
//! A single page with a text layer is enough to skip OCR for the whole
//! document. Text-layer failures on one page degrade that page to empty;
//! every other failure aborts.

use tracing::{debug, warn};

use super::raster::ImagePipeline;
use crate::engine::{PdfDocumentHandle, PdfEngine, PdfOpenError};
use crate::error::{ExtractError, Result};

/// Text plus page count from one PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfExtraction {
    pub text: String,
    pub page_count: usize,
}

/// Converts PDF bytes to text, falling back to OCR for scanned documents.
pub struct PdfStrategy<'a> {
    engine: &'a dyn PdfEngine,
    pipeline: ImagePipeline<'a>,
    dpi: u16,
}

impl<'a> PdfStrategy<'a> {
    pub fn new(engine: &'a dyn PdfEngine, pipeline: ImagePipeline<'a>, dpi: u16) -> Self {
        Self {
            engine,
            pipeline,
            dpi,
        }
    }

    pub fn extract(&self, bytes: &[u8]) -> Result<PdfExtraction> {
        let document = self.open(bytes)?;
        let page_count = document.page_count();

        let content = match text_layer(document.as_ref()) {
            Some(text) => text,
            None => {
                debug!(pages = page_count, "no text layer, falling back to OCR");
                self.ocr_pages(document.as_ref())?
            }
        };
        let metadata = format_metadata(document.metadata());

        let text = [metadata, content]
            .into_iter()
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(PdfExtraction { text, page_count })
    }

    /// Open the container, retrying once with the empty password.
    fn open<'b>(&'b self, bytes: &'b [u8]) -> Result<Box<dyn PdfDocumentHandle + 'b>> {
        match self.engine.open(bytes, None) {
            Err(PdfOpenError::PasswordRequired) => {
                debug!("PDF is encrypted, trying empty password");
                self.engine.open(bytes, Some("")).map_err(open_error)
            }
            other => other.map_err(open_error),
        }
    }

    fn ocr_pages(&self, document: &dyn PdfDocumentHandle) -> Result<String> {
        let mut blocks = Vec::with_capacity(document.page_count());
        for index in 0..document.page_count() {
            let image = document
                .render_page(index, self.dpi)
                .map_err(ExtractError::Engine)?;
            blocks.push(self.pipeline.extract_decoded(image)?);
        }
        Ok(blocks.join("\n\n"))
    }
}

fn open_error(err: PdfOpenError) -> ExtractError {
    match err {
        PdfOpenError::PasswordRequired => ExtractError::EncryptedDocumentUnsupported,
        PdfOpenError::Malformed(source) => ExtractError::invalid("PDF", source),
        PdfOpenError::Engine(source) => ExtractError::Engine(source),
    }
}

/// Labeled text of every page with a non-blank text layer, or `None` when
/// no page has one.
fn text_layer(document: &dyn PdfDocumentHandle) -> Option<String> {
    let pages: Vec<anyhow::Result<String>> = (0..document.page_count())
        .map(|index| document.page_text(index))
        .collect();

    let labeled: Vec<String> = pages
        .into_iter()
        .enumerate()
        .filter_map(|(index, page)| match page {
            Ok(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| format!("Page {}:\n{trimmed}", index + 1))
            }
            Err(e) => {
                warn!(page = index + 1, error = %e, "text layer extraction failed");
                None
            }
        })
        .collect();

    (!labeled.is_empty()).then(|| labeled.join("\n\n"))
}

/// `key: value` lines sorted by key, with path-style key prefixes removed.
fn format_metadata(mut pairs: Vec<(String, String)>) -> String {
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
        .iter()
        .map(|(key, value)| format!("{}: {value}", strip_key_prefix(key)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_key_prefix(key: &str) -> &str {
    key.rsplit_once('/').map_or(key, |(_, name)| name)
}
