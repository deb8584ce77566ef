//! External recognition and PDF capabilities.
//!
//! The extraction core never recognizes glyphs or parses PDF containers
//! itself. It consumes these traits, which production adapters implement
//! on top of native libraries:
//!
//! | Trait | Adapter | Feature Flag |
//! |-------|---------|-------------|
//! | [`OcrEngine`] | `tesseract::TesseractEngine` | `ocr` |
//! | [`PdfEngine`] | `pdfium::PdfiumEngine` | `pdf` |
//!
//! When a feature is disabled, [`UnavailableEngine`] stands in and fails
//! every call with [`ExtractError::Engine`](crate::ExtractError::Engine).

#[cfg(feature = "pdf")]
pub mod pdfium;
#[cfg(feature = "ocr")]
pub mod tesseract;
pub mod tsv;

use anyhow::{bail, Result};
use image::{DynamicImage, GrayImage};
use thiserror::Error;

use crate::content::types::Word;

/// Text recognition over a preprocessed (binarized) page image.
pub trait OcrEngine: Send + Sync {
    /// Recognize the image as plain text.
    fn recognize_text(&self, image: &GrayImage) -> Result<String>;

    /// Recognize individual words with their positions and structural ids.
    fn recognize_words(&self, image: &GrayImage) -> Result<Vec<Word>>;
}

/// Why a PDF container could not be opened.
#[derive(Error, Debug)]
pub enum PdfOpenError {
    #[error("password required")]
    PasswordRequired,

    #[error("malformed PDF: {0:#}")]
    Malformed(#[source] anyhow::Error),

    #[error("PDF engine failure: {0:#}")]
    Engine(#[source] anyhow::Error),
}

/// Opens PDF containers.
pub trait PdfEngine: Send + Sync {
    /// Open `bytes`, decrypting with `password` when given.
    fn open<'a>(
        &'a self,
        bytes: &'a [u8],
        password: Option<&str>,
    ) -> std::result::Result<Box<dyn PdfDocumentHandle + 'a>, PdfOpenError>;
}

/// An opened PDF document. Page indices are 0-based.
pub trait PdfDocumentHandle {
    fn page_count(&self) -> usize;

    /// Embedded text layer of one page.
    fn page_text(&self, index: usize) -> Result<String>;

    /// Document information key/value pairs, in any order.
    fn metadata(&self) -> Vec<(String, String)>;

    /// Rasterize one page at `dpi`.
    fn render_page(&self, index: usize, dpi: u16) -> Result<DynamicImage>;
}

/// Placeholder for a capability that was not compiled in.
#[derive(Debug, Clone, Copy)]
pub struct UnavailableEngine {
    feature: &'static str,
}

impl UnavailableEngine {
    pub const fn new(feature: &'static str) -> Self {
        Self { feature }
    }
}

impl OcrEngine for UnavailableEngine {
    fn recognize_text(&self, _image: &GrayImage) -> Result<String> {
        bail!("OCR support not compiled in (enable the `{}` feature)", self.feature)
    }

    fn recognize_words(&self, _image: &GrayImage) -> Result<Vec<Word>> {
        bail!("OCR support not compiled in (enable the `{}` feature)", self.feature)
    }
}

impl PdfEngine for UnavailableEngine {
    fn open<'a>(
        &'a self,
        _bytes: &'a [u8],
        _password: Option<&str>,
    ) -> std::result::Result<Box<dyn PdfDocumentHandle + 'a>, PdfOpenError> {
        Err(PdfOpenError::Engine(anyhow::anyhow!(
            "PDF support not compiled in (enable the `{}` feature)",
            self.feature
        )))
    }
}

/// Default OCR engine for this build.
#[cfg(feature = "ocr")]
pub fn default_ocr(config: &crate::config::OcrConfig) -> Result<Box<dyn OcrEngine>> {
    Ok(Box::new(tesseract::TesseractEngine::new(config.clone())?))
}

/// Default OCR engine for this build.
#[cfg(not(feature = "ocr"))]
#[allow(clippy::unnecessary_wraps)]
pub fn default_ocr(_config: &crate::config::OcrConfig) -> Result<Box<dyn OcrEngine>> {
    Ok(Box::new(UnavailableEngine::new("ocr")))
}

/// Default PDF engine for this build.
#[cfg(feature = "pdf")]
pub fn default_pdf() -> Result<Box<dyn PdfEngine>> {
    Ok(Box::new(pdfium::PdfiumEngine::new()?))
}

/// Default PDF engine for this build.
#[cfg(not(feature = "pdf"))]
#[allow(clippy::unnecessary_wraps)]
pub fn default_pdf() -> Result<Box<dyn PdfEngine>> {
    Ok(Box::new(UnavailableEngine::new("pdf")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_ocr_names_feature() {
        let engine = UnavailableEngine::new("ocr");
        let err = engine.recognize_text(&GrayImage::new(1, 1)).unwrap_err();
        assert!(err.to_string().contains("`ocr`"));
        assert!(engine.recognize_words(&GrayImage::new(1, 1)).is_err());
    }

    #[test]
    fn unavailable_pdf_reports_engine_failure() {
        let engine = UnavailableEngine::new("pdf");
        let result = engine.open(b"%PDF-1.7", None);
        assert!(matches!(result, Err(PdfOpenError::Engine(_))));
    }
}
