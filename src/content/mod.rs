//! MIME-aware document extraction.
//!
//! Routes document bytes to the extractor for their [`MimeClass`]. The
//! class is derived by [`classify`] and tested in priority order.
//!
//! # Supported Content Types
//!
//! | Class | MIME tokens | Extractor | Feature Flag |
//! |-------|-------------|-----------|-------------|
//! | PlainText | `text/` | [`plain::decode_text`] | always |
//! | Docx | `wordprocessingml`, `msword`, `docx` | [`docx::extract_docx`] | always |
//! | Pdf | `pdf` | [`pdf::PdfStrategy`] | `pdf` (+ `ocr` for scans) |
//! | Image | `jpeg`, `jpg`, `png`, `bmp`, `tiff` | [`raster::ImagePipeline`] | `ocr` |
//!
//! # Example
//!
//! ```rust
//! use docsift::content::Extractor;
//! use docsift::{ExtractConfig, UnavailableEngine};
//!
//! let extractor = Extractor::new(
//!     ExtractConfig::default(),
//!     Box::new(UnavailableEngine::new("ocr")),
//!     Box::new(UnavailableEngine::new("pdf")),
//! );
//! let text = extractor.extract(b"hello\xffworld", "text/plain").unwrap();
//! assert_eq!(text, "hello\u{FFFD}world");
//! ```

pub mod docx;
pub mod mime;
pub mod pdf;
pub mod plain;
pub mod preprocess;
pub mod raster;
pub mod table;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

pub use mime::classify;
pub use types::{Line, MimeClass, TableGrid, Word};

use crate::config::ExtractConfig;
use crate::engine::{self, OcrEngine, PdfEngine};
use crate::error::{ExtractError, Result};

/// Outcome of one extraction call.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// The extracted text, including any recovered tables.
    pub text: String,
    /// Class the MIME type resolved to.
    pub mime_class: MimeClass,
    /// Number of pages (PDF only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
    /// Extraction time in milliseconds.
    pub elapsed_ms: f64,
}

/// Routes document bytes to the matching extractor.
///
/// Stateless between calls; share it behind an [`Arc`] to extract from
/// several threads at once.
pub struct Extractor {
    config: ExtractConfig,
    ocr: Box<dyn OcrEngine>,
    pdf: Box<dyn PdfEngine>,
}

impl Extractor {
    /// Create an extractor over explicit engines.
    pub fn new(config: ExtractConfig, ocr: Box<dyn OcrEngine>, pdf: Box<dyn PdfEngine>) -> Self {
        Self { config, ocr, pdf }
    }

    /// Create an extractor with the engines compiled into this build.
    ///
    /// Engines whose feature flag is disabled are replaced with
    /// [`engine::UnavailableEngine`], so only documents that need them fail.
    pub fn from_config(config: ExtractConfig) -> anyhow::Result<Self> {
        let ocr = engine::default_ocr(&config.ocr)?;
        let pdf = engine::default_pdf()?;
        Ok(Self::new(config, ocr, pdf))
    }

    /// Extract text from `bytes` declared as `mime_type`.
    pub fn extract(&self, bytes: &[u8], mime_type: &str) -> Result<String> {
        self.convert(bytes, mime_type).map(|result| result.text)
    }

    /// Extract text along with conversion details.
    pub fn convert(&self, bytes: &[u8], mime_type: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mime_class = classify(mime_type);
        debug!(mime = mime_type, class = %mime_class, bytes = bytes.len(), "dispatching");

        let (text, page_count) = match mime_class {
            MimeClass::PlainText => (plain::decode_text(bytes), None),
            MimeClass::Docx => (docx::extract_docx(bytes)?, None),
            MimeClass::Pdf => {
                let extraction =
                    pdf::PdfStrategy::new(self.pdf.as_ref(), self.image_pipeline(), self.config.pdf_dpi)
                        .extract(bytes)?;
                (extraction.text, Some(extraction.page_count))
            }
            MimeClass::Image => (self.image_pipeline().extract(bytes)?, None),
            MimeClass::Unsupported => {
                return Err(ExtractError::UnsupportedMimeType(mime_type.to_string()));
            }
        };

        Ok(ExtractionResult {
            text,
            mime_class,
            page_count,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Run [`Extractor::convert`] on tokio's blocking pool.
    ///
    /// OCR and PDF work is CPU-bound; this keeps it off the async reactor.
    pub async fn extract_async(
        self: Arc<Self>,
        bytes: Vec<u8>,
        mime_type: String,
    ) -> Result<ExtractionResult> {
        tokio::task::spawn_blocking(move || self.convert(&bytes, &mime_type))
            .await
            .map_err(|e| ExtractError::Engine(anyhow::anyhow!("extraction task failed: {e}")))?
    }

    fn image_pipeline(&self) -> raster::ImagePipeline<'_> {
        raster::ImagePipeline::new(self.ocr.as_ref(), &self.config)
    }
}
