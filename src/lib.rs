//! `docsift` - Document-to-text extraction
//!
//! # Features
//!
//! - **Plain text**: lossy UTF-8 decoding for every `text/*` type
//! - **DOCX**: paragraph text from `word/document.xml`
//! - **PDF**: embedded text layer with metadata, OCR fallback for scans (`pdf`)
//! - **Images**: Tesseract OCR plus Markdown table recovery (`ocr`)
//!
//! # Example
//!
//! ```rust,no_run
//! use docsift::{ExtractConfig, Extractor};
//!
//! fn main() -> anyhow::Result<()> {
//!     let extractor = Extractor::from_config(ExtractConfig::load()?)?;
//!     let bytes = std::fs::read("scan.png")?;
//!     println!("{}", extractor.extract(&bytes, "image/png")?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod content;
pub mod engine;
pub mod error;

pub use config::{ExtractConfig, OcrConfig};
pub use content::table::{build_table, cluster_columns, group_lines, render_markdown};
pub use content::{classify, ExtractionResult, Extractor, MimeClass, TableGrid, Word};
pub use engine::{OcrEngine, PdfDocumentHandle, PdfEngine, PdfOpenError, UnavailableEngine};
pub use error::{ExtractError, Result};

/// Version of docsift
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
