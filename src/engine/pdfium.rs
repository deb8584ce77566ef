//! pdfium adapter (via `pdfium-render`).
//!
//! Binds to a pdfium library next to the executable, falling back to the
//! system library.

use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use pdfium_render::prelude::*;

use super::{PdfDocumentHandle, PdfEngine, PdfOpenError};

/// PDF points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Info dictionary entries reported as metadata.
const METADATA_TAGS: [(PdfDocumentMetadataTagType, &str); 8] = [
    (PdfDocumentMetadataTagType::Title, "/Title"),
    (PdfDocumentMetadataTagType::Author, "/Author"),
    (PdfDocumentMetadataTagType::Subject, "/Subject"),
    (PdfDocumentMetadataTagType::Keywords, "/Keywords"),
    (PdfDocumentMetadataTagType::Creator, "/Creator"),
    (PdfDocumentMetadataTagType::Producer, "/Producer"),
    (PdfDocumentMetadataTagType::CreationDate, "/CreationDate"),
    (PdfDocumentMetadataTagType::ModificationDate, "/ModDate"),
];

/// pdfium-backed [`PdfEngine`].
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .context("Failed to bind pdfium library")?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PdfEngine for PdfiumEngine {
    fn open<'a>(
        &'a self,
        bytes: &'a [u8],
        password: Option<&str>,
    ) -> std::result::Result<Box<dyn PdfDocumentHandle + 'a>, PdfOpenError> {
        match self.pdfium.load_pdf_from_byte_slice(bytes, password) {
            Ok(document) => Ok(Box::new(PdfiumDocument { document })),
            Err(PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError)) => {
                Err(PdfOpenError::PasswordRequired)
            }
            Err(e) => Err(PdfOpenError::Malformed(anyhow!("Failed to parse PDF: {e:?}"))),
        }
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl PdfiumDocument<'_> {
    fn page(&self, index: usize) -> Result<PdfPage<'_>> {
        let index = PdfPageIndex::try_from(index)
            .map_err(|_| anyhow!("page index {index} out of range"))?;
        self.document
            .pages()
            .get(index)
            .map_err(|e| anyhow!("failed to load page {index}: {e:?}"))
    }
}

impl PdfDocumentHandle for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let page = self.page(index)?;
        let text = page
            .text()
            .map_err(|e| anyhow!("failed to extract text from page: {e:?}"))?;
        Ok(text.all())
    }

    fn metadata(&self) -> Vec<(String, String)> {
        let metadata = self.document.metadata();
        METADATA_TAGS
            .iter()
            .filter_map(|(tag, key)| {
                let value = metadata.get(*tag)?.value().trim().to_string();
                (!value.is_empty()).then(|| ((*key).to_string(), value))
            })
            .collect()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_page(&self, index: usize, dpi: u16) -> Result<DynamicImage> {
        let page = self.page(index)?;
        let scale = f32::from(dpi) / POINTS_PER_INCH;
        let pixel_width = (page.width().value * scale) as i32;
        let pixel_height = (page.height().value * scale) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(pixel_width)
                    .set_target_height(pixel_height)
                    .render_form_data(true)
                    .render_annotations(true),
            )
            .map_err(|e| anyhow!("Failed to render PDF page: {e:?}"))?;

        Ok(bitmap.as_image())
    }
}
