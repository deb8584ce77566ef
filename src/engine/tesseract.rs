//! Tesseract OCR adapter (via `leptess`).
//!
//! A fresh `LepTess` handle is created per call: the handle is not
//! thread-safe, and the engine itself must be shareable across threads.

use std::io::Cursor;

use anyhow::{anyhow, Context, Result};
use image::{GrayImage, ImageFormat};
use leptess::{LepTess, Variable};
use tracing::debug;

use super::{tsv, OcrEngine};
use crate::config::OcrConfig;
use crate::content::types::Word;

/// Tesseract-backed [`OcrEngine`].
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    /// Create an engine, verifying that Tesseract can load the configured
    /// language data.
    pub fn new(config: OcrConfig) -> Result<Self> {
        let engine = Self { config };
        engine.handle().with_context(|| {
            format!(
                "failed to initialize Tesseract with language '{}'; \
                 make sure the language data is installed",
                engine.config.language
            )
        })?;
        Ok(engine)
    }

    fn handle(&self) -> Result<LepTess> {
        let data_path = self
            .config
            .data_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());
        LepTess::new(data_path.as_deref(), &self.config.language)
            .map_err(|e| anyhow!("Tesseract init failed: {e}"))
    }

    /// Load `image` into a new handle. Leptess decodes from encoded bytes,
    /// so the bitmap is written out as PNG first.
    fn load(&self, image: &GrayImage) -> Result<LepTess> {
        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .context("failed to encode image to PNG")?;

        let mut lt = self.handle()?;
        lt.set_image_from_mem(png.get_ref())
            .map_err(|e| anyhow!("failed to set image from memory: {e}"))?;
        Ok(lt)
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize_text(&self, image: &GrayImage) -> Result<String> {
        let mut lt = self.load(image)?;
        lt.set_variable(
            Variable::TesseditPagesegMode,
            &self.config.text_psm.to_string(),
        )
        .map_err(|e| anyhow!("failed to set page segmentation mode: {e}"))?;

        let text = lt
            .get_utf8_text()
            .map_err(|e| anyhow!("recognized text is not UTF-8: {e}"))?;
        debug!(chars = text.len(), "tesseract text pass");
        Ok(text)
    }

    fn recognize_words(&self, image: &GrayImage) -> Result<Vec<Word>> {
        let mut lt = self.load(image)?;
        let tsv_text = lt
            .get_tsv_text(0)
            .map_err(|e| anyhow!("TSV output is not UTF-8: {e}"))?;
        let words = tsv::parse_words(&tsv_text);
        debug!(words = words.len(), "tesseract word pass");
        Ok(words)
    }
}
