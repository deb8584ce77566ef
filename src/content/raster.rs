//! Raster image extraction pipeline.
//!
//! ```text
//! bytes → preprocess ─┬─ OCR text ─────────────────────────────────┐
//!                     └─ OCR words → lines + columns → table (md) ─┴→ text
//! ```
//!
//! Both recognition passes run against the same preprocessed image.

use image::{DynamicImage, GrayImage};
use tracing::debug;

use super::preprocess::{preprocess, preprocess_decoded};
use super::table::words_to_markdown;
use crate::config::ExtractConfig;
use crate::engine::OcrEngine;
use crate::error::{ExtractError, Result};

/// Heading placed between the recognized text and any recovered tables.
pub const TABLES_HEADING: &str = "Extracted tables:";

/// Runs OCR plus table recovery over one image.
pub struct ImagePipeline<'a> {
    ocr: &'a dyn OcrEngine,
    config: &'a ExtractConfig,
}

impl<'a> ImagePipeline<'a> {
    pub fn new(ocr: &'a dyn OcrEngine, config: &'a ExtractConfig) -> Self {
        Self { ocr, config }
    }

    /// Extract text from encoded image bytes.
    pub fn extract(&self, bytes: &[u8]) -> Result<String> {
        let image = preprocess(bytes, self.config.binarize_threshold)?;
        self.recognize(&image)
    }

    /// Extract text from an already decoded image.
    pub fn extract_decoded(&self, image: DynamicImage) -> Result<String> {
        let image = preprocess_decoded(image, self.config.binarize_threshold);
        self.recognize(&image)
    }

    fn recognize(&self, image: &GrayImage) -> Result<String> {
        let text = self.ocr.recognize_text(image).map_err(ExtractError::Engine)?;
        let words = self.ocr.recognize_words(image).map_err(ExtractError::Engine)?;
        let table = words_to_markdown(&words, self.config.column_gap_px);
        debug!(
            words = words.len(),
            table = !table.is_empty(),
            "image recognized"
        );
        Ok(compose(text, &table))
    }
}

/// Append the table section when one was recovered.
fn compose(text: String, table: &str) -> String {
    if table.is_empty() {
        text
    } else {
        format!("{text}\n\n{TABLES_HEADING}\n{table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::types::Word;
    use image::Luma;
    use std::sync::Mutex;

    /// Returns canned output and remembers the image sizes it saw.
    struct CannedOcr {
        text: &'static str,
        words: Vec<Word>,
        seen: Mutex<Vec<(u32, u32)>>,
    }

    impl OcrEngine for CannedOcr {
        fn recognize_text(&self, image: &GrayImage) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push(image.dimensions());
            Ok(self.text.to_string())
        }

        fn recognize_words(&self, image: &GrayImage) -> anyhow::Result<Vec<Word>> {
            self.seen.lock().unwrap().push(image.dimensions());
            Ok(self.words.clone())
        }
    }

    fn word(text: &str, left: i32, top: i32, line: u32) -> Word {
        Word {
            text: text.into(),
            left,
            top,
            block: 1,
            par: 1,
            line,
        }
    }

    fn page() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(20, 10, Luma([200])))
    }

    #[test]
    fn compose_without_table() {
        assert_eq!(compose("hello".into(), ""), "hello");
    }

    #[test]
    fn compose_with_table() {
        assert_eq!(
            compose("hello".into(), "| a | b |\n| --- | --- |"),
            "hello\n\nExtracted tables:\n| a | b |\n| --- | --- |"
        );
    }

    #[test]
    fn appends_recovered_table() {
        let ocr = CannedOcr {
            text: "A B C",
            words: vec![word("A", 10, 0, 1), word("B", 20, 0, 1), word("C", 200, 0, 1)],
            seen: Mutex::default(),
        };
        let config = ExtractConfig::default();
        let out = ImagePipeline::new(&ocr, &config).extract_decoded(page()).unwrap();
        assert_eq!(out, "A B C\n\nExtracted tables:\n| A B | C |\n| --- | --- |");
    }

    #[test]
    fn prose_has_no_table_section() {
        let ocr = CannedOcr {
            text: "plain prose",
            words: vec![word("plain", 10, 0, 1), word("prose", 40, 0, 1)],
            seen: Mutex::default(),
        };
        let config = ExtractConfig::default();
        let out = ImagePipeline::new(&ocr, &config).extract_decoded(page()).unwrap();
        assert_eq!(out, "plain prose");
    }

    #[test]
    fn both_passes_see_the_same_image() {
        let ocr = CannedOcr {
            text: "",
            words: Vec::new(),
            seen: Mutex::default(),
        };
        let config = ExtractConfig::default();
        ImagePipeline::new(&ocr, &config).extract_decoded(page()).unwrap();
        assert_eq!(*ocr.seen.lock().unwrap(), vec![(20, 10), (20, 10)]);
    }

    #[test]
    fn garbage_bytes_are_invalid_content() {
        let ocr = CannedOcr {
            text: "",
            words: Vec::new(),
            seen: Mutex::default(),
        };
        let config = ExtractConfig::default();
        let err = ImagePipeline::new(&ocr, &config).extract(b"\x00\x01garbage").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidContent { .. }));
        assert!(ocr.seen.lock().unwrap().is_empty());
    }
}
