//! Extraction settings loaded from `~/.config/docsift/config.toml`.
//!
//! Every field has a default, so a missing file (or a file that sets only
//! a few keys) is valid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Horizontal gap (pixels) that separates two table columns.
pub const COLUMN_GAP_THRESHOLD_PX: i32 = 50;

/// Resolution used when rasterizing PDF pages for OCR.
pub const PDF_RENDER_DPI: u16 = 300;

/// Intensity below which a pixel becomes ink after autocontrast.
pub const BINARIZE_THRESHOLD: u8 = 128;

/// Tesseract "assume a single uniform block of text".
pub const DEFAULT_TEXT_PSM: u32 = 6;

/// Top-level extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Gap between sorted word `left` values that starts a new column.
    pub column_gap_px: i32,
    /// DPI for rendering scanned PDF pages.
    pub pdf_dpi: u16,
    /// Binarization threshold applied after autocontrast.
    pub binarize_threshold: u8,
    pub ocr: OcrConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            column_gap_px: COLUMN_GAP_THRESHOLD_PX,
            pdf_dpi: PDF_RENDER_DPI,
            binarize_threshold: BINARIZE_THRESHOLD,
            ocr: OcrConfig::default(),
        }
    }
}

/// Settings for the Tesseract adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language codes (e.g., "eng", "eng+fin")
    pub language: String,
    /// Page segmentation mode for plain text recognition.
    pub text_psm: u32,
    /// Directory containing `tessdata`; `None` uses the system default.
    pub data_path: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            text_psm: DEFAULT_TEXT_PSM,
            data_path: None,
        }
    }
}

impl ExtractConfig {
    /// Load from the default location, falling back to defaults when the
    /// file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        anyhow::ensure!(config.column_gap_px >= 0, "column_gap_px must not be negative");
        anyhow::ensure!(config.pdf_dpi > 0, "pdf_dpi must be positive");
        Ok(config)
    }
}

/// Return the path to the config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docsift")
        .join("config.toml")
}
