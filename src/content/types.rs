//! Shared types for extraction.
//!
//! Word observations come from the OCR engine; lines and grids are rebuilt
//! from them on every call.

use serde::Serialize;

/// One recognized token with its bounding-box origin (pixels) and its path
/// in the recognizer's block/paragraph/line hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub block: u32,
    pub par: u32,
    pub line: u32,
}

impl Word {
    /// Structural key identifying the line this word belongs to.
    pub fn line_key(&self) -> (u32, u32, u32) {
        (self.block, self.par, self.line)
    }
}

/// Words sharing one `(block, par, line)` key, sorted by `left`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub words: Vec<Word>,
}

impl Line {
    /// Smallest `top` over the line's words.
    pub fn top(&self) -> i32 {
        self.words.iter().map(|w| w.top).min().unwrap_or(0)
    }

    /// Smallest `left` over the line's words.
    pub fn left(&self) -> i32 {
        self.words.iter().map(|w| w.left).min().unwrap_or(0)
    }
}

/// Cell contents of a recovered table: `rows[row_idx][col_idx]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableGrid {
    pub rows: Vec<Vec<String>>,
}

/// Coarse content category derived from a MIME string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeClass {
    PlainText,
    Docx,
    Pdf,
    Image,
    Unsupported,
}

impl MimeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlainText => "plaintext",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for MimeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
