//! MIME classification.
//!
//! Substring matching over the trimmed, lowercased MIME string, tested in
//! a fixed priority order. A string matching several token sets resolves
//! to the first class tested.

use super::types::MimeClass;

const PLAIN_TEXT_TOKENS: &[&str] = &["text/"];
const DOCX_TOKENS: &[&str] = &["wordprocessingml", "msword", "docx"];
const PDF_TOKENS: &[&str] = &["pdf"];
const IMAGE_TOKENS: &[&str] = &["jpeg", "jpg", "png", "bmp", "tiff"];

/// Classes in the order they are tested.
const PRIORITY: [(MimeClass, &[&str]); 4] = [
    (MimeClass::PlainText, PLAIN_TEXT_TOKENS),
    (MimeClass::Docx, DOCX_TOKENS),
    (MimeClass::Pdf, PDF_TOKENS),
    (MimeClass::Image, IMAGE_TOKENS),
];

/// Map a MIME string to its [`MimeClass`]. Total; never fails.
pub fn classify(mime_type: &str) -> MimeClass {
    let mime = mime_type.trim().to_lowercase();
    PRIORITY
        .iter()
        .find(|(_, tokens)| tokens.iter().any(|token| mime.contains(token)))
        .map_or(MimeClass::Unsupported, |(class, _)| *class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_types() {
        assert_eq!(classify("text/plain"), MimeClass::PlainText);
        assert_eq!(classify("text/csv; charset=utf-8"), MimeClass::PlainText);
        assert_eq!(
            classify("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            MimeClass::Docx
        );
        assert_eq!(classify("application/pdf"), MimeClass::Pdf);
        assert_eq!(classify("image/png"), MimeClass::Image);
        assert_eq!(classify("image/jpeg"), MimeClass::Image);
        assert_eq!(classify("image/jpg"), MimeClass::Image);
        assert_eq!(classify("image/bmp"), MimeClass::Image);
        assert_eq!(classify("image/tiff"), MimeClass::Image);
    }

    #[test]
    fn is_case_insensitive_and_trims() {
        assert_eq!(classify("  Application/PDF "), MimeClass::Pdf);
        assert_eq!(classify("IMAGE/PNG"), MimeClass::Image);
        assert_eq!(classify("Text/Markdown"), MimeClass::PlainText);
    }

    #[test]
    fn unsupported_types() {
        assert_eq!(classify("application/json"), MimeClass::Unsupported);
        assert_eq!(classify("image/gif"), MimeClass::Unsupported);
        assert_eq!(classify("audio/mpeg"), MimeClass::Unsupported);
        assert_eq!(classify(""), MimeClass::Unsupported);
    }

    #[test]
    fn plain_text_beats_everything() {
        assert_eq!(classify("text/x-pdf"), MimeClass::PlainText);
        assert_eq!(classify("text/png"), MimeClass::PlainText);
        assert_eq!(classify("text/docx"), MimeClass::PlainText);
    }

    #[test]
    fn docx_beats_pdf_and_image() {
        assert_eq!(classify("application/docx+pdf"), MimeClass::Docx);
        assert_eq!(classify("application/msword-png"), MimeClass::Docx);
    }

    #[test]
    fn pdf_beats_image() {
        assert_eq!(classify("image/pdf+png"), MimeClass::Pdf);
        assert_eq!(classify("application/x-pdf-jpeg"), MimeClass::Pdf);
    }
}
