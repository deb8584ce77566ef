//! Plain text decoding.
//!
//! Handles every `text/*` type. Invalid UTF-8 sequences become U+FFFD, so
//! decoding never fails.

/// Decode bytes as UTF-8, substituting the replacement character for any
/// invalid sequence.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(decode_text(b"Hello, world!"), "Hello, world!");
    }

    #[test]
    fn handles_empty_input() {
        assert_eq!(decode_text(b""), "");
    }

    #[test]
    fn replaces_invalid_byte() {
        assert_eq!(decode_text(b"hello\xffworld"), "hello\u{FFFD}world");
    }

    #[test]
    fn replaces_truncated_multibyte_sequence() {
        // "é" is C3 A9; a lone C3 at the end is incomplete.
        assert_eq!(decode_text(b"caf\xc3"), "caf\u{FFFD}");
    }

    #[test]
    fn never_fails_on_arbitrary_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = decode_text(&bytes);
        assert!(text.starts_with('\0'));
        assert!(text.contains('\u{FFFD}'));
    }
}
