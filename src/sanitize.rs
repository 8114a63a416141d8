//! Output sanitizer for decrypted text
//!
//! Best-effort cleanup applied after lossy UTF-8 decoding on the hybrid
//! decrypt path. It masks decode artifacts such as U+FFFD replacement
//! characters; it is not a validation step and gives no security guarantee.

/// Remove every character outside the 7-bit ASCII range
pub fn sanitize(text: &str) -> String {
    let cleaned: String = text.chars().filter(char::is_ascii).collect();

    if cleaned.len() != text.len() {
        log::debug!(
            "Sanitizer dropped {} non-ASCII bytes",
            text.len() - cleaned.len()
        );
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        let text = "HELLO, world!\n\t~";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_non_ascii_removed() {
        assert_eq!(sanitize("caf\u{e9} \u{1f600}ok"), "caf ok");
    }

    #[test]
    fn test_replacement_characters_removed() {
        let decoded = String::from_utf8_lossy(&[b'a', 0xff, 0xfe, b'b']);
        assert_eq!(sanitize(&decoded), "ab");
    }

    #[test]
    fn test_empty() {
        assert_eq!(sanitize(""), "");
    }
}
