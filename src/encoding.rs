//! Character encoding detection and transcoding.
//!
//! This module handles various character encodings commonly found in web pages,
//! detecting the charset from HTML meta tags and converting to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

// Module-level regex patterns for charset detection
// These are compiled once at first use and reused throughout the program lifetime

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect the character encoding a document declares about itself.
///
/// Looks for declarations in the following order:
/// 1. A byte order mark
/// 2. `<meta charset="...">`
/// 3. `<meta http-equiv="Content-Type" content="...; charset=...">`
///
/// Only examines the first 1024 bytes for performance.
#[must_use]
pub fn detect_declared_encoding(html: &[u8]) -> Option<&'static Encoding> {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return Some(encoding);
    }

    // Only look at first 1024 bytes for performance
    let head = &html[..html.len().min(1024)];

    // Convert to string with lossy conversion to search for meta tags
    let head_str = String::from_utf8_lossy(head);

    extract_charset(&head_str)
        .and_then(|charset| Encoding::for_label(charset.as_bytes()))
        .or_else(|| {
            extract_content_type_charset(&head_str)
                .and_then(|charset| Encoding::for_label(charset.as_bytes()))
        })
}

/// Extract charset from `<meta charset="...">` tag.
fn extract_charset(html: &str) -> Option<String> {
    CHARSET_META_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract charset from `<meta http-equiv="Content-Type" content="...; charset=...">` tag.
fn extract_content_type_charset(html: &str) -> Option<String> {
    CONTENT_TYPE_CHARSET_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Transcode HTML bytes to UTF-8 string.
///
/// Uses the document's declared encoding, or `fallback` when it declares
/// none. Invalid sequences are replaced with � rather than causing errors.
///
/// # Examples
///
/// ```
/// use rs_gravity::encoding::transcode_to_utf8;
///
/// let html = b"<html><body>Caf\xE9</body></html>";
/// let utf8_str = transcode_to_utf8(html, encoding_rs::WINDOWS_1252);
/// assert!(utf8_str.contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8], fallback: &'static Encoding) -> String {
    let encoding = detect_declared_encoding(html).unwrap_or(fallback);

    if encoding == UTF_8 {
        // Fast path for UTF-8: just do lossy conversion
        let html = html.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(html);
        return String::from_utf8_lossy(html).into_owned();
    }

    // `decode` sniffs and strips a BOM itself.
    let (decoded, encoding_used, had_errors) = encoding.decode(html);
    if had_errors {
        tracing::debug!(encoding = encoding_used.name(), "replaced malformed byte sequences while decoding");
    }

    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_utf8_from_meta_charset() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Test</body></html>"#;
        assert_eq!(detect_declared_encoding(html), Some(UTF_8));
    }

    #[test]
    fn detect_iso88591_from_meta_charset() {
        let html = br#"<html><head><meta charset="ISO-8859-1"></head><body>Test</body></html>"#;
        let Some(encoding) = detect_declared_encoding(html) else {
            panic!("expected a declared charset");
        };
        // encoding_rs maps ISO-8859-1 to windows-1252 per the WHATWG Encoding Standard
        // (they are functionally equivalent for web content)
        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn detect_windows1252_from_meta_charset() {
        let html = br#"<html><head><meta charset="windows-1252"></head><body>Test</body></html>"#;
        let Some(encoding) = detect_declared_encoding(html) else {
            panic!("expected a declared charset");
        };
        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn detect_charset_from_content_type() {
        let html = br#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1"></head><body>Test</body></html>"#;
        let Some(encoding) = detect_declared_encoding(html) else {
            panic!("expected a declared charset");
        };
        // encoding_rs maps ISO-8859-1 to windows-1252 per the WHATWG Encoding Standard
        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn no_declaration_without_charset() {
        let html = b"<html><body>Test</body></html>";
        assert_eq!(detect_declared_encoding(html), None);
    }

    #[test]
    fn transcode_utf8_passthrough() {
        let html = b"<html><body>Hello, World!</body></html>";
        let result = transcode_to_utf8(html, UTF_8);
        assert_eq!(result, "<html><body>Hello, World!</body></html>");
    }

    #[test]
    fn transcode_iso88591_to_utf8() {
        // ISO-8859-1 encoded HTML with special character (é = 0xE9)
        let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
        let result = transcode_to_utf8(html, UTF_8);
        assert!(result.contains("Café"));
    }

    #[test]
    fn transcode_windows1252_to_utf8() {
        // Windows-1252 encoded HTML with smart quote (" = 0x93)
        let html = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Hello\x94</body></html>";
        let result = transcode_to_utf8(html, UTF_8);
        // Windows-1252 0x93/0x94 are left/right double quotes
        assert!(result.contains("\u{201C}Hello\u{201D}"));
    }

    #[test]
    fn transcode_uses_fallback_without_declaration() {
        let html = b"<html><body>Caf\xE9</body></html>";
        let result = transcode_to_utf8(html, encoding_rs::WINDOWS_1252);
        assert!(result.contains("Café"));
    }

    #[test]
    fn declared_charset_wins_over_fallback() {
        let html = "<html><head><meta charset=\"utf-8\"></head><body>Café</body></html>";
        let result = transcode_to_utf8(html.as_bytes(), encoding_rs::WINDOWS_1252);
        assert!(result.contains("Café"));
    }

    #[test]
    fn detect_utf16_from_bom() {
        let html = b"\xFF\xFE<\x00p\x00>\x00";
        assert_eq!(detect_declared_encoding(html), Some(encoding_rs::UTF_16LE));
    }

    #[test]
    fn handle_invalid_encoding_gracefully() {
        // Invalid UTF-8 sequence
        let html = b"<html><body>Test \xFF\xFE Invalid</body></html>";
        let result = transcode_to_utf8(html, UTF_8);
        // Should contain replacement characters but not panic
        assert!(result.contains("Test"));
        assert!(result.contains("Invalid"));
    }

    #[test]
    fn extract_charset_case_insensitive() {
        let html = "<HTML><HEAD><META CHARSET=\"UTF-8\"></HEAD></HTML>";
        let charset = extract_charset(html);
        assert_eq!(charset, Some("UTF-8".to_string()));
    }

    #[test]
    fn extract_charset_with_quotes() {
        let html = r#"<meta charset="utf-8">"#;
        let charset = extract_charset(html);
        assert_eq!(charset, Some("utf-8".to_string()));
    }

    #[test]
    fn extract_charset_without_quotes() {
        let html = "<meta charset=utf-8>";
        let charset = extract_charset(html);
        assert_eq!(charset, Some("utf-8".to_string()));
    }

    #[test]
    fn extract_content_type_charset_standard() {
        let html = r#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        let charset = extract_content_type_charset(html);
        assert_eq!(charset, Some("ISO-8859-1".to_string()));
    }

    #[test]
    fn extract_content_type_charset_case_insensitive() {
        let html = r#"<META HTTP-EQUIV="content-type" CONTENT="text/html; CHARSET=UTF-8">"#;
        let charset = extract_content_type_charset(html);
        assert_eq!(charset, Some("UTF-8".to_string()));
    }
}
