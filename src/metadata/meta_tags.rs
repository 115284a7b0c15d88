//! HTML Meta Tag Extraction
//!
//! Indexes every `<meta>` element of a document once, keyed by its
//! lowercased `name`, `property` or `itemprop`, so the metadata stages can
//! ask for "the first of these keys" in priority order.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use dom_query::Document;

use crate::dom;

/// Every meta value of a document, grouped by key in document order.
#[derive(Debug, Clone, Default)]
pub struct MetaTags {
    values: HashMap<String, Vec<String>>,
    http_equiv: HashMap<String, String>,
}

impl MetaTags {
    /// Index the `<meta>` elements of a document.
    #[must_use]
    pub fn collect(doc: &Document) -> Self {
        let mut tags = Self::default();

        for meta in doc.select("meta").nodes() {
            let Some(content) = dom::non_empty_attr(meta, "content") else {
                continue;
            };

            if let Some(header) = dom::non_empty_attr(meta, "http-equiv") {
                tags.http_equiv
                    .entry(header.to_ascii_lowercase())
                    .or_insert_with(|| content.clone());
            }

            for attribute in ["name", "property", "itemprop"] {
                if let Some(key) = dom::non_empty_attr(meta, attribute) {
                    tags.values
                        .entry(key.to_lowercase())
                        .or_default()
                        .push(content.clone());
                }
            }
        }

        tags
    }

    /// First value of the first key present, trying `keys` in order.
    #[must_use]
    pub fn first(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.values.get(*key).and_then(|v| v.first()))
            .map(String::as_str)
    }

    /// Every value of one key, in document order.
    #[must_use]
    pub fn all(&self, key: &str) -> &[String] {
        self.values.get(key).map_or(&[], Vec::as_slice)
    }

    /// Content of a `<meta http-equiv>` header.
    #[must_use]
    pub fn http_equiv(&self, header: &str) -> Option<&str> {
        self.http_equiv.get(header).map(String::as_str)
    }

    /// All `og:*` properties keyed without the prefix; the first value wins.
    #[must_use]
    pub fn opengraph(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .filter_map(|(key, values)| {
                let name = key.strip_prefix("og:")?;
                let value = values.first()?;
                (!name.is_empty()).then(|| (name.to_string(), value.clone()))
            })
            .collect()
    }
}

/// Check whether a metadata value looks like a person's name.
///
/// Filters out:
/// - Empty or very short names
/// - Names that look like URLs
/// - Names with too many special characters
/// - Names that look like JSON
#[must_use]
pub fn validate_metadata_name(name: &str) -> bool {
    let name = name.trim();

    // Too short
    if name.len() < 2 {
        return false;
    }

    // Too long (likely not a name)
    if name.len() > 120 {
        return false;
    }

    // Long single tokens are handles or slugs, not names
    if name.len() > 20 && !name.contains(' ') {
        return false;
    }

    // Looks like URL
    if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("www.") {
        return false;
    }

    if name.contains(".com") || name.contains(".org") || name.contains(".net") {
        return false;
    }

    // Looks like JSON
    if name.starts_with('{') || name.starts_with('[') {
        return false;
    }

    // Too many digits (likely an ID)
    let digit_count = name.chars().filter(char::is_ascii_digit).count();
    if digit_count > 3 {
        return false;
    }

    let special_count = name
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '\'' | '.'))
        .count();

    special_count <= 2
}

/// Parse a date string from meta tags, `<time>` elements or JSON-LD.
///
/// Supports RFC 3339, naive ISO 8601 datetimes, and common date-only formats.
#[must_use]
pub fn parse_meta_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    // ISO 8601 with timezone
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // RFC 2822, as emitted by some feed-driven CMSs
    if let Ok(dt) = DateTime::parse_from_rfc2822(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // ISO 8601 without timezone
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(dt.and_utc());
        }
    }

    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%B %d, %Y", // January 15, 2024
        "%b %d, %Y", // Jan 15, 2024
        "%d %B %Y",  // 15 January 2024
    ];

    for fmt in formats {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_respects_key_priority() {
        let html = r#"<head>
            <meta name="description" content="Plain description">
            <meta property="og:description" content="OG description">
            <meta name="DC.Title" content="DC Title">
        </head>"#;
        let tags = MetaTags::collect(&Document::from(html));

        assert_eq!(
            tags.first(&["og:description", "description"]),
            Some("OG description")
        );
        assert_eq!(
            tags.first(&["description", "og:description"]),
            Some("Plain description")
        );
        assert_eq!(tags.first(&["dc.title"]), Some("DC Title"));
        assert_eq!(tags.first(&["missing"]), None);
    }

    #[test]
    fn test_repeated_keys_keep_document_order() {
        let html = r#"<head>
            <meta property="article:tag" content="Rust">
            <meta property="article:tag" content="Parsing">
            <meta property="article:tag" content="">
        </head>"#;
        let tags = MetaTags::collect(&Document::from(html));

        assert_eq!(tags.all("article:tag"), ["Rust", "Parsing"]);
        assert!(tags.all("article:section").is_empty());
    }

    #[test]
    fn test_opengraph_map() {
        let html = r#"<head>
            <meta property="og:title" content="First">
            <meta property="og:title" content="Second">
            <meta property="og:type" content="article">
            <meta name="twitter:title" content="Tweet">
        </head>"#;
        let og = MetaTags::collect(&Document::from(html)).opengraph();

        assert_eq!(og.len(), 2);
        assert_eq!(og.get("title").map(String::as_str), Some("First"));
        assert_eq!(og.get("type").map(String::as_str), Some("article"));
    }

    #[test]
    fn test_http_equiv() {
        let html = r#"<head><meta http-equiv="Content-Language" content="fr-CA"></head>"#;
        let tags = MetaTags::collect(&Document::from(html));

        assert_eq!(tags.http_equiv("content-language"), Some("fr-CA"));
    }

    #[test]
    fn test_validate_metadata_name_valid() {
        assert!(validate_metadata_name("John Smith"));
        assert!(validate_metadata_name("Jean-Pierre"));
        assert!(validate_metadata_name("O'Connor"));
        assert!(validate_metadata_name("Dr. Smith"));
    }

    #[test]
    fn test_validate_metadata_name_invalid() {
        assert!(!validate_metadata_name(""));
        assert!(!validate_metadata_name("x"));
        assert!(!validate_metadata_name("https://example.com"));
        assert!(!validate_metadata_name("user@example.com"));
        assert!(!validate_metadata_name("{\"name\": \"test\"}"));
        assert!(!validate_metadata_name("1234567890"));
    }

    #[test]
    fn test_date_parsing_formats() {
        assert!(parse_meta_date("2024-03-15").is_some());
        assert!(parse_meta_date("2024-03-15T10:30:00Z").is_some());
        assert!(parse_meta_date("2024-03-15T10:30:00+02:00").is_some());
        assert!(parse_meta_date("2024-03-15 10:30:00").is_some());
        assert!(parse_meta_date("Fri, 15 Mar 2024 10:30:00 GMT").is_some());
        assert!(parse_meta_date("March 15, 2024").is_some());
        assert!(parse_meta_date("invalid date").is_none());
        assert!(parse_meta_date("").is_none());
    }

    #[test]
    fn test_timezone_is_normalized_to_utc() {
        let parsed = parse_meta_date("2024-03-15T10:30:00+02:00").map(|d| d.to_rfc3339());
        assert_eq!(parsed, Some("2024-03-15T08:30:00+00:00".to_string()));
    }
}
