//! URL Utility Functions
//!
//! Validation, resolution and normalization of URLs found in documents.
//! Image deduplication keys on the normalized form produced here.

use url::Url;

use crate::dom::{self, Document};

/// Check if a string is a valid absolute `http(s)` URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Resolve a possibly relative reference against an optional base and normalize it.
///
/// Returns `None` for empty references, non-http schemes (`data:`,
/// `javascript:`, `mailto:` ...) and relative references without a base.
///
/// # Examples
/// ```
/// use rs_gravity::url_utils::{parse_url, resolve_url};
///
/// let base = parse_url("http://x.com/news/story.html");
/// let resolved = resolve_url("../img/a.jpg#top", base.as_ref());
/// assert_eq!(resolved.map(|u| u.to_string()), Some("http://x.com/img/a.jpg".to_string()));
/// ```
#[must_use]
pub fn resolve_url(reference: &str, base: Option<&Url>) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    let resolved = match parse_url(reference) {
        Some(url) => url,
        None => {
            let lower = reference.to_ascii_lowercase();
            if lower.starts_with("data:")
                || lower.starts_with("javascript:")
                || lower.starts_with("mailto:")
                || lower.starts_with("tel:")
            {
                return None;
            }
            base?.join(reference).ok()?
        }
    };

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    Some(normalize(resolved))
}

/// Base URL for resolving references: `<base href>` if present, else the source URL.
#[must_use]
pub fn document_base(doc: &Document, source: Option<&Url>) -> Option<Url> {
    doc.select("base[href]")
        .nodes()
        .iter()
        .filter_map(|base| dom::non_empty_attr(base, "href"))
        .find_map(|href| resolve_url(&href, source))
        .or_else(|| source.cloned())
}

/// Normalize a URL for comparison: fragment removed.
///
/// Scheme and host casing and default ports are already canonicalized by
/// the `url` crate's parser.
#[must_use]
pub fn normalize(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}
