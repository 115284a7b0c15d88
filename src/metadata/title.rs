//! Title extraction.
//!
//! Publisher title metas are trusted as written. The `<title>` element
//! usually carries the site name as well ("Story headline | Site"), so its
//! trailing segment is stripped before it is used.

use dom_query::Document;

use crate::dom;
use crate::patterns::TITLE_SEPARATORS;

use super::meta_tags::MetaTags;

/// Title metas, in priority order.
const TITLE_KEYS: &[&str] = &["og:title", "twitter:title", "dc.title"];

/// Best title of a document.
#[must_use]
pub fn extract_title(doc: &Document, meta: &MetaTags) -> Option<String> {
    if let Some(title) = meta.first(TITLE_KEYS) {
        let title = dom::normalize_whitespace(title);
        if !title.is_empty() {
            return Some(title);
        }
    }

    let site_name = meta.first(&["og:site_name"]);
    if let Some(title) = title_element(doc) {
        return Some(strip_site_name(&title, site_name));
    }

    doc.select("h1")
        .nodes()
        .iter()
        .map(dom::normalized_text)
        .find(|text| !text.is_empty())
}

/// Whitespace-normalized text of the first non-empty `<title>`.
fn title_element(doc: &Document) -> Option<String> {
    doc.select("title")
        .nodes()
        .iter()
        .map(dom::normalized_text)
        .find(|text| !text.is_empty())
}

/// Remove a trailing site name from a `<title>` value.
///
/// With a known site name only that exact suffix is removed. Otherwise the
/// text after the last separator is dropped when it is shorter than what
/// precedes it.
#[must_use]
pub fn strip_site_name(title: &str, site_name: Option<&str>) -> String {
    if let Some(site) = site_name.map(str::trim).filter(|s| !s.is_empty()) {
        let lower_site = site.to_lowercase();
        for sep in TITLE_SEPARATORS {
            // Offsets come from the original string; case folding may change byte lengths.
            let Some(pos) = title.rfind(sep) else {
                continue;
            };
            let tail = title[pos + sep.len()..].trim();
            let head = title[..pos].trim();
            if tail.to_lowercase() == lower_site && !head.is_empty() {
                return head.to_string();
            }
        }
        return title.to_string();
    }

    let last_separator = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| title.rfind(sep).map(|pos| (pos, sep.len())))
        .max_by_key(|&(pos, _)| pos);

    let Some((pos, sep_len)) = last_separator else {
        return title.to_string();
    };

    let head = title[..pos].trim();
    let tail = title[pos + sep_len..].trim();
    if !head.is_empty() && tail.chars().count() < head.chars().count() {
        head.to_string()
    } else {
        title.to_string()
    }
}
