//! Metadata extraction module.
//!
//! Reads document-level facts from the untouched original document:
//! title, description, keywords, canonical link, publish date, authors,
//! tags, language, favicon and the Open Graph properties.
//!
//! Each field takes the first source that yields a value; nothing is ever
//! inferred from body text.

pub mod json_ld;
pub mod meta_tags;
pub mod tags;
pub mod title;

use dom_query::Document;
use url::Url;

use crate::dom;
use crate::patterns::LANGUAGE_TAG;
use crate::result::Metadata;
use crate::url_utils::resolve_url;

pub use json_ld::{extract_json_ld, JsonLdFacts};
pub use meta_tags::{parse_meta_date, validate_metadata_name, MetaTags};

/// Meta keys carrying the publication date, in priority order.
const PUBLISH_DATE_KEYS: &[&str] = &[
    "article:published_time",
    "og:published_time",
    "datepublished",
    "pubdate",
    "publish-date",
    "dc.date",
    "dcterms.created",
    "date",
    "sailthru.date",
];

/// Extract all metadata from a document.
///
/// # Arguments
/// * `doc` - The original, uncleaned document
/// * `base` - Base URL for resolving canonical and favicon links
#[must_use]
pub fn extract_metadata(doc: &Document, base: Option<&Url>) -> Metadata {
    let meta = MetaTags::collect(doc);
    let json_ld = extract_json_ld(doc);

    let metadata = Metadata {
        title: title::extract_title(doc, &meta),
        description: meta
            .first(&["description", "og:description"])
            .map(dom::normalize_whitespace),
        keywords: meta.first(&["keywords"]).map(|k| k.trim().to_string()),
        canonical_link: extract_canonical(doc, &meta, base),
        publish_date: extract_publish_date(doc, &meta, &json_ld),
        authors: tags::extract_authors(doc, &meta, &json_ld.authors),
        tags: tags::extract_tags(doc, &meta),
        language: extract_language(doc, &meta),
        favicon: extract_favicon(doc, base),
        opengraph: meta.opengraph(),
    };

    tracing::debug!(
        title = metadata.title.as_deref(),
        has_date = metadata.publish_date.is_some(),
        authors = metadata.authors.len(),
        tags = metadata.tags.len(),
        "extracted metadata"
    );

    metadata
}

/// `link[rel=canonical]`, then `og:url`, resolved to absolute.
fn extract_canonical(doc: &Document, meta: &MetaTags, base: Option<&Url>) -> Option<String> {
    let from_link = doc
        .select(r#"link[rel="canonical"]"#)
        .nodes()
        .iter()
        .filter_map(|link| dom::non_empty_attr(link, "href"))
        .find_map(|href| resolve_url(&href, base));

    from_link
        .or_else(|| meta.first(&["og:url"]).and_then(|u| resolve_url(u, base)))
        .map(String::from)
}

/// Publish date from metas, then `<time>` elements, then JSON-LD.
fn extract_publish_date(
    doc: &Document,
    meta: &MetaTags,
    json_ld: &JsonLdFacts,
) -> Option<chrono::DateTime<chrono::Utc>> {
    let from_meta = PUBLISH_DATE_KEYS
        .iter()
        .flat_map(|key| meta.all(key))
        .find_map(|value| parse_meta_date(value));
    if from_meta.is_some() {
        return from_meta;
    }

    let from_time = doc
        .select(r#"time[itemprop="datePublished"], time[pubdate]"#)
        .nodes()
        .iter()
        .filter_map(|time| dom::non_empty_attr(time, "datetime"))
        .find_map(|value| parse_meta_date(&value));

    from_time.or(json_ld.date_published)
}

/// Primary language subtag from `<html lang>` or the content-language header.
fn extract_language(doc: &Document, meta: &MetaTags) -> Option<String> {
    let html_lang = doc
        .select("html")
        .nodes()
        .first()
        .and_then(|html| dom::non_empty_attr(html, "lang"));

    html_lang
        .as_deref()
        .into_iter()
        .chain(meta.http_equiv("content-language"))
        .map(str::trim)
        .find(|lang| LANGUAGE_TAG.is_match(lang))
        .and_then(|lang| lang.split(['-', '_']).next())
        .map(str::to_ascii_lowercase)
}

/// First `link[rel~=icon]` href, resolved.
fn extract_favicon(doc: &Document, base: Option<&Url>) -> Option<String> {
    doc.select(r#"link[rel~="icon"]"#)
        .nodes()
        .iter()
        .filter_map(|link| dom::non_empty_attr(link, "href"))
        .find_map(|href| resolve_url(&href, base))
        .map(String::from)
}
