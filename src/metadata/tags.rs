//! Publisher tags and author names.
//!
//! Both are read from the untouched document: the cleaner removes the tag
//! lists and bylines these come from.

use dom_query::Document;

use crate::dom::{self, NodeRef};
use crate::patterns::TAG_HREF;

use super::meta_tags::{validate_metadata_name, MetaTags};

/// Tag labels longer than this are sentences, not tags.
const MAX_TAG_LEN: usize = 100;

/// Push `value` unless it is empty or already present (case-insensitive).
fn push_unique(out: &mut Vec<String>, value: String) {
    if value.is_empty() {
        return;
    }
    let lower = value.to_lowercase();
    if !out.iter().any(|existing| existing.to_lowercase() == lower) {
        out.push(value);
    }
}

/// Collect tags from `article:tag` metas, `rel="tag"` links and links to tag archives.
#[must_use]
pub fn extract_tags(doc: &Document, meta: &MetaTags) -> Vec<String> {
    let mut tags = Vec::new();

    for value in meta.all("article:tag") {
        push_unique(&mut tags, dom::normalize_whitespace(value));
    }

    for link in doc.select("a[href]").nodes() {
        let is_tag_rel = dom::attr(link, "rel").is_some_and(|rel| {
            rel.split_ascii_whitespace()
                .any(|token| token.eq_ignore_ascii_case("tag"))
        });
        let is_tag_href = dom::attr(link, "href").is_some_and(|href| TAG_HREF.is_match(&href));
        if !is_tag_rel && !is_tag_href {
            continue;
        }

        let text = dom::normalized_text(link);
        if text.chars().count() <= MAX_TAG_LEN {
            push_unique(&mut tags, text);
        }
    }

    tags
}

/// Byline text with a leading "By" removed.
fn author_text(node: &NodeRef) -> String {
    let name_node = node
        .descendants()
        .into_iter()
        .find(|n| dom::attr(n, "itemprop").is_some_and(|p| p.eq_ignore_ascii_case("name")));
    let text = match name_node {
        Some(name) => dom::normalized_text(&name),
        None => dom::normalized_text(node),
    };

    let stripped = ["By ", "by ", "BY ", "Written by "]
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .unwrap_or(&text);
    stripped.trim().to_string()
}

/// Collect author names from metas, `rel="author"` links and `itemprop="author"` elements.
///
/// `extra` names (from JSON-LD) are appended after the markup sources.
#[must_use]
pub fn extract_authors(doc: &Document, meta: &MetaTags, extra: &[String]) -> Vec<String> {
    let mut authors = Vec::new();

    let meta_names = meta.all("author").iter().chain(meta.all("article:author"));
    for name in meta_names {
        let name = dom::normalize_whitespace(name);
        if validate_metadata_name(&name) {
            push_unique(&mut authors, name);
        }
    }

    for node in doc.select(r#"[rel~="author"], [itemprop~="author"]"#).nodes() {
        if dom::has_tag(node, "link") || dom::has_tag(node, "meta") {
            continue;
        }
        let name = author_text(node);
        if validate_metadata_name(&name) {
            push_unique(&mut authors, name);
        }
    }

    for name in extra {
        push_unique(&mut authors, name.clone());
    }

    authors
}
