//! Link Density Testing
//!
//! Measures how much of an element's text sits inside anchors. Blocks that
//! are mostly link text are navigation, tag clouds or link farms rather than
//! prose.

use crate::dom::{self, NodeRef};

/// Link text shorter than this counts as a "short" link.
const SHORT_LINK_LEN: usize = 10;

/// Text and anchor measurements for one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Characters of whitespace-normalized text in the element.
    pub text_len: usize,
    /// Characters of whitespace-normalized text inside `<a>` descendants.
    pub link_len: usize,
    /// Number of `<a>` descendants.
    pub n_links: usize,
    /// Anchors with non-empty text.
    pub n_non_empty_links: usize,
    /// Non-empty anchors shorter than ten characters.
    pub n_short_links: usize,
}

impl LinkStats {
    /// Ratio of link text to total text, `0.0` for empty elements.
    #[must_use]
    pub fn density(&self) -> f64 {
        if self.text_len == 0 {
            return 0.0;
        }
        self.link_len as f64 / self.text_len as f64
    }
}

/// Collect text and anchor measurements for an element.
#[must_use]
pub fn link_stats(element: &NodeRef) -> LinkStats {
    let mut stats = LinkStats {
        text_len: dom::normalized_text(element).chars().count(),
        ..LinkStats::default()
    };

    for link in element.descendants() {
        if !dom::has_tag(&link, "a") {
            continue;
        }
        stats.n_links += 1;

        let text_length = dom::normalized_text(&link).chars().count();
        if text_length == 0 {
            continue;
        }

        stats.link_len += text_length;
        stats.n_non_empty_links += 1;
        if text_length < SHORT_LINK_LEN {
            stats.n_short_links += 1;
        }
    }

    stats
}

/// Check whether a block is rich in links (probably boilerplate).
///
/// Short blocks are judged harshly: a paragraph under 60 characters whose
/// text is mostly links, or any block made of many tiny links, is a menu.
#[must_use]
pub fn is_link_cluster(element: &NodeRef) -> bool {
    let stats = link_stats(element);

    if stats.n_links == 0 {
        return false;
    }

    // Shortcut for single link
    if stats.n_links == 1
        && stats.link_len > 100
        && (stats.link_len as f64) > (stats.text_len as f64) * 0.9
    {
        return true;
    }

    let has_next_sibling = dom::next_element_sibling(element).is_some();

    // Prepare limit based on tag and sibling presence
    let limit_length: usize = if dom::has_tag(element, "p") {
        if has_next_sibling { 30 } else { 60 }
    } else if has_next_sibling { 100 } else { 300 };

    if stats.text_len >= limit_length {
        return false;
    }

    if stats.n_non_empty_links == 0 {
        return true;
    }

    if stats.density() > 0.8 {
        return true;
    }

    // More than 80% of links are short (< 10 chars) - typical of nav menus
    stats.n_non_empty_links > 1
        && (stats.n_short_links as f64) / (stats.n_non_empty_links as f64) > 0.8
}
