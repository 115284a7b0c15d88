//! Top-node selection and readable text output.

use crate::arena::NodeArena;
use crate::dom::{self, NodeRef};
use crate::link_density::is_link_cluster;
use crate::result::TopNode;
use crate::scoring::{GravityScores, MIN_TOP_NODE_SCORE};

/// Elements that start a new paragraph in the text output.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "ol",
    "p", "pre", "section", "table", "tbody", "td", "th", "thead", "tr", "ul",
];

/// Elements whose content never contributes text.
const SKIPPED_TAGS: &[&str] = &["iframe", "embed", "object", "video", "audio", "img", "picture", "head"];

/// Outcome of top-node selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selected {
    /// A scored container cleared the floor.
    Scored(usize),
    /// Nothing cleared the floor; the body is used as-is.
    BodyFallback(Option<usize>),
}

/// Pick the highest-scoring container.
///
/// Ties between a container and one of its descendants go to the
/// descendant; ties between unrelated elements go to the first in
/// document order.
#[must_use]
pub fn select_top_node(arena: &NodeArena, scores: &GravityScores) -> Selected {
    let mut best: Option<(usize, u64)> = None;

    for (slot, score) in scores.credited() {
        if score < MIN_TOP_NODE_SCORE {
            continue;
        }
        best = match best {
            None => Some((slot, score)),
            Some((best_slot, best_score)) => {
                if score > best_score
                    || (score == best_score && arena.is_descendant(slot, best_slot))
                {
                    Some((slot, score))
                } else {
                    Some((best_slot, best_score))
                }
            }
        };
    }

    match best {
        Some((slot, score)) => {
            tracing::debug!(slot, score, "selected top node");
            Selected::Scored(slot)
        }
        None => {
            tracing::debug!("no node cleared the score floor; falling back to body");
            Selected::BodyFallback(arena.body())
        }
    }
}

/// Readable text of a subtree: one paragraph per block, separated by blank lines.
///
/// Link clusters nested inside the subtree (menus, tag lists) are skipped.
#[must_use]
pub fn output_text(node: &NodeRef) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    collect_text(node, &mut paragraphs, &mut current);
    flush(&mut paragraphs, &mut current);
    paragraphs.join("\n\n")
}

fn collect_text(node: &NodeRef, paragraphs: &mut Vec<String>, current: &mut String) {
    for child in node.children() {
        if child.is_text() {
            current.push_str(&child.text());
            continue;
        }

        let Some(tag) = dom::tag_name(&child) else {
            continue;
        };
        if SKIPPED_TAGS.contains(&tag.as_str()) {
            continue;
        }

        if BLOCK_TAGS.contains(&tag.as_str()) {
            flush(paragraphs, current);
            if !is_link_cluster(&child) {
                collect_text(&child, paragraphs, current);
            }
            flush(paragraphs, current);
        } else {
            collect_text(&child, paragraphs, current);
        }
    }
}

fn flush(paragraphs: &mut Vec<String>, current: &mut String) {
    let paragraph = dom::normalize_whitespace(current);
    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }
    current.clear();
}

/// Capture an owned snapshot of the selected element.
#[must_use]
pub fn snapshot(arena: &NodeArena, scores: &GravityScores, slot: usize) -> Option<TopNode> {
    let entry = arena.get(slot)?;
    Some(TopNode {
        index: slot,
        tag: entry.tag.clone(),
        id: dom::attr(&entry.node, "id"),
        class: dom::attr(&entry.node, "class"),
        gravity: scores.get(slot),
        html: dom::outer_html(&entry.node).to_string(),
    })
}
