//! Boilerplate removal on the working copy of a document.
//!
//! The cleaner only ever removes subtrees or renames elements in place, so
//! every node it keeps retains its identity for the scoring stages.

use crate::dom::{self, Document, NodeRef, Selection};
use crate::patterns::{CONTENT_ID, NOISE_SIGNATURE};

/// Tags removed together with their children.
pub const TAGS_TO_REMOVE: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "aside", "footer", "button",
    "input", "select", "textarea", "svg", "canvas", "link", "meta",
];

/// Elements never removed by id/class signature.
const PROTECTED_TAGS: &[&str] = &["html", "head", "body", "article"];

/// Children that make a `<div>` a layout container rather than a text block.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "fieldset",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "img", "li", "main", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// What the cleaner did to a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Elements removed because of their tag.
    pub removed_by_tag: usize,
    /// Elements removed because of id/class signature or hidden markup.
    pub removed_by_signature: usize,
    /// Text-only `<div>` elements renamed to `<p>`.
    pub divs_to_paragraphs: usize,
}

/// Clean the working copy of a document in place.
pub fn clean_document(doc: &Document) -> CleanStats {
    let mut stats = CleanStats::default();

    dom::remove_comments(doc);

    let by_tag = doc.select(&TAGS_TO_REMOVE.join(", "));
    stats.removed_by_tag = by_tag.length();
    by_tag.remove();

    let Some(body) = dom::body(doc) else {
        return stats;
    };

    let noisy: Vec<NodeRef> = body
        .descendants()
        .into_iter()
        .filter(|node| node.is_element() && is_noise(node))
        .collect();
    stats.removed_by_signature = noisy.len();
    for node in noisy {
        node.remove_from_parent();
    }

    stats.divs_to_paragraphs = convert_text_divs(&body);

    tracing::debug!(
        removed_by_tag = stats.removed_by_tag,
        removed_by_signature = stats.removed_by_signature,
        divs_to_paragraphs = stats.divs_to_paragraphs,
        "cleaned document"
    );

    stats
}

/// Whether an element looks like boilerplate from its attributes alone.
#[must_use]
pub fn is_noise(node: &NodeRef) -> bool {
    let Some(tag) = dom::tag_name(node) else {
        return false;
    };
    if PROTECTED_TAGS.contains(&tag.as_str()) {
        return false;
    }

    if dom::is_hidden(node) {
        return true;
    }

    let id = dom::attr(node, "id").unwrap_or_default();
    if !id.is_empty() && NOISE_SIGNATURE.is_match(&id) {
        return true;
    }

    let class_and_name = [dom::attr(node, "class"), dom::attr(node, "name")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    class_and_name
        .split_whitespace()
        .any(|token| NOISE_SIGNATURE.is_match(token))
        && !CONTENT_ID.is_match(&id)
}

/// Rename `<div>` elements holding only inline content to `<p>` so they are scored.
fn convert_text_divs(body: &NodeRef) -> usize {
    let divs: Vec<NodeRef> = body
        .descendants()
        .into_iter()
        .filter(|node| dom::has_tag(node, "div"))
        .filter(|div| {
            let has_block_child = div.children().iter().any(|child| {
                dom::tag_name(child).is_some_and(|tag| BLOCK_TAGS.contains(&tag.as_str()))
            });
            !has_block_child && !dom::text_content(div).trim().is_empty()
        })
        .collect();

    for div in &divs {
        Selection::from(*div).rename("p");
    }

    divs.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_scripts_styles_and_comments() {
        let doc = dom::parse(
            r#"<html><head><style>p{}</style></head><body>
               <script>var tracking = 1;</script><!-- note -->
               <p>Readable</p></body></html>"#,
        );
        let stats = clean_document(&doc);

        let html = doc.html();
        assert!(!html.contains("tracking"));
        assert!(!html.contains("note"));
        assert!(html.contains("Readable"));
        assert!(stats.removed_by_tag >= 2);
    }

    #[test]
    fn removes_noise_by_class_and_id() {
        let doc = dom::parse(
            r#"<body>
                <div class="comments-area"><p>Great post!</p></div>
                <div id="footer"><p>Copyright</p></div>
                <div class="left sidebar"><p>Links</p></div>
                <div class="advertisement"><p>Buy</p></div>
                <div class="story"><p>Kept text</p></div>
            </body>"#,
        );
        let stats = clean_document(&doc);

        let text = doc.select("body").text();
        assert!(text.contains("Kept text"));
        assert!(!text.contains("Great post"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("Links"));
        assert!(!text.contains("Buy"));
        assert_eq!(stats.removed_by_signature, 4);
    }

    #[test]
    fn form_wrapper_keeps_content_but_loses_controls() {
        let doc = dom::parse(
            r#"<body><form id="aspnetForm" action="/page.aspx">
                <input type="hidden" name="__VIEWSTATE" value="dDwtMTA4">
                <div id="story"><p>Story inside the page form</p></div>
                <button>Go</button>
            </form></body>"#,
        );
        clean_document(&doc);

        assert!(doc.select("form#aspnetForm").exists());
        assert!(doc.select("#story").text().contains("Story inside the page form"));
        assert!(doc.select("input").is_empty());
        assert!(doc.select("button").is_empty());
    }

    #[test]
    fn content_id_protects_wrapper_with_noisy_class() {
        let doc = dom::parse(
            r#"<body><div id="article-body" class="has-comments"><p>Story</p></div></body>"#,
        );
        clean_document(&doc);
        assert!(doc.select("#article-body").exists());
    }

    #[test]
    fn body_and_article_are_never_signature_removed() {
        let doc = dom::parse(
            r#"<body class="sidebar-left"><article class="comment-enabled"><p>Story</p></article></body>"#,
        );
        clean_document(&doc);
        assert!(doc.select("article").exists());
        assert!(doc.select("body").text().contains("Story"));
    }

    #[test]
    fn removes_hidden_elements() {
        let doc = dom::parse(
            r#"<body><div style="display:none"><p>Invisible</p></div><p>Visible</p></body>"#,
        );
        clean_document(&doc);
        let text = doc.select("body").text();
        assert!(!text.contains("Invisible"));
        assert!(text.contains("Visible"));
    }

    #[test]
    fn converts_text_only_divs_to_paragraphs() {
        let doc = dom::parse(
            r#"<body><div id="outer"><div id="inner">Plain text with <b>inline</b> markup.</div></div></body>"#,
        );
        let stats = clean_document(&doc);

        assert_eq!(stats.divs_to_paragraphs, 1);
        assert!(doc.select("p#inner").exists());
        assert!(doc.select("div#outer").exists());
    }

    #[test]
    fn original_document_is_untouched() {
        let original = dom::parse("<body><script>x()</script><p>Text</p></body>");
        let working = dom::clone_document(&original);
        clean_document(&working);

        assert!(original.select("script").exists());
        assert!(working.select("script").is_empty());
    }
}
