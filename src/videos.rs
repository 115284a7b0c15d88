//! Embedded video extraction.
//!
//! Players are only reported when they come from a known video host and
//! sit inside the top node; ad and tracking iframes elsewhere on the page
//! are ignored.

use url::Url;

use crate::dom::{self, NodeRef};
use crate::images::candidate::parse_dimension;
use crate::patterns::VIDEO_HOST;
use crate::result::Video;
use crate::url_utils::resolve_url;

/// Elements that embed a player.
const EMBED_TAGS: &[&str] = &["iframe", "embed", "object", "video"];

/// Source URL of an embed element.
fn embed_source(node: &NodeRef, tag: &str) -> Option<String> {
    match tag {
        "object" => dom::non_empty_attr(node, "data").or_else(|| {
            node.descendants()
                .into_iter()
                .filter(|child| {
                    dom::has_tag(child, "param")
                        && dom::attr(child, "name")
                            .is_some_and(|name| name.eq_ignore_ascii_case("movie"))
                })
                .find_map(|param| dom::non_empty_attr(&param, "value"))
        }),
        "video" => dom::non_empty_attr(node, "src").or_else(|| {
            node.children()
                .into_iter()
                .filter(|child| dom::has_tag(child, "source"))
                .find_map(|source| dom::non_empty_attr(&source, "src"))
        }),
        _ => dom::non_empty_attr(node, "src").or_else(|| dom::non_empty_attr(node, "data-src")),
    }
}

/// Collect embedded players from known hosts inside `top`, unique by URL.
#[must_use]
pub fn extract_videos(top: &NodeRef, base: Option<&Url>) -> Vec<Video> {
    let mut videos: Vec<Video> = Vec::new();

    for node in top.descendants() {
        let Some(tag) = dom::tag_name(&node) else {
            continue;
        };
        if !EMBED_TAGS.contains(&tag.as_str()) {
            continue;
        }

        let Some(src) = embed_source(&node, &tag).and_then(|src| resolve_url(&src, base)) else {
            continue;
        };
        let src = src.to_string();

        let Some(caps) = VIDEO_HOST.captures(&src) else {
            tracing::trace!(src = %src, "ignoring embed from unknown host");
            continue;
        };
        let provider = caps.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase();

        if videos.iter().any(|v| v.src == src) {
            continue;
        }

        videos.push(Video {
            width: dom::attr(&node, "width").and_then(|w| parse_dimension(&w)),
            height: dom::attr(&node, "height").and_then(|h| parse_dimension(&h)),
            src,
            provider,
            embed_type: tag,
        });
    }

    videos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn videos_in(html: &str) -> Vec<Video> {
        let doc = dom::parse(html);
        let Some(top) = doc.select("#top").nodes().first().copied() else {
            panic!("missing #top");
        };
        let base = Url::parse("https://example.com/post").ok();
        extract_videos(&top, base.as_ref())
    }

    #[test]
    fn finds_known_players() {
        let videos = videos_in(
            r#"<div id="top">
                <iframe src="//www.youtube.com/embed/abc123" width="560" height="315"></iframe>
                <object data="https://vimeo.com/moogaloop.swf?clip_id=1"></object>
                <iframe src="https://ads.example.net/frame"></iframe>
            </div>"#,
        );

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].src, "https://www.youtube.com/embed/abc123");
        assert_eq!(videos[0].provider, "youtube.com");
        assert_eq!(videos[0].embed_type, "iframe");
        assert_eq!(videos[0].width, Some(560));
        assert_eq!(videos[1].provider, "vimeo.com");
        assert_eq!(videos[1].embed_type, "object");
    }

    #[test]
    fn duplicate_players_are_reported_once() {
        let videos = videos_in(
            r#"<div id="top">
                <iframe src="https://player.vimeo.com/video/1"></iframe>
                <iframe src="https://player.vimeo.com/video/1#t=10"></iframe>
            </div>"#,
        );
        assert_eq!(videos.len(), 1);
    }

    #[test]
    fn players_outside_top_node_are_ignored() {
        let videos = videos_in(
            r#"<div id="top"><p>Text</p></div>
               <iframe src="https://www.youtube.com/embed/xyz"></iframe>"#,
        );
        assert!(videos.is_empty());
    }
}
