//! Image candidate discovery.
//!
//! Candidates come from three places, in priority order: images the
//! publisher declares in the document head, `<img>` elements in and beside
//! the top node, and publisher containers known to hold the lead image.

use url::Url;

use crate::dom::{self, Document, NodeRef};
use crate::patterns::{DIMENSION, KNOWN_IMAGE_CONTAINERS};
use crate::result::ImageOrigin;
use crate::url_utils::resolve_url;

/// Attributes holding the image URL, in lookup order.
///
/// Lazy-loading scripts move the real URL into a data attribute and leave a
/// placeholder (or nothing) in `src`.
const SOURCE_ATTRIBUTES: &[&str] = &["src", "data-src", "data-original", "data-lazy-src"];

/// Meta properties naming the Open Graph image, in lookup order.
const OG_IMAGE_PROPERTIES: &[&str] = &["og:image", "og:image:url", "og:image:secure_url"];

/// How close an image sits to the main content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    /// Inside the top node.
    Inside,
    /// Inside an immediate sibling of the top node.
    Sibling,
    /// Anywhere else (document head, known containers).
    Elsewhere,
}

/// An image found in the document, before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: Url,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub origin: ImageOrigin,
    pub alt: Option<String>,
    pub proximity: Proximity,
    /// Position among the candidates of the same source, in document order.
    pub position: usize,
}

impl Candidate {
    /// Both dimensions, when known.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

/// Parse a `width`/`height` attribute value (`300`, `300px`, `300.0`).
#[must_use]
pub fn parse_dimension(value: &str) -> Option<u32> {
    let caps = DIMENSION.captures(value)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Content of the first `<meta>` whose `property` or `name` is `key`.
fn meta_content(doc: &Document, key: &str) -> Option<String> {
    let selector = format!(r#"meta[property="{key}"], meta[name="{key}"]"#);
    doc.select(&selector)
        .nodes()
        .iter()
        .find_map(|meta| dom::non_empty_attr(meta, "content"))
}

/// Images the publisher declared in the head: Open Graph, then `image_src`.
#[must_use]
pub fn declared_candidates(doc: &Document, base: Option<&Url>) -> Vec<Candidate> {
    let mut out = Vec::new();

    let og_url = OG_IMAGE_PROPERTIES
        .iter()
        .filter_map(|property| meta_content(doc, property))
        .find_map(|value| resolve_url(&value, base));
    if let Some(url) = og_url {
        out.push(Candidate {
            url,
            width: meta_content(doc, "og:image:width").and_then(|v| parse_dimension(&v)),
            height: meta_content(doc, "og:image:height").and_then(|v| parse_dimension(&v)),
            origin: ImageOrigin::OgTag,
            alt: meta_content(doc, "og:image:alt"),
            proximity: Proximity::Elsewhere,
            position: 0,
        });
    } else if meta_content(doc, "og:image").is_some() {
        tracing::trace!("ignoring og:image that is not a valid URL");
    }

    let link_url = doc
        .select(r#"link[rel="image_src"]"#)
        .nodes()
        .iter()
        .filter_map(|link| dom::non_empty_attr(link, "href"))
        .find_map(|href| resolve_url(&href, base));
    if let Some(url) = link_url {
        out.push(Candidate {
            url,
            width: None,
            height: None,
            origin: ImageOrigin::LinkTag,
            alt: None,
            proximity: Proximity::Elsewhere,
            position: 0,
        });
    }

    out
}

/// Build a candidate from an `<img>` element; `None` when it has no usable source.
fn from_img(
    img: &NodeRef,
    base: Option<&Url>,
    origin: ImageOrigin,
    proximity: Proximity,
    position: usize,
) -> Option<Candidate> {
    // A `data:` placeholder in `src` defers to the lazy-load attributes.
    let Some(url) = SOURCE_ATTRIBUTES
        .iter()
        .filter_map(|name| dom::non_empty_attr(img, name))
        .find_map(|src| resolve_url(&src, base))
    else {
        tracing::trace!("skipping img without a usable source");
        return None;
    };

    Some(Candidate {
        url,
        width: dom::attr(img, "width").and_then(|v| parse_dimension(&v)),
        height: dom::attr(img, "height").and_then(|v| parse_dimension(&v)),
        origin,
        alt: dom::non_empty_attr(img, "alt"),
        proximity,
        position,
    })
}

/// `<img>` elements at or below `node`, in document order.
fn images_within<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    if dom::has_tag(node, "img") {
        return vec![*node];
    }
    node.descendants()
        .into_iter()
        .filter(|n| dom::has_tag(n, "img"))
        .collect()
}

/// Images inside the top node, then in its previous and next element siblings.
#[must_use]
pub fn content_candidates(top: &NodeRef, base: Option<&Url>) -> Vec<Candidate> {
    let mut sources: Vec<(NodeRef, Proximity)> = images_within(top)
        .into_iter()
        .map(|img| (img, Proximity::Inside))
        .collect();

    for sibling in [dom::previous_element_sibling(top), dom::next_element_sibling(top)]
        .into_iter()
        .flatten()
    {
        sources.extend(
            images_within(&sibling)
                .into_iter()
                .map(|img| (img, Proximity::Sibling)),
        );
    }

    sources
        .iter()
        .enumerate()
        .filter_map(|(position, (img, proximity))| {
            from_img(img, base, ImageOrigin::InContent, *proximity, position)
        })
        .collect()
}

/// Images inside publisher containers known to hold the lead image.
#[must_use]
pub fn known_container_candidates(doc: &Document, base: Option<&Url>) -> Vec<Candidate> {
    let mut out = Vec::new();

    for name in KNOWN_IMAGE_CONTAINERS {
        let selector = format!("#{name} img, .{name} img");
        for img in doc.select(&selector).nodes() {
            let position = out.len();
            if let Some(candidate) = from_img(
                img,
                base,
                ImageOrigin::KnownContainer,
                Proximity::Elsewhere,
                position,
            ) {
                out.push(candidate);
            }
        }
    }

    out
}
