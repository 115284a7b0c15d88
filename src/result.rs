//! Result types for extraction output.
//!
//! An [`Article`] owns everything it reports: the top node is captured as a
//! [`TopNode`] snapshot rather than a borrow of the parsed tree, so results
//! can be compared, cloned, serialized and sent across threads freely.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an image candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageOrigin {
    /// Declared by the publisher through `<meta property="og:image">`.
    OgTag,
    /// Declared through `<link rel="image_src">`.
    LinkTag,
    /// Found inside a publisher container known to hold the lead image.
    KnownContainer,
    /// An `<img>` in or next to the top node, sized from its attributes.
    InContent,
    /// An `<img>` in or next to the top node whose size was measured by fetching it.
    Probed,
}

impl ImageOrigin {
    /// Whether the publisher explicitly named this image as representative.
    #[must_use]
    pub fn is_declared(self) -> bool {
        matches!(self, Self::OgTag | Self::LinkTag)
    }
}

/// A ranked image candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Absolute, normalized image URL.
    pub src: String,

    /// Width in pixels, declared or probed.
    pub width: Option<u32>,

    /// Height in pixels, declared or probed.
    pub height: Option<u32>,

    /// Confidence score; higher is better.
    pub score: i32,

    /// Source of the candidate.
    pub origin: ImageOrigin,

    /// Alternate text, when the markup provides one.
    pub alt: Option<String>,
}

/// Snapshot of the element selected as the root of the main content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopNode {
    /// Pre-order position of the element in the cleaned working tree.
    pub index: usize,

    /// Lowercase tag name.
    pub tag: String,

    /// `id` attribute, if any.
    pub id: Option<String>,

    /// `class` attribute, if any.
    pub class: Option<String>,

    /// Accumulated gravity score in hundredths of a point.
    pub gravity: u64,

    /// Outer HTML of the element after cleaning.
    pub html: String,
}

/// An embedded video player found in the main content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Absolute player URL.
    pub src: String,

    /// Provider host, e.g. `youtube.com`.
    pub provider: String,

    /// Tag the player was embedded with (`iframe`, `embed`, `object`, `video`).
    pub embed_type: String,

    /// Declared width in pixels.
    pub width: Option<u32>,

    /// Declared height in pixels.
    pub height: Option<u32>,
}

/// Document-level metadata.
///
/// All fields are optional as metadata may not be present in all documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Article title.
    pub title: Option<String>,

    /// Meta description.
    pub description: Option<String>,

    /// Meta keywords, verbatim.
    pub keywords: Option<String>,

    /// Canonical URL.
    pub canonical_link: Option<String>,

    /// Publication date.
    pub publish_date: Option<DateTime<Utc>>,

    /// Author names, in document order, deduplicated.
    pub authors: Vec<String>,

    /// Publisher tags, in document order, deduplicated.
    pub tags: Vec<String>,

    /// Declared document language (primary subtag, lowercase).
    pub language: Option<String>,

    /// Favicon URL.
    pub favicon: Option<String>,

    /// Every `og:*` property, keyed without the `og:` prefix; first value wins.
    pub opengraph: BTreeMap<String, String>,
}

/// Result of extracting an article from an HTML document.
///
/// Invariant: `cleaned_text` is non-empty only when `top_node` is `Some`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Article title.
    pub title: Option<String>,

    /// Meta description.
    pub meta_description: Option<String>,

    /// Meta keywords.
    pub meta_keywords: Option<String>,

    /// Canonical URL.
    pub canonical_link: Option<String>,

    /// Publication date from structured metadata.
    pub publish_date: Option<DateTime<Utc>>,

    /// Author names.
    pub authors: Vec<String>,

    /// Publisher tags.
    pub tags: Vec<String>,

    /// Document language, falling back to the configured content language.
    pub meta_lang: String,

    /// Favicon URL.
    pub meta_favicon: Option<String>,

    /// Host of the source URL.
    pub domain: Option<String>,

    /// Source URL the document was fetched from.
    pub final_url: Option<String>,

    /// Open Graph properties.
    pub opengraph: BTreeMap<String, String>,

    /// Root of the main content region.
    pub top_node: Option<TopNode>,

    /// Readable text of the main content; paragraphs separated by blank lines.
    pub cleaned_text: String,

    /// Representative image.
    pub top_image: Option<Image>,

    /// All image candidates, best first, unique by URL.
    pub images: Vec<Image>,

    /// Embedded videos in the main content.
    pub movies: Vec<Video>,
}
