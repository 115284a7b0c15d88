//! Compiled regex patterns and selector constants for article extraction.
//!
//! All patterns are compiled once on first use via `LazyLock`; they are
//! immutable afterwards and safe to share between concurrent extractions.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Boilerplate Detection Patterns
// =============================================================================

/// Matches id/class/name values of non-content elements.
///
/// "ad" and "side" are anchored to token boundaries so "header", "shadow",
/// "reader" or "inside" never match.
pub static NOISE_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(comment|disqus|footer|^foot$|sidebar|^side$|advert|\bads?\b|sponsor|promo|shar(?:e|ing)[-_]?(?:bar|tools|buttons|links)|social|related|breadcrumb|navbar|menu|popup|modal|newsletter|subscribe|cookie|masthead|pagetools|utility[-_]?bar|shoutbox|retweet|combx)",
    )
    .expect("NOISE_SIGNATURE regex")
});

/// Matches ids that mark the article wrapper itself.
pub static CONTENT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|main|post|story|entry)").expect("CONTENT_ID regex")
});

/// Matches inline styles that hide an element.
pub static HIDDEN_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").expect("HIDDEN_STYLE regex")
});

// =============================================================================
// Image Patterns
// =============================================================================

/// Matches image URLs that are almost never editorial images.
pub static BAD_IMAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(sprite|icon|favicon|logo|button|badge|spacer|blank\.gif|pixel\.gif|tracking|/ads?/|adserver|doubleclick|[-_/]ad[-_.]|banner[-_]?ad|avatar|\.ico$|\.svg$)",
    )
    .expect("BAD_IMAGE_NAME regex")
});

/// Matches an HTML width/height attribute value such as `300`, `300px` or `300.5`.
pub static DIMENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,6})(?:\.\d+)?\s*(?:px)?\s*$").expect("DIMENSION regex")
});

/// Ids and classes of publisher containers known to hold the lead image.
pub const KNOWN_IMAGE_CONTAINERS: &[&str] = &[
    "yn-story-related-media",
    "cnn_strylccimg300cntr",
    "big_photo",
    "ap-smallphoto-a",
];

// =============================================================================
// Metadata Patterns
// =============================================================================

/// Matches a BCP-47 style language tag (`en`, `fra`, `pt-BR`, `zh_Hant`).
pub static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$").expect("LANGUAGE_TAG regex")
});

/// Matches hrefs of tag/topic archive pages.
pub static TAG_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(/tags?/|/topics?/|[?&]keywords?=)").expect("TAG_HREF regex")
});

/// Separators placed between an article title and the site name.
pub const TITLE_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", " » ", " :: ", " · "];

/// Hosts of embeddable video players.
pub static VIDEO_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(?:[a-z0-9-]+\.)*(youtube\.com|youtube-nocookie\.com|youtu\.be|vimeo\.com|dailymotion\.com|kewego\.com|twitch\.tv)/",
    )
    .expect("VIDEO_HOST regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));
