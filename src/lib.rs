//! # rs-gravity
//!
//! Article extraction from arbitrary, often malformed HTML.
//!
//! Given a document and its source URL, the extractor locates the main
//! content region with a gravity-scoring pass over the cleaned tree, picks
//! the representative image, and collects document-level metadata into one
//! owned [`Article`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_gravity::extract;
//!
//! let html = r#"<html><head><title>Launch day | Example</title></head>
//! <body><div id="story"><p>The rocket lifted off at dawn, carrying two
//! satellites, a lunar probe, and a small student experiment.</p></div></body></html>"#;
//!
//! let article = extract(html, Some("https://example.com/launch"))?;
//! assert_eq!(article.title.as_deref(), Some("Launch day"));
//! assert!(article.cleaned_text.starts_with("The rocket lifted off"));
//! # Ok::<(), rs_gravity::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Cleaning**: scripts, styles, comments and boilerplate-signature
//!    elements are removed from a working copy of the document
//! 2. **Scoring**: text blocks earn a score from length and commas, half of
//!    which flows to their parent and a quarter to their grandparent
//! 3. **Top node**: the highest-scoring container, falling back to `<body>`
//! 4. **Images**: declared and in-content candidates, deduplicated and ranked
//! 5. **Metadata**: title, description, keywords, canonical link, date, authors, tags
//!
//! Extraction is deterministic and single-threaded per call. No network I/O
//! happens unless a [`Fetcher`] is supplied through [`Extractor::with_fetcher`].

mod config;
mod error;
mod extract;
mod patterns;
mod result;

/// Pre-order index of the working tree used by scoring.
pub mod arena;

/// Boilerplate removal on the working copy.
pub mod cleaner;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Image candidate discovery, probing and ranking.
pub mod images;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Metadata extraction (meta tags, Open Graph, JSON-LD).
pub mod metadata;

/// Gravity scoring of candidate text blocks.
pub mod scoring;

/// Top-node selection and readable text output.
pub mod top_node;

/// URL utilities for validation, resolution, and normalization.
pub mod url_utils;

/// Embedded video discovery.
pub mod videos;

// Public API - re-exports
pub use config::Configuration;
pub use error::{Error, FetchError, Result};
pub use extract::Extractor;
pub use images::Fetcher;
pub use result::{Article, Image, ImageOrigin, Metadata, TopNode, Video};

/// Extracts an article from an HTML document using the default configuration.
///
/// # Arguments
///
/// * `html` - The HTML document as a string slice
/// * `url` - The URL the document was fetched from, if known
///
/// # Example
///
/// ```rust
/// use rs_gravity::extract;
///
/// let article = extract("<html><body><script>track()</script></body></html>", None)?;
/// assert!(article.top_node.is_none());
/// assert!(article.cleaned_text.is_empty());
/// # Ok::<(), rs_gravity::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract(html: &str, url: Option<&str>) -> Result<Article> {
    extract_with_config(html, url, &Configuration::default())
}

/// Extracts an article from an HTML document with a custom configuration.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `config` fails validation.
///
/// # Example
///
/// ```rust
/// use rs_gravity::{extract_with_config, Configuration};
///
/// let config = Configuration {
///     minimum_image_size: (200, 200),
///     ..Configuration::default()
/// };
/// let article = extract_with_config("<p>Short</p>", None, &config)?;
/// assert!(article.images.is_empty());
/// # Ok::<(), rs_gravity::Error>(())
/// ```
pub fn extract_with_config(html: &str, url: Option<&str>, config: &Configuration) -> Result<Article> {
    Extractor::new(config.clone()).extract(html, url)
}

/// Extracts an article from HTML bytes, decoding them first.
///
/// The encoding is taken from a byte order mark or a `<meta>` charset
/// declaration; documents that declare none are decoded with
/// `config.target_text_encoding`. Invalid sequences become U+FFFD.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `config` fails validation.
///
/// # Example
///
/// ```rust
/// use rs_gravity::{extract_bytes, Configuration};
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9</title></head></html>";
/// let article = extract_bytes(html, None, &Configuration::default())?;
/// assert_eq!(article.title.as_deref(), Some("Caf\u{e9}"));
/// # Ok::<(), rs_gravity::Error>(())
/// ```
pub fn extract_bytes(html: &[u8], url: Option<&str>, config: &Configuration) -> Result<Article> {
    Extractor::new(config.clone()).extract_bytes(html, url)
}
