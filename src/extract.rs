//! Core extraction pipeline.
//!
//! Stages run strictly in sequence on one document:
//! clean -> score -> select top node -> {images, metadata} -> assemble.
//! Metadata, declared images and known containers read the untouched
//! original; everything else works on a cleaned copy.

use url::Url;

use crate::arena::NodeArena;
use crate::cleaner;
use crate::config::Configuration;
use crate::dom;
use crate::encoding;
use crate::error::{Error, Result};
use crate::images::{self, Fetcher, ImageContext};
use crate::metadata;
use crate::result::Article;
use crate::scoring::score_nodes;
use crate::top_node::{self, Selected};
use crate::url_utils::{document_base, parse_url};
use crate::videos;

/// A configured extractor, optionally able to measure images.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use rs_gravity::{Configuration, Extractor, FetchError};
/// use url::Url;
///
/// let fetcher = |url: &Url, _timeout: Duration| -> Result<Vec<u8>, FetchError> {
///     Err(FetchError::Transport(format!("offline: {url}")))
/// };
/// let config = Configuration {
///     enable_image_fetching: true,
///     ..Configuration::default()
/// };
/// let extractor = Extractor::new(config).with_fetcher(&fetcher);
/// let article = extractor.extract("<p>Hello</p>", Some("https://example.com/"))?;
/// assert_eq!(article.domain.as_deref(), Some("example.com"));
/// # Ok::<(), rs_gravity::Error>(())
/// ```
pub struct Extractor<'f> {
    config: Configuration,
    fetcher: Option<&'f dyn Fetcher>,
}

impl<'f> Extractor<'f> {
    /// Create an extractor without an image fetcher.
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            fetcher: None,
        }
    }

    /// Use `fetcher` to probe image dimensions when `enable_image_fetching` is set.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: &'f dyn Fetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// The configuration this extractor runs with.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Extract an article from an HTML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the configuration is rejected.
    pub fn extract(&self, html: &str, url: Option<&str>) -> Result<Article> {
        self.config.validate()?;
        Ok(run(html, url, &self.config, self.fetcher))
    }

    /// Extract an article from raw bytes, decoding them first.
    ///
    /// The document's own charset declaration wins; `target_text_encoding`
    /// is used when it declares none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the configuration is rejected.
    pub fn extract_bytes(&self, html: &[u8], url: Option<&str>) -> Result<Article> {
        self.config.validate()?;
        let fallback = self.config.encoding().ok_or_else(|| {
            Error::invalid_config("target_text_encoding", "unknown encoding label")
        })?;
        let html = encoding::transcode_to_utf8(html, fallback);
        Ok(run(&html, url, &self.config, self.fetcher))
    }
}

/// Parse the caller's source URL; an unusable one is logged and ignored.
fn source_url(url: Option<&str>) -> Option<Url> {
    let raw = url.map(str::trim).filter(|u| !u.is_empty())?;
    let parsed = parse_url(raw);
    if parsed.is_none() {
        tracing::warn!(url = raw, "ignoring source URL that is not an absolute http(s) URL");
    }
    parsed
}

/// Run every stage on a validated configuration.
fn run(
    html: &str,
    url: Option<&str>,
    config: &Configuration,
    fetcher: Option<&dyn Fetcher>,
) -> Article {
    let source = source_url(url);
    let span = tracing::debug_span!("extract", url = source.as_ref().map(Url::as_str));
    let _entered = span.enter();

    let original = dom::parse(html);
    let working = dom::clone_document(&original);
    cleaner::clean_document(&working);

    let arena = NodeArena::build(&working);
    let scores = score_nodes(&arena);
    let selected = top_node::select_top_node(&arena, &scores);

    let (top_slot, cleaned_text) = match selected {
        Selected::Scored(slot) => {
            let text = arena
                .get(slot)
                .map(|entry| top_node::output_text(&entry.node))
                .unwrap_or_default();
            (Some(slot), text)
        }
        Selected::BodyFallback(body) => {
            let text = body
                .and_then(|slot| arena.get(slot))
                .map(|entry| top_node::output_text(&entry.node))
                .unwrap_or_default();
            if text.is_empty() {
                (None, String::new())
            } else {
                (body, text)
            }
        }
    };

    let top = top_slot.and_then(|slot| arena.get(slot)).map(|entry| entry.node);
    let base = document_base(&original, source.as_ref());

    let image_report = images::extract_images(&ImageContext {
        original: &original,
        top_node: top,
        base: base.as_ref(),
        config,
        fetcher,
    });

    let movies = top
        .map(|node| videos::extract_videos(&node, base.as_ref()))
        .unwrap_or_default();

    let meta = metadata::extract_metadata(&original, base.as_ref());

    let article = Article {
        title: meta.title,
        meta_description: meta.description,
        meta_keywords: meta.keywords,
        canonical_link: meta.canonical_link,
        publish_date: meta.publish_date,
        authors: meta.authors,
        tags: meta.tags,
        meta_lang: meta.language.unwrap_or_else(|| config.language_code()),
        meta_favicon: meta.favicon,
        domain: source.as_ref().and_then(Url::host_str).map(str::to_string),
        final_url: source.as_ref().map(Url::to_string),
        opengraph: meta.opengraph,
        top_node: top_slot.and_then(|slot| top_node::snapshot(&arena, &scores, slot)),
        cleaned_text,
        top_image: image_report.top_image,
        images: image_report.images,
        movies,
    };

    tracing::debug!(
        top_node = article.top_node.as_ref().map(|t| t.tag.as_str()),
        text_len = article.cleaned_text.len(),
        images = article.images.len(),
        videos = article.movies.len(),
        "assembled article"
    );

    article
}
