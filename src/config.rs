//! Configuration for article extraction.
//!
//! The `Configuration` struct is passed explicitly to every extraction call;
//! nothing here is global, so independent calls can run in parallel.

use std::time::Duration;

use encoding_rs::Encoding;

use crate::error::{Error, Result};
use crate::patterns::LANGUAGE_TAG;

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings and call [`Configuration::validate`] (the
/// extraction entry points do this for you) to reject bad values early.
///
/// # Example
///
/// ```rust
/// use rs_gravity::Configuration;
///
/// let config = Configuration {
///     enable_image_fetching: true,
///     minimum_image_size: (100, 100),
///     ..Configuration::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Probe image bytes to measure real dimensions.
    ///
    /// Only effective when a [`Fetcher`](crate::Fetcher) is supplied through
    /// [`Extractor::with_fetcher`](crate::Extractor::with_fetcher).
    ///
    /// Default: `false`
    pub enable_image_fetching: bool,

    /// Smallest `(width, height)` an image may have when both dimensions are known.
    ///
    /// Default: `(50, 50)`
    pub minimum_image_size: (u32, u32),

    /// Language assumed when the document declares none (BCP-47 style, e.g. `en`, `pt-BR`).
    ///
    /// Default: `"en"`
    pub content_language: String,

    /// Encoding label used to decode raw bytes that declare no charset.
    ///
    /// Any label understood by `encoding_rs` is accepted.
    ///
    /// Default: `"utf-8"`
    pub target_text_encoding: String,

    /// Upper bound handed to the fetcher for each image probe.
    ///
    /// Default: 5 seconds
    pub image_fetch_timeout: Duration,

    /// Maximum number of image candidates probed per document.
    ///
    /// Default: `10`
    pub max_probed_images: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enable_image_fetching: false,
            minimum_image_size: (50, 50),
            content_language: "en".to_string(),
            target_text_encoding: "utf-8".to_string(),
            image_fetch_timeout: Duration::from_secs(5),
            max_probed_images: 10,
        }
    }
}

impl Configuration {
    /// Check every field, returning the first invalid one.
    pub fn validate(&self) -> Result<()> {
        let lang = self.content_language.trim();
        if lang.is_empty() {
            return Err(Error::invalid_config("content_language", "must not be empty"));
        }
        if !LANGUAGE_TAG.is_match(lang) {
            return Err(Error::invalid_config(
                "content_language",
                format!("`{lang}` is not a language tag such as `en` or `pt-BR`"),
            ));
        }

        if self.encoding().is_none() {
            return Err(Error::invalid_config(
                "target_text_encoding",
                format!("unknown encoding label `{}`", self.target_text_encoding),
            ));
        }

        if self.enable_image_fetching && self.image_fetch_timeout.is_zero() {
            return Err(Error::invalid_config(
                "image_fetch_timeout",
                "must be non-zero when image fetching is enabled",
            ));
        }

        Ok(())
    }

    /// Resolve `target_text_encoding` to an `encoding_rs` encoding.
    #[must_use]
    pub fn encoding(&self) -> Option<&'static Encoding> {
        Encoding::for_label(self.target_text_encoding.trim().as_bytes())
    }

    /// Primary language subtag of `content_language`, lowercased.
    pub(crate) fn language_code(&self) -> String {
        let lang = self.content_language.trim();
        lang.split(['-', '_']).next().unwrap_or(lang).to_ascii_lowercase()
    }
}
