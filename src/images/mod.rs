//! Image Extraction
//!
//! Finds, deduplicates and ranks the images that represent an article.
//!
//! Sources, in priority order:
//! 1. Publisher-declared images (`og:image`, `<link rel="image_src">`)
//! 2. `<img>` elements inside the top node and its immediate siblings
//! 3. Known lead-image containers, when the content holds no usable image
//!
//! Duplicates are resolved on the normalized absolute URL; the first
//! occurrence wins, so a declared image keeps its declared origin even when
//! the same file also appears in the body.

use std::collections::HashSet;

use url::Url;

use crate::config::Configuration;
use crate::dom::{Document, NodeRef};
use crate::result::{Image, ImageOrigin};

pub mod candidate;
pub mod probe;
pub mod scorer;

pub use probe::Fetcher;

use candidate::Candidate;

/// Ranked images of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageReport {
    /// Every accepted candidate, best first.
    pub images: Vec<Image>,
    /// The representative image, if one is confident enough.
    pub top_image: Option<Image>,
}

/// Inputs shared by the image stage.
pub struct ImageContext<'a> {
    /// The untouched document, for declared images and known containers.
    pub original: &'a Document,
    /// The selected top node in the working tree.
    pub top_node: Option<NodeRef<'a>>,
    /// Base URL for resolving relative image references.
    pub base: Option<&'a Url>,
    pub config: &'a Configuration,
    pub fetcher: Option<&'a dyn Fetcher>,
}

/// Collect, probe and rank the images of a document.
#[must_use]
pub fn extract_images(ctx: &ImageContext<'_>) -> ImageReport {
    let base = ctx.base;

    let mut candidates = candidate::declared_candidates(ctx.original, base);

    let content = ctx
        .top_node
        .map(|top| candidate::content_candidates(&top, base))
        .unwrap_or_default();

    if content.is_empty() {
        candidates.extend(candidate::known_container_candidates(ctx.original, base));
    } else {
        candidates.extend(content);
    }

    let mut candidates = dedupe(candidates);

    if ctx.config.enable_image_fetching {
        if let Some(fetcher) = ctx.fetcher {
            probe_candidates(&mut candidates, fetcher, ctx.config);
        }
    }

    let images = scorer::rank(candidates, ctx.config.minimum_image_size);
    let top_image = scorer::top_image(&images);

    tracing::debug!(
        images = images.len(),
        top_image = top_image.as_ref().map(|i| i.src.as_str()),
        "ranked image candidates"
    );

    ImageReport { images, top_image }
}

/// Keep the first candidate for each normalized URL.
fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.url.as_str().to_string()))
        .collect()
}

/// Measure candidates with unknown dimensions, up to the configured limit.
fn probe_candidates(candidates: &mut [Candidate], fetcher: &dyn Fetcher, config: &Configuration) {
    let pending = candidates
        .iter_mut()
        .filter(|c| c.dimensions().is_none())
        .take(config.max_probed_images);

    for candidate in pending {
        match probe::probe(fetcher, &candidate.url, config.image_fetch_timeout) {
            Ok((width, height)) => {
                candidate.width = Some(width);
                candidate.height = Some(height);
                if candidate.origin == ImageOrigin::InContent {
                    candidate.origin = ImageOrigin::Probed;
                }
            }
            Err(err) => {
                tracing::warn!(src = %candidate.url, error = %err, "image probe failed");
            }
        }
    }
}
