//! Image candidate scoring and ranking.

use crate::patterns::BAD_IMAGE_NAME;
use crate::result::{Image, ImageOrigin};

use super::candidate::{Candidate, Proximity};

/// Publisher-declared Open Graph image.
const OG_BONUS: i32 = 1000;
/// `<link rel="image_src">`.
const LINK_TAG_BONUS: i32 = 500;
/// Image inside a known lead-image container.
const KNOWN_CONTAINER_BONUS: i32 = 80;
const INSIDE_TOP_NODE_BONUS: i32 = 30;
const SIBLING_BONUS: i32 = 15;
/// Pixels per size point.
const AREA_PER_POINT: u64 = 2500;
const MAX_SIZE_POINTS: u64 = 100;
const MAX_ORDER_BONUS: usize = 10;
const BAD_NAME_PENALTY: i32 = -50;

/// Candidates must reach this score to become the top image.
pub const TOP_IMAGE_THRESHOLD: i32 = 30;

/// Confidence score of one candidate.
#[must_use]
pub fn score(candidate: &Candidate) -> i32 {
    let mut score = match candidate.origin {
        ImageOrigin::OgTag => OG_BONUS,
        ImageOrigin::LinkTag => LINK_TAG_BONUS,
        ImageOrigin::KnownContainer => KNOWN_CONTAINER_BONUS,
        ImageOrigin::InContent | ImageOrigin::Probed => 0,
    };

    score += match candidate.proximity {
        Proximity::Inside => INSIDE_TOP_NODE_BONUS,
        Proximity::Sibling => SIBLING_BONUS,
        Proximity::Elsewhere => 0,
    };

    if let Some((width, height)) = candidate.dimensions() {
        let area = u64::from(width) * u64::from(height);
        // Bounded by MAX_SIZE_POINTS, so the cast is lossless.
        score += (area / AREA_PER_POINT).min(MAX_SIZE_POINTS) as i32;
    }

    if !candidate.origin.is_declared() {
        score += MAX_ORDER_BONUS.saturating_sub(candidate.position) as i32;
    }

    if BAD_IMAGE_NAME.is_match(candidate.url.as_str()) {
        score += BAD_NAME_PENALTY;
    }

    score
}

/// Whether a candidate falls below the minimum size.
///
/// Only candidates with both dimensions known can be rejected, and declared
/// images never are.
#[must_use]
pub fn is_too_small(candidate: &Candidate, minimum: (u32, u32)) -> bool {
    if candidate.origin.is_declared() {
        return false;
    }
    candidate
        .dimensions()
        .is_some_and(|(w, h)| w < minimum.0 || h < minimum.1)
}

/// Score, filter and order candidates, best first.
///
/// Candidates arrive deduplicated. An Open Graph image is always placed
/// first; the remaining order is by score with ties kept in discovery order.
#[must_use]
pub fn rank(candidates: Vec<Candidate>, minimum: (u32, u32)) -> Vec<Image> {
    let mut images: Vec<Image> = candidates
        .into_iter()
        .filter(|candidate| {
            let small = is_too_small(candidate, minimum);
            if small {
                tracing::trace!(src = %candidate.url, "rejecting image below minimum size");
            }
            !small
        })
        .map(|candidate| Image {
            score: score(&candidate),
            src: candidate.url.to_string(),
            width: candidate.width,
            height: candidate.height,
            origin: candidate.origin,
            alt: candidate.alt,
        })
        .collect();

    images.sort_by(|a, b| {
        let a_og = a.origin == ImageOrigin::OgTag;
        let b_og = b.origin == ImageOrigin::OgTag;
        b_og.cmp(&a_og).then(b.score.cmp(&a.score))
    });

    images
}

/// The representative image: a declared Open Graph image, or a confident first entry.
#[must_use]
pub fn top_image(ranked: &[Image]) -> Option<Image> {
    let first = ranked.first()?;
    (first.origin == ImageOrigin::OgTag || first.score >= TOP_IMAGE_THRESHOLD)
        .then(|| first.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn candidate(src: &str, origin: ImageOrigin, dims: Option<(u32, u32)>) -> Candidate {
        let url = match Url::parse(src) {
            Ok(url) => url,
            Err(err) => panic!("bad url {src}: {err}"),
        };
        Candidate {
            url,
            width: dims.map(|d| d.0),
            height: dims.map(|d| d.1),
            origin,
            alt: None,
            proximity: if origin.is_declared() {
                Proximity::Elsewhere
            } else {
                Proximity::Inside
            },
            position: 0,
        }
    }

    #[test]
    fn size_points_are_capped() {
        let small = candidate("http://x.com/a.jpg", ImageOrigin::InContent, Some((100, 100)));
        let huge = candidate("http://x.com/b.jpg", ImageOrigin::InContent, Some((5000, 5000)));

        assert_eq!(score(&small), 30 + 4 + 10);
        assert_eq!(score(&huge), 30 + 100 + 10);
    }

    #[test]
    fn bad_names_are_penalized() {
        let sprite = candidate("http://x.com/img/sprite.png", ImageOrigin::InContent, None);
        assert_eq!(score(&sprite), 30 + 10 - 50);
    }

    #[test]
    fn small_images_are_rejected_but_declared_ones_are_not() {
        let tiny = candidate("http://x.com/t.jpg", ImageOrigin::InContent, Some((40, 400)));
        let unknown = candidate("http://x.com/u.jpg", ImageOrigin::InContent, None);
        let og = candidate("http://x.com/o.jpg", ImageOrigin::OgTag, Some((10, 10)));

        assert!(is_too_small(&tiny, (50, 50)));
        assert!(!is_too_small(&unknown, (50, 50)));
        assert!(!is_too_small(&og, (50, 50)));
    }

    #[test]
    fn og_image_ranks_first_even_with_penalty() {
        let ranked = rank(
            vec![
                candidate("http://x.com/big.jpg", ImageOrigin::InContent, Some((2000, 2000))),
                candidate("http://x.com/logo.png", ImageOrigin::OgTag, None),
            ],
            (50, 50),
        );

        assert_eq!(ranked[0].src, "http://x.com/logo.png");
        assert_eq!(top_image(&ranked).map(|i| i.src), Some("http://x.com/logo.png".to_string()));
    }

    #[test]
    fn weak_first_entry_is_not_a_top_image() {
        let ranked = rank(
            vec![candidate("http://x.com/icon.png", ImageOrigin::InContent, None)],
            (50, 50),
        );

        assert_eq!(ranked.len(), 1);
        assert!(top_image(&ranked).is_none());
    }

    #[test]
    fn equal_scores_keep_discovery_order() {
        let ranked = rank(
            vec![
                candidate("http://x.com/1.jpg", ImageOrigin::InContent, None),
                candidate("http://x.com/2.jpg", ImageOrigin::InContent, None),
            ],
            (50, 50),
        );
        let srcs: Vec<&str> = ranked.iter().map(|i| i.src.as_str()).collect();
        assert_eq!(srcs, ["http://x.com/1.jpg", "http://x.com/2.jpg"]);
    }
}
