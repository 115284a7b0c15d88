//! Gravity scoring of candidate text blocks.
//!
//! Every candidate block (`p`, `pre`, `td`, `blockquote`, `dd`) with enough
//! text earns a base score from its length and comma count. Half of that is
//! credited to its parent element and a quarter to its grandparent; the
//! containers collecting the most credit are where the article lives.
//!
//! Scores are integers in hundredths of a point. Integer addition is
//! associative, so the accumulated totals do not depend on the order in which
//! candidates are visited.

use crate::arena::NodeArena;
use crate::dom;
use crate::link_density::link_stats;

/// Tags whose text is scored directly.
pub const CANDIDATE_TAGS: &[&str] = &["p", "pre", "td", "blockquote", "dd"];

/// Candidates with less text than this are ignored.
pub const MIN_CANDIDATE_TEXT_LEN: usize = 25;

/// Candidates whose link text exceeds this share of their text are ignored.
pub const MAX_LINK_DENSITY: f64 = 0.5;

/// Containers must accumulate at least this much to become the top node.
pub const MIN_TOP_NODE_SCORE: u64 = 50;

/// One point, in score units.
const POINT: u64 = 100;

/// A point per hundred characters, capped at three points.
const LENGTH_CAP: u64 = 3 * POINT;

/// Text measurements of a scored candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStats {
    /// Characters of whitespace-normalized text.
    pub text_len: usize,
    /// Number of commas (`,` `，` `、`).
    pub comma_count: usize,
    /// Characters of text inside anchors.
    pub link_text_len: usize,
    /// Score after the link penalty, before propagation.
    pub base_score: u64,
}

/// Accumulated gravity per arena slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityScores {
    scores: Vec<u64>,
    stats: Vec<Option<NodeStats>>,
}

impl GravityScores {
    /// Accumulated score of a slot (zero when nothing was credited).
    #[must_use]
    pub fn get(&self, slot: usize) -> u64 {
        self.scores.get(slot).copied().unwrap_or(0)
    }

    /// Measurements of a slot, if it was scored as a candidate.
    #[must_use]
    pub fn stats(&self, slot: usize) -> Option<&NodeStats> {
        self.stats.get(slot).and_then(Option::as_ref)
    }

    /// Number of candidates that passed every filter.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.stats.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate `(slot, score)` for every credited slot, in document order.
    pub fn credited(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, score)| score > 0)
    }
}

/// Count commas, including the CJK full-width and ideographic forms.
#[must_use]
pub fn count_commas(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, ',' | '，' | '、')).count()
}

/// Score of a block from its text length and comma count.
///
/// One point, a point per comma, and a point per hundred characters up to three.
#[must_use]
pub fn base_score(text_len: usize, comma_count: usize) -> u64 {
    let length_part = (text_len as u64).min(LENGTH_CAP);
    POINT + POINT * comma_count as u64 + length_part
}

/// Measure and score one candidate; `None` when it is too short or too link heavy.
#[must_use]
pub fn score_candidate(text: &str, link_text_len: usize) -> Option<NodeStats> {
    let text_len = text.chars().count();
    if text_len < MIN_CANDIDATE_TEXT_LEN {
        return None;
    }

    let link_text_len = link_text_len.min(text_len);
    if link_text_len as f64 > text_len as f64 * MAX_LINK_DENSITY {
        return None;
    }

    let comma_count = count_commas(text);
    let raw = base_score(text_len, comma_count);
    let base_score = raw * (text_len - link_text_len) as u64 / text_len as u64;

    Some(NodeStats {
        text_len,
        comma_count,
        link_text_len,
        base_score,
    })
}

/// Score every candidate in the arena and propagate credit to its ancestors.
#[must_use]
pub fn score_nodes(arena: &NodeArena) -> GravityScores {
    let mut scores = vec![0_u64; arena.len()];
    let mut stats = vec![None; arena.len()];

    for (slot, entry) in arena.iter() {
        if !CANDIDATE_TAGS.contains(&entry.tag.as_str()) {
            continue;
        }

        let Some(parent) = creditable(arena, entry.parent) else {
            tracing::trace!(slot, tag = %entry.tag, "skipping candidate without a scorable parent");
            continue;
        };

        let text = dom::normalized_text(&entry.node);
        let links = link_stats(&entry.node);
        let Some(node_stats) = score_candidate(&text, links.link_len) else {
            continue;
        };

        scores[parent] += node_stats.base_score / 2;
        if let Some(grandparent) = creditable(arena, arena.parent(parent)) {
            scores[grandparent] += node_stats.base_score / 4;
        }
        stats[slot] = Some(node_stats);
    }

    let result = GravityScores { scores, stats };
    tracing::debug!(candidates = result.candidate_count(), "scored candidate nodes");
    result
}

/// Ancestors above `<body>` never collect credit.
fn creditable(arena: &NodeArena, slot: Option<usize>) -> Option<usize> {
    let slot = slot?;
    let entry = arena.get(slot)?;
    (entry.tag != "html" && entry.tag != "head").then_some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn slot(arena: &NodeArena, doc: &Document, selector: &str) -> usize {
        let Some(node) = doc.select(selector).nodes().first().copied() else {
            panic!("selector {selector} matched nothing");
        };
        match arena.slot_of(node.id) {
            Some(slot) => slot,
            None => panic!("{selector} not in arena"),
        }
    }

    #[test]
    fn base_score_grows_with_length_and_commas() {
        assert_eq!(base_score(0, 0), 100);
        assert_eq!(base_score(150, 0), 250);
        assert_eq!(base_score(1_000, 0), 400);
        assert_eq!(base_score(150, 2), 450);
        assert!(base_score(200, 1) > base_score(200, 0));
    }

    #[test]
    fn count_commas_handles_cjk() {
        assert_eq!(count_commas("a, b，c、d"), 3);
        assert_eq!(count_commas("none"), 0);
    }

    #[test]
    fn short_text_is_not_a_candidate() {
        assert!(score_candidate("Too short.", 0).is_none());
    }

    #[test]
    fn link_heavy_text_is_excluded() {
        let text = "x".repeat(100);
        assert!(score_candidate(&text, 60).is_none());
        assert!(score_candidate(&text, 50).is_some());
    }

    #[test]
    fn links_reduce_score_proportionally() {
        let text = "y".repeat(200);
        let plain = score_candidate(&text, 0).map(|s| s.base_score);
        let linked = score_candidate(&text, 50).map(|s| s.base_score);
        assert_eq!(plain, Some(300));
        assert_eq!(linked, Some(225));
    }

    #[test]
    fn propagation_halves_then_quarters() {
        let para = "word ".repeat(100);
        let html = format!(
            r#"<html><body><div id="outer"><div id="inner"><p id="para">{para}</p></div></div></body></html>"#
        );
        let doc = dom::parse(&html);
        let arena = NodeArena::build(&doc);
        let scores = score_nodes(&arena);

        let para_slot = slot(&arena, &doc, "#para");
        let base = scores.stats(para_slot).map_or(0, |s| s.base_score);
        assert_eq!(base, 400);
        assert_eq!(scores.get(slot(&arena, &doc, "#inner")), 200);
        assert_eq!(scores.get(slot(&arena, &doc, "#outer")), 100);
        assert_eq!(scores.get(para_slot), 0);
        assert_eq!(scores.get(slot(&arena, &doc, "body")), 0);
    }

    #[test]
    fn credit_accumulates_across_siblings() {
        let para = "word ".repeat(100);
        let html = format!(
            r#"<html><body><div id="box"><p>{para}</p><p>{para}</p><p>{para}</p></div></body></html>"#
        );
        let doc = dom::parse(&html);
        let arena = NodeArena::build(&doc);
        let scores = score_nodes(&arena);

        assert_eq!(scores.get(slot(&arena, &doc, "#box")), 600);
        assert_eq!(scores.get(slot(&arena, &doc, "body")), 300);
        assert_eq!(scores.candidate_count(), 3);
    }

    #[test]
    fn html_element_is_never_credited() {
        let para = "word ".repeat(40);
        let html = format!("<html><body><p>{para}</p></body></html>");
        let doc = dom::parse(&html);
        let arena = NodeArena::build(&doc);
        let scores = score_nodes(&arena);

        assert_eq!(scores.get(slot(&arena, &doc, "html")), 0);
        assert!(scores.get(slot(&arena, &doc, "body")) > 0);
    }

    #[test]
    fn scoring_is_repeatable() {
        let html = r#"<body><div><p>Alpha, beta, gamma, and delta are letters of note.</p>
            <td>Cells, too, may hold prose of reasonable length.</td></div></body>"#;
        let doc = dom::parse(html);
        let arena = NodeArena::build(&doc);
        assert_eq!(score_nodes(&arena), score_nodes(&arena));
    }
}
