//! Fuzzy slug matching over the registry.
//!
//! Powers "did you mean" suggestions for slugs that fail the registry
//! lookup. The metric is classic Levenshtein distance (unit costs) computed
//! case-insensitively over full strings, normalized to a confidence in
//! `[0, 1]`. Cost per query is O(R · L₁ · L₂) over the registry — fine for
//! registries in the hundreds and batch use, not meant for hot paths.

use crate::registry::{Category, Registry, Tool};

/// Matches below this confidence are never suggested.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

/// A ranked suggestion from the registry.
#[derive(Debug, Clone)]
pub struct SlugMatch<'a> {
    /// Candidate canonical slug.
    pub slug: &'a str,
    /// The record owning that slug.
    pub tool: &'a Tool,
    /// Similarity in `[0, 1]`; 1.0 only for a case-insensitive exact match.
    pub confidence: f64,
}

/// Levenshtein distance with unit insert/delete/substitute costs.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row rolling table.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Similarity between two strings: `1 - distance / max(len)`.
///
/// Distance is taken over the lowercased strings; two empty strings score
/// 1.0. The result is clamped to `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(&a.to_lowercase(), &b.to_lowercase());
    (1.0 - distance as f64 / max_len as f64).max(0.0)
}

/// Best fuzzy match for `input`, optionally restricted to one category.
///
/// Only scores strictly above [`DEFAULT_MIN_CONFIDENCE`] are considered;
/// ties keep the earliest registry entry.
pub fn find_best_match<'a>(
    registry: &'a Registry,
    input: &str,
    category: Option<Category>,
) -> Option<SlugMatch<'a>> {
    let mut best: Option<SlugMatch<'a>> = None;
    for tool in registry.tools() {
        if category.is_some_and(|c| tool.category != c) {
            continue;
        }
        let confidence = similarity(input, &tool.slug);
        if confidence <= DEFAULT_MIN_CONFIDENCE {
            continue;
        }
        if best.as_ref().is_none_or(|b| confidence > b.confidence) {
            best = Some(SlugMatch {
                slug: &tool.slug,
                tool,
                confidence,
            });
        }
    }
    best
}

/// Every candidate at or above `min_confidence`, sorted by confidence
/// descending. Equal scores keep registry order.
pub fn find_all_matches<'a>(
    registry: &'a Registry,
    input: &str,
    category: Option<Category>,
    min_confidence: f64,
) -> Vec<SlugMatch<'a>> {
    let mut matches: Vec<SlugMatch<'a>> = registry
        .tools()
        .iter()
        .filter(|tool| category.is_none_or(|c| tool.category == c))
        .filter_map(|tool| {
            let confidence = similarity(input, &tool.slug);
            (confidence >= min_confidence).then_some(SlugMatch {
                slug: &tool.slug,
                tool,
                confidence,
            })
        })
        .collect();
    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    matches
}

/// Map a display title (typically Chinese) to a slug by substring
/// containment against item titles, then tool titles. First match in
/// registry order wins — overlapping titles across tools resolve to
/// whichever appears first, so treat the result as a guess, not an answer.
pub fn map_title_to_slug<'a>(registry: &'a Registry, name: &str) -> Option<&'a str> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    for tool in registry.tools() {
        for item in &tool.items {
            let title = item.title.to_lowercase();
            if title.contains(&normalized) || normalized.contains(&title) {
                return Some(&tool.slug);
            }
        }
        let title = tool.title.to_lowercase();
        if title.contains(&normalized) || normalized.contains(&title) {
            return Some(&tool.slug);
        }
    }
    None
}
