//! Cross-validation and selection engine.
//!
//! This is the heart of the fusion pipeline. Given the aggregated signals
//! of one request, it cross-validates textual candidates against visual
//! ones, ranks everything deterministically, and emits the final name and
//! bounded tag set.
//!
//! The algorithm, in order:
//!
//! 1. Pool visual candidates (detections before classifications, each in
//!    recognizer order) and stable-sort them by descending confidence.
//! 2. Validate textual candidates: reject short strings and denylisted
//!    no-result phrases outright, then accept a survivor only if it is
//!    consistent with one of the top sorted visual candidates. Consistency
//!    is a deliberately loose, high-recall heuristic (substring either way,
//!    or any shared word).
//! 3. Pick the name by strict priority: longest validated text (recognized
//!    text, e.g. a printed label, is more specific than a generic visual
//!    class), else the most confident visual candidate, else a placeholder.
//! 4. Collect tags from the sorted visual candidates, case-insensitively
//!    deduplicated and bounded. Textual candidates never become tags; text
//!    is reserved for the name heuristic.
//!
//! The engine is stateless and never fails: absence of any signal degrades
//! to the placeholder name and an empty tag sequence.

use crate::core::config::EngineConfig;
use crate::domain::signal::{AggregatedSignals, ClassificationResult, ScoredCandidate};
use std::collections::HashSet;
use tracing::debug;

/// Selects the final name and tag set from aggregated signals.
pub fn select(signals: &AggregatedSignals, config: &EngineConfig) -> ClassificationResult {
    let visual = sorted_visual(signals);

    let validated: Vec<&str> = signals
        .texts
        .iter()
        .map(String::as_str)
        .filter(|text| passes_basic_filters(text, config))
        .filter(|text| is_consistent(text, &visual, config.validation_pool))
        .collect();

    // Priority 1: longest validated text, first-seen winning ties.
    let mut best_text: Option<&str> = None;
    for candidate in &validated {
        let longer = match best_text {
            None => true,
            Some(current) => candidate.chars().count() > current.chars().count(),
        };
        if longer {
            best_text = Some(candidate);
        }
    }

    let name = match best_text {
        Some(text) => title_case(text),
        // Priority 2: most confident visual candidate.
        None => match visual.first() {
            Some(candidate) => title_case(&candidate.text),
            // Priority 3: nothing survived.
            None => config.placeholder_name.clone(),
        },
    };

    let tags = select_tags(&visual, config.max_tags);
    debug!(
        "selected name from {} validated text / {} visual candidates, {} tags",
        validated.len(),
        visual.len(),
        tags.len()
    );

    ClassificationResult { name, tags }
}

/// Pools and sorts visual candidates by descending confidence.
///
/// The sort is stable over the detections-then-classifications pool, so
/// confidence ties keep detector candidates ahead of classifier candidates
/// and preserve each recognizer's internal order.
fn sorted_visual(signals: &AggregatedSignals) -> Vec<&ScoredCandidate> {
    let mut pooled: Vec<&ScoredCandidate> = signals.visual_candidates().collect();
    pooled.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    pooled
}

/// Rejects textual candidates that are too short or carry a no-result phrase.
fn passes_basic_filters(text: &str, config: &EngineConfig) -> bool {
    if text.chars().count() < config.min_text_len {
        return false;
    }
    let lower = text.to_lowercase();
    !config
        .denylist
        .iter()
        .any(|phrase| lower.contains(&phrase.to_lowercase()))
}

/// Checks whether a textual candidate is semantically consistent with any
/// of the top `pool` sorted visual candidates.
///
/// Consistent means: one string is a case-insensitive substring of the
/// other, or the two share at least one whitespace-delimited word. False
/// positives are tolerated in exchange for rarely missing a genuine match.
fn is_consistent(text: &str, visual: &[&ScoredCandidate], pool: usize) -> bool {
    let text_lower = text.to_lowercase();
    let text_words: HashSet<&str> = text_lower.split_whitespace().collect();

    visual.iter().take(pool).any(|candidate| {
        let label_lower = candidate.text.to_lowercase();
        if text_lower.contains(&label_lower) || label_lower.contains(&text_lower) {
            return true;
        }
        label_lower
            .split_whitespace()
            .any(|word| text_words.contains(word))
    })
}

/// Title-cases a candidate for display: the first letter of each
/// whitespace-delimited word uppercased, subsequent letters lowercased.
/// Leading non-letters (digits, punctuation) pass through without ending
/// the word, so "20v max" renders as "20V Max".
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut upper_next = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            upper_next = true;
            out.push(ch);
        } else if !ch.is_alphabetic() {
            out.push(ch);
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Collects up to `max_tags` title-cased tags from the sorted visual
/// candidates, deduplicated case-insensitively with first occurrence
/// winning.
fn select_tags(visual: &[&ScoredCandidate], max_tags: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut tags = Vec::new();

    for candidate in visual {
        if tags.len() >= max_tags {
            break;
        }
        let tag = title_case(&candidate.text);
        if seen.insert(tag.to_lowercase()) {
            tags.push(tag);
        }
    }
    tags
}
