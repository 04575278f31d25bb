// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! ```text
//! base     = Σ_terms (title×wT + content×wC + category×wCat + tag×wTag)
//! exact    = base × exact_match_bonus          if the raw query is a substring
//! recency  = exact + bonus × (window − days)   if days < window
//! final    = recency × (0.5 + 0.5 × matched / query_terms)
//! ```
//!
//! The order matters: recency is added after the exact multiplier so a
//! fresh post doesn't get its freshness doubled, and coverage scales
//! everything so a partial match can never beat an otherwise equal full match.

use crate::config::{FieldWeights, ScoringConfig};
use crate::types::{Document, FieldCounts};
use crate::utils::contains_folded;
use chrono::{DateTime, Utc};

/// Floor of the coverage factor: matching any fraction of the query keeps
/// at least half the score.
pub const COVERAGE_FLOOR: f64 = 0.5;

/// Seconds in a day, for whole-day age computation.
const SECONDS_PER_DAY: i64 = 86_400;

/// Weighted sum of one term's field counts.
#[inline]
pub fn field_score(counts: &FieldCounts, weights: &FieldWeights) -> f64 {
    f64::from(counts.title) * weights.title
        + f64::from(counts.content) * weights.content
        + f64::from(counts.category) * weights.category
        + f64::from(counts.tag) * weights.tag
}

/// How many fields of a post contain the folded query verbatim.
///
/// Checks title, the full content (not the truncated indexing window), every
/// category and every tag. An empty needle never matches.
pub fn exact_phrase_fields(doc: &Document, folded_query: &[char]) -> u32 {
    if folded_query.is_empty() {
        return 0;
    }
    let mut count = 0;
    if contains_folded(&doc.title, folded_query) {
        count += 1;
    }
    if contains_folded(&doc.content, folded_query) {
        count += 1;
    }
    count += doc
        .categories
        .iter()
        .filter(|c| contains_folded(c, folded_query))
        .count() as u32;
    count += doc
        .tags
        .iter()
        .filter(|t| contains_folded(t, folded_query))
        .count() as u32;
    count
}

/// Whole days between `date` and `now`, clamped at zero for future posts.
pub fn days_since(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ((now - date).num_seconds() / SECONDS_PER_DAY).max(0)
}

/// Linear freshness bonus: maximal on publication day, zero at the window edge.
pub fn recency_bonus(date: Option<DateTime<Utc>>, now: DateTime<Utc>, config: &ScoringConfig) -> f64 {
    let Some(date) = date else {
        return 0.0;
    };
    let days = days_since(date, now);
    if days < config.recent_window_days {
        config.recent_post_bonus * (config.recent_window_days - days) as f64
    } else {
        0.0
    }
}

/// `0.5 + 0.5 × matched / total`, or 0 when there is nothing to cover.
#[inline]
pub fn coverage_factor(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    COVERAGE_FLOOR + (1.0 - COVERAGE_FLOOR) * (matched as f64 / total as f64)
}

/// Everything the final score depends on besides the accumulated base.
pub struct ScoreInputs<'a> {
    pub doc: &'a Document,
    pub base: f64,
    pub matched_terms: usize,
    pub query_terms: usize,
    pub folded_query: &'a [char],
    pub now: DateTime<Utc>,
}

/// The finished score, plus the exact-match tally reported on the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalScore {
    pub score: f64,
    pub exact_match_count: u32,
}

/// Apply exact-phrase, recency and coverage adjustments, in that order.
pub fn final_score(inputs: &ScoreInputs<'_>, config: &ScoringConfig) -> FinalScore {
    let mut score = inputs.base;

    let exact_match_count = exact_phrase_fields(inputs.doc, inputs.folded_query);
    if exact_match_count > 0 {
        score *= config.exact_match_bonus;
    }

    score += recency_bonus(inputs.doc.date, inputs.now, config);
    score *= coverage_factor(inputs.matched_terms, inputs.query_terms);

    FinalScore {
        score,
        exact_match_count,
    }
}
