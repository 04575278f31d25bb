// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Score descending, then corpus position ascending. The second key makes
//! the order total, so ranking is reproducible regardless of how candidates
//! were collected.

use crate::types::SearchResult;
use std::cmp::Ordering;

/// Compare two search results for ranking.
///
/// Sort order:
/// 1. **Score** - higher wins
/// 2. **Doc index** - earlier post in the corpus wins
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    match b.score.partial_cmp(&a.score) {
        Some(ord) if ord != Ordering::Equal => ord,
        _ => a.doc_index.cmp(&b.doc_index),
    }
}

/// Sort in place and keep the top `limit`.
pub fn rank_results(results: &mut Vec<SearchResult>, limit: usize) {
    results.sort_by(compare_results);
    results.truncate(limit);
}
