// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix completions for the search box.
//!
//! Candidates come from the index vocabulary first (in first-seen order,
//! so the pool is deterministic), then from post titles if the vocabulary
//! came up short. The pool is twice the requested limit so ranking has
//! something to choose from.
//!
//! Ranking: a term equal to the prefix first, then by how many posts
//! contain it, then alphabetically.

use crate::index::InvertedIndex;
use crate::tokenizer::Tokenizer;
use crate::types::Document;
use crate::utils::normalize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Prefixes shorter than this (in chars, after trimming) get no suggestions.
pub const MIN_PREFIX_LEN: usize = 2;

/// Serves prefix completions from an index snapshot. Uncached; the engine
/// wraps it with a [`crate::cache::SuggestionCache`].
#[derive(Debug, Clone)]
pub struct Suggester {
    tokenizer: Tokenizer,
}

impl Suggester {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// The normalized form a prefix is matched (and cached) under.
    pub fn normalize_prefix(prefix: &str) -> String {
        normalize(prefix.trim())
    }

    pub fn suggest(
        &self,
        corpus: &[Arc<Document>],
        index: &InvertedIndex,
        prefix: &str,
        limit: usize,
    ) -> Vec<String> {
        let prefix = Self::normalize_prefix(prefix);
        if prefix.chars().count() < MIN_PREFIX_LEN || limit == 0 {
            return Vec::new();
        }

        let pool_cap = limit.saturating_mul(2);
        let mut seen: HashSet<&str> = HashSet::new();
        let mut candidates: Vec<String> = Vec::new();

        for (_, term) in index.terms() {
            if candidates.len() >= pool_cap {
                break;
            }
            if term.starts_with(prefix.as_str()) && seen.insert(term) {
                candidates.push(term.to_string());
            }
        }

        // Fewer than 1.5 × limit: widen the pool with title terms. When the
        // index was built from `corpus` with this tokenizer every title term
        // is already in the vocabulary and this adds nothing.
        if candidates.len().saturating_mul(2) < limit.saturating_mul(3) {
            let mut title_terms: Vec<String> = Vec::new();
            'docs: for doc in corpus {
                for term in self.tokenizer.tokenize(&doc.title) {
                    if candidates.len() + title_terms.len() >= pool_cap {
                        break 'docs;
                    }
                    if term.starts_with(prefix.as_str())
                        && !seen.contains(term.as_str())
                        && !title_terms.contains(&term)
                    {
                        title_terms.push(term);
                    }
                }
            }
            candidates.extend(title_terms);
        }

        candidates.sort_by(|a, b| rank_candidates(a, b, &prefix, index));
        candidates.truncate(limit);
        candidates
    }
}

fn rank_candidates(a: &str, b: &str, prefix: &str, index: &InvertedIndex) -> Ordering {
    let a_exact = a == prefix;
    let b_exact = b == prefix;
    b_exact
        .cmp(&a_exact)
        .then_with(|| index.doc_freq(b).cmp(&index.doc_freq(a)))
        .then_with(|| a.cmp(b))
}
