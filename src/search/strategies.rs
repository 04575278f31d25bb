// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The two ways of turning query terms into per-post base scores.
//!
//! **Index-driven**: union the posting lists into a candidate set, then
//! score each candidate by looking its entry up in every query term's list.
//!
//! **Scan**: walk each query term's posting list once, accumulating into a
//! per-post table as entries come by.
//!
//! Both visit terms in query order for every post, so every post sees the
//! same sequence of floating-point additions and the two strategies agree
//! bit-for-bit. Both return accumulators sorted by doc index.

use crate::config::FieldWeights;
use crate::index::InvertedIndex;
use crate::scoring::field_score;
use crate::types::{DocIndex, FieldCounts, TermId};
use std::collections::{BTreeMap, BTreeSet};

/// Partial score of one post while terms are being visited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    pub base: f64,
    /// Matched terms, in query order.
    pub matched: Vec<TermId>,
    pub field_counts: FieldCounts,
}

impl Accumulator {
    #[inline]
    fn add(&mut self, term: TermId, counts: &FieldCounts, weights: &FieldWeights) {
        self.base += field_score(counts, weights);
        self.matched.push(term);
        self.field_counts.add(counts);
    }
}

/// Index-driven strategy: candidates first, then per-candidate lookups.
pub fn index_driven(
    index: &InvertedIndex,
    term_ids: &[TermId],
    weights: &FieldWeights,
) -> Vec<(DocIndex, Accumulator)> {
    let candidates: BTreeSet<DocIndex> = term_ids
        .iter()
        .flat_map(|&id| index.postings(id).entries.iter().map(|p| p.doc))
        .collect();

    candidates
        .into_iter()
        .map(|doc| {
            let mut acc = Accumulator::default();
            for &id in term_ids {
                if let Some(counts) = index.postings(id).get(doc) {
                    acc.add(id, counts, weights);
                }
            }
            (doc, acc)
        })
        .collect()
}

/// Scan strategy: one pass per term over its posting list.
pub fn scan(
    index: &InvertedIndex,
    term_ids: &[TermId],
    weights: &FieldWeights,
) -> Vec<(DocIndex, Accumulator)> {
    let mut table: BTreeMap<DocIndex, Accumulator> = BTreeMap::new();
    for &id in term_ids {
        for posting in &index.postings(id).entries {
            table
                .entry(posting.doc)
                .or_default()
                .add(id, &posting.counts, weights);
        }
    }
    table.into_iter().collect()
}
