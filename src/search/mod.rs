// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query processing: from a query string to a ranked result list.
//!
//! Three outcomes, easy to conflate:
//! - `""` is browse-all: every post, score 0, corpus order
//! - a query whose trimmed length is below the minimum returns nothing
//! - everything else is tokenized, scored and ranked
//!
//! Posts that match no query term never appear, whatever else they match.

pub mod strategies;

use crate::config::{QueryConfig, ScoringConfig, SearchStrategy};
use crate::index::InvertedIndex;
use crate::scoring::ranking::rank_results;
use crate::scoring::{final_score, ScoreInputs};
use crate::tokenizer::Tokenizer;
use crate::types::{DocIndex, Document, SearchResult, TermId};
use crate::utils::fold_chars;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use strategies::Accumulator;

/// What a query string asks for, before any index work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind<'q> {
    /// No query at all: list every post.
    BrowseAll,
    /// Below the minimum length: nothing.
    TooShort,
    /// A real query, trimmed.
    Terms(&'q str),
}

/// Scores queries against an index snapshot.
#[derive(Debug, Clone)]
pub struct QueryProcessor {
    tokenizer: Tokenizer,
    scoring: ScoringConfig,
    query: QueryConfig,
}

impl QueryProcessor {
    pub fn new(tokenizer: Tokenizer, scoring: ScoringConfig, query: QueryConfig) -> Self {
        Self {
            tokenizer,
            scoring,
            query,
        }
    }

    /// Classify a raw query.
    pub fn classify<'q>(&self, query: &'q str) -> QueryKind<'q> {
        if query.is_empty() {
            return QueryKind::BrowseAll;
        }
        let trimmed = query.trim();
        if trimmed.chars().count() < self.query.min_query_len {
            QueryKind::TooShort
        } else {
            QueryKind::Terms(trimmed)
        }
    }

    /// Strategy to use for a corpus of `corpus_len` posts.
    pub fn resolve_strategy(&self, corpus_len: usize) -> SearchStrategy {
        match self.query.strategy {
            SearchStrategy::Auto if corpus_len > self.query.index_threshold => {
                SearchStrategy::IndexDriven
            }
            SearchStrategy::Auto => SearchStrategy::Scan,
            forced => forced,
        }
    }

    /// Full search: classification, scoring and ranking.
    pub fn search(
        &self,
        corpus: &[Arc<Document>],
        index: &InvertedIndex,
        query: &str,
        now: DateTime<Utc>,
    ) -> Vec<SearchResult> {
        match self.classify(query) {
            QueryKind::BrowseAll => browse_all(corpus),
            QueryKind::TooShort => Vec::new(),
            QueryKind::Terms(trimmed) => {
                let strategy = self.resolve_strategy(corpus.len());
                self.search_with(corpus, index, trimmed, now, strategy)
            }
        }
    }

    /// Score a (trimmed, long enough) query with an explicit strategy.
    ///
    /// `strategy` of `Auto` is resolved against the corpus size.
    pub fn search_with(
        &self,
        corpus: &[Arc<Document>],
        index: &InvertedIndex,
        query: &str,
        now: DateTime<Utc>,
        strategy: SearchStrategy,
    ) -> Vec<SearchResult> {
        let query_terms = self.tokenizer.tokenize_unique(query);
        if query_terms.is_empty() {
            return Vec::new();
        }
        let term_ids: Vec<TermId> = query_terms
            .iter()
            .filter_map(|t| index.term_id(t))
            .collect();
        if term_ids.is_empty() {
            return Vec::new();
        }

        let weights = &self.scoring.weights;
        let accumulated = match strategy {
            SearchStrategy::IndexDriven => strategies::index_driven(index, &term_ids, weights),
            SearchStrategy::Scan => strategies::scan(index, &term_ids, weights),
            SearchStrategy::Auto => match self.resolve_strategy(corpus.len()) {
                SearchStrategy::IndexDriven => strategies::index_driven(index, &term_ids, weights),
                _ => strategies::scan(index, &term_ids, weights),
            },
        };

        let folded_query = fold_chars(query);
        let mut results: Vec<SearchResult> = accumulated
            .into_iter()
            .filter(|(_, acc)| !acc.matched.is_empty())
            .filter_map(|(doc, acc)| {
                let document = corpus.get(doc.get())?;
                Some(self.finish(document, doc, acc, index, query_terms.len(), &folded_query, now))
            })
            .collect();

        rank_results(&mut results, self.query.max_results);
        results
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        document: &Arc<Document>,
        doc_index: DocIndex,
        acc: Accumulator,
        index: &InvertedIndex,
        query_term_count: usize,
        folded_query: &[char],
        now: DateTime<Utc>,
    ) -> SearchResult {
        let scored = final_score(
            &ScoreInputs {
                doc: document,
                base: acc.base,
                matched_terms: acc.matched.len(),
                query_terms: query_term_count,
                folded_query,
                now,
            },
            &self.scoring,
        );

        let matched_terms: BTreeSet<String> = acc
            .matched
            .iter()
            .map(|&id| index.term(id).to_string())
            .collect();

        SearchResult {
            document: Arc::clone(document),
            doc_index,
            score: scored.score,
            matched_terms,
            exact_match_count: scored.exact_match_count,
            field_match_counts: acc.field_counts,
        }
    }
}

/// Every post, score 0, corpus order.
pub fn browse_all(corpus: &[Arc<Document>]) -> Vec<SearchResult> {
    corpus
        .iter()
        .enumerate()
        .map(|(i, doc)| SearchResult::unscored(Arc::clone(doc), DocIndex(i)))
        .collect()
}
