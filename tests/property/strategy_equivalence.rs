//! Differential testing: index-driven vs scan vs the oracle.
//!
//! Corpus sizes straddle the 100-post threshold so `Auto` exercises both
//! paths.

use super::oracles::oracle_search;
use super::strategies::{corpus, query};
use crate::common::reference_now;
use postdex::search::QueryProcessor;
use postdex::{
    build_index, IndexConfig, QueryConfig, ScoringConfig, SearchStrategy, Tokenizer,
};
use proptest::prelude::*;
use std::sync::Arc;

fn processor() -> QueryProcessor {
    QueryProcessor::new(
        Tokenizer::default(),
        ScoringConfig::default(),
        QueryConfig {
            max_results: 1000,
            ..QueryConfig::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Both strategies agree bit-for-bit on ids, order and scores.
    #[test]
    fn prop_strategies_agree(docs in corpus(1..180), q in query()) {
        let docs: Vec<_> = docs.into_iter().map(Arc::new).collect();
        let index = build_index(&docs, &Tokenizer::default(), &IndexConfig::default());
        let p = processor();
        let trimmed = q.trim();
        prop_assume!(trimmed.chars().count() >= 2);

        let now = reference_now();
        let scan = p.search_with(&docs, &index, trimmed, now, SearchStrategy::Scan);
        let driven = p.search_with(&docs, &index, trimmed, now, SearchStrategy::IndexDriven);

        prop_assert_eq!(scan.len(), driven.len());
        for (a, b) in scan.iter().zip(driven.iter()) {
            prop_assert_eq!(&a.document.id, &b.document.id);
            prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
            prop_assert_eq!(&a.matched_terms, &b.matched_terms);
            prop_assert_eq!(a.field_match_counts, b.field_match_counts);
        }
    }

    /// The engine's ranking matches the brute-force oracle.
    #[test]
    fn prop_engine_matches_oracle(docs in corpus(1..140), q in query()) {
        let shared: Vec<_> = docs.iter().cloned().map(Arc::new).collect();
        let index = build_index(&shared, &Tokenizer::default(), &IndexConfig::default());
        let now = reference_now();

        let got: Vec<(String, f64)> = processor()
            .search(&shared, &index, &q, now)
            .iter()
            .map(|r| (r.document.id.clone(), r.score))
            .collect();
        let expected = oracle_search(&docs, &q, &ScoringConfig::default(), 1000, now);

        prop_assert_eq!(got.len(), expected.len(), "query {:?}", q);
        for ((got_id, got_score), (want_id, want_score)) in got.iter().zip(expected.iter()) {
            prop_assert_eq!(got_id, want_id, "query {:?}", q);
            prop_assert!((got_score - want_score).abs() < 1e-9);
        }
    }
}
