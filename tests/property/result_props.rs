//! Properties of whole result lists.

use super::strategies::{corpus, query};
use crate::common::{engine, fingerprint, loaded_engine, search};
use postdex::{tokenize, Document};
use proptest::prelude::*;
use std::collections::HashSet;

fn doc_terms(doc: &Document) -> HashSet<String> {
    let mut terms: HashSet<String> = tokenize(&doc.title).into_iter().collect();
    terms.extend(tokenize(&doc.content));
    for field in doc.categories.iter().chain(doc.tags.iter()) {
        terms.extend(tokenize(field));
    }
    terms
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every result matches at least one query term, every matched term
    /// comes from the query, and no post containing a query term is lost.
    #[test]
    fn prop_results_are_exactly_the_matching_posts(docs in corpus(1..50), q in query()) {
        prop_assume!(q.trim().chars().count() >= 2);
        let query_terms: HashSet<String> = tokenize(&q).into_iter().collect();
        let engine = loaded_engine(docs.clone());
        let results = search(&engine, &q);

        for result in results.iter() {
            prop_assert!(!result.matched_terms.is_empty());
            prop_assert!(result.matched_terms.iter().all(|t| query_terms.contains(t)));
            prop_assert!(result.score > 0.0);
        }

        let returned: HashSet<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        for doc in &docs {
            let matches = !doc_terms(doc).is_disjoint(&query_terms);
            prop_assert_eq!(matches, returned.contains(doc.id.as_str()), "post {}", doc.id);
        }
    }

    /// Scores never increase down the list; equal scores keep corpus order.
    #[test]
    fn prop_results_sorted(docs in corpus(1..120), q in query()) {
        let engine = loaded_engine(docs);
        let results = search(&engine, &q);
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].doc_index < pair[1].doc_index);
            }
        }
    }

    /// Two engines fed the same corpus give identical answers.
    #[test]
    fn prop_deterministic(docs in corpus(1..120), q in query()) {
        let a = engine();
        a.initialize(docs.clone()).unwrap();
        let b = engine();
        b.initialize(docs).unwrap();
        prop_assert_eq!(fingerprint(&search(&a, &q)), fingerprint(&search(&b, &q)));
    }

    /// `""` lists everything; anything shorter than two chars lists nothing.
    #[test]
    fn prop_empty_vs_too_short(docs in corpus(0..30), c in "[a-z ]") {
        let engine = loaded_engine(docs.clone());
        prop_assert_eq!(search(&engine, "").len(), docs.len());
        prop_assert!(search(&engine, &c).is_empty());
    }
}
