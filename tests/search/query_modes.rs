//! Empty, too-short, stop-word and unknown-term queries.

use crate::common::{engine_with, ids, jekyll_corpus, loaded_engine, search};
use postdex::{Document, SearchConfig};

#[test]
fn test_empty_query_browses_everything() {
    let engine = loaded_engine(jekyll_corpus());
    let results = search(&engine, "");

    assert_eq!(ids(&results), vec!["d1", "d2", "d3"]);
    assert!(results.iter().all(|r| r.score == 0.0));
    assert!(results.iter().all(|r| r.matched_terms.is_empty()));
}

#[test]
fn test_browse_all_ignores_max_results() {
    let mut config = SearchConfig::default();
    config.query.max_results = 1;
    let engine = engine_with(config);
    engine.initialize(jekyll_corpus()).unwrap();
    assert_eq!(search(&engine, "").len(), 3);
}

#[test]
fn test_short_and_blank_queries_return_nothing() {
    let engine = loaded_engine(jekyll_corpus());
    assert!(search(&engine, "j").is_empty());
    assert!(search(&engine, " ").is_empty());
    assert!(search(&engine, "   j   ").is_empty());
}

#[test]
fn test_query_is_trimmed_before_length_check() {
    let engine = loaded_engine(vec![Document::new("a", "Go tips")]);
    assert_eq!(ids(&search(&engine, "  go  ")), vec!["a"]);
}

#[test]
fn test_stop_word_only_query_returns_nothing() {
    let engine = loaded_engine(jekyll_corpus());
    assert!(search(&engine, "to with").is_empty());
}

#[test]
fn test_unknown_terms_return_nothing() {
    let engine = loaded_engine(jekyll_corpus());
    assert!(search(&engine, "kubernetes").is_empty());
}

#[test]
fn test_case_and_diacritics_folded() {
    let engine = loaded_engine(vec![Document::new("a", "Café culture")]);
    assert_eq!(ids(&search(&engine, "CAFE")), vec!["a"]);
    assert_eq!(ids(&search(&engine, "café")), vec!["a"]);
}

#[test]
fn test_exact_phrase_keeps_diacritics() {
    let engine = loaded_engine(vec![Document::new("a", "Café culture")]);
    let accented = search(&engine, "café");
    assert_eq!(accented[0].exact_match_count, 1);
    assert_eq!(accented[0].score, 6.0);

    let plain = search(&engine, "cafe");
    assert_eq!(plain[0].exact_match_count, 0);
    assert_eq!(plain[0].score, 3.0);
}

#[test]
fn test_cjk_runs_are_searchable() {
    let engine = loaded_engine(vec![
        Document::new("zh", "静态网站").with_categories(["博客"]),
        Document::new("en", "Static site"),
    ]);
    assert_eq!(ids(&search(&engine, "博客")), vec!["zh"]);
}

#[test]
fn test_repeated_query_terms_count_once() {
    let engine = loaded_engine(jekyll_corpus());
    let once = search(&engine, "jekyll");
    let twice = search(&engine, "jekyll jekyll");
    assert_eq!(once[0].matched_terms, twice[0].matched_terms);
    // Exact phrase "jekyll jekyll" is absent, so only the base survives
    assert_eq!(twice[0].score, 5.0);
}

#[test]
fn test_search_before_initialize_is_empty() {
    let engine = crate::common::engine();
    assert!(search(&engine, "").is_empty());
    assert!(search(&engine, "jekyll").is_empty());
}
