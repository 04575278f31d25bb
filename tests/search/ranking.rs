//! Ranking: field weights, exact-phrase bonus, recency and coverage.

use crate::common::{engine_with, ids, jekyll_corpus, loaded_engine, reference_now, search};
use chrono::Duration;
use postdex::{Document, SearchConfig};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_jekyll_tie_keeps_corpus_order() {
    let engine = loaded_engine(jekyll_corpus());
    let results = search(&engine, "jekyll");

    assert_eq!(ids(&results), vec!["d1", "d2"]);
    // title + category, doubled for the verbatim phrase in both fields
    assert_eq!(results[0].score, 10.0);
    assert_eq!(results[1].score, 10.0);
    assert_eq!(results[0].exact_match_count, 2);
}

#[test]
fn test_full_coverage_beats_partial() {
    let engine = loaded_engine(jekyll_corpus());
    let results = search(&engine, "jekyll deploy");

    assert_eq!(ids(&results), vec!["d2", "d1"]);
    assert_eq!(results[0].score, 7.0);
    assert_eq!(results[1].score, 3.75);
    assert_eq!(results[0].matched_terms.len(), 2);
    assert_eq!(results[1].matched_terms.len(), 1);
}

#[test]
fn test_no_stemming_deploying_is_not_deploy() {
    let engine = loaded_engine(jekyll_corpus());
    let results = search(&engine, "deploy");
    assert_eq!(ids(&results), vec!["d2"]);
    assert_eq!(results[0].field_match_counts.title, 0);
    assert_eq!(results[0].field_match_counts.category, 1);
}

#[test]
fn test_title_outweighs_content() {
    let engine = loaded_engine(vec![
        Document::new("body", "Notes").with_content("some rust here"),
        Document::new("head", "Rust"),
    ]);
    let results = search(&engine, "rust");
    assert_eq!(ids(&results), vec!["head", "body"]);
    assert_eq!(results[0].score, 6.0);
    assert_eq!(results[1].score, 2.0);
}

#[test]
fn test_exact_phrase_bonus_applied_once() {
    let engine = loaded_engine(vec![Document::new("a", "static site")
        .with_content("A static site.")
        .with_tags(["static site"])]);
    let results = search(&engine, "static site");
    let result = &results[0];

    assert_eq!(result.exact_match_count, 3);
    // base: title 3+3, content 1+1, tag 2+2 = 12; one doubling, not three
    assert_eq!(result.score, 24.0);
}

#[test]
fn test_exact_phrase_sees_content_past_index_limit() {
    let filler = "lorem ".repeat(1000);
    let engine = loaded_engine(vec![
        Document::new("a", "Needle").with_content(format!("{filler} needle")),
    ]);
    let results = search(&engine, "needle");

    // Only the title occurrence is indexed, the phrase check reads everything
    assert_eq!(results[0].field_match_counts.content, 0);
    assert_eq!(results[0].exact_match_count, 2);
}

#[test]
fn test_recent_post_gets_bonus() {
    let now = reference_now();
    let engine = loaded_engine(vec![
        Document::new("old", "Garden notes").with_date(now - Duration::days(40)),
        Document::new("new", "Garden notes").with_date(now),
        Document::new("mid", "Garden notes").with_date(now - Duration::days(20)),
    ]);
    let results = search(&engine, "garden");

    assert_eq!(ids(&results), vec!["new", "mid", "old"]);
    assert!(approx(results[0].score, 6.0 + 3.0));
    assert!(approx(results[1].score, 6.0 + 1.0));
    assert_eq!(results[2].score, 6.0);
}

#[test]
fn test_future_post_treated_as_today() {
    let now = reference_now();
    let engine = loaded_engine(vec![
        Document::new("today", "Garden").with_date(now),
        Document::new("future", "Garden").with_date(now + Duration::days(10)),
    ]);
    let results = search(&engine, "garden");
    assert_eq!(results[0].score, results[1].score);
    assert_eq!(ids(&results), vec!["today", "future"]);
}

#[test]
fn test_recency_disabled_by_config() {
    let mut config = SearchConfig::default();
    config.scoring.recent_post_bonus = 0.0;
    let engine = engine_with(config);
    engine
        .initialize(vec![
            Document::new("a", "Garden").with_date(reference_now()),
            Document::new("b", "Garden"),
        ])
        .unwrap();
    let results = search(&engine, "garden");
    assert_eq!(results[0].score, results[1].score);
}

#[test]
fn test_non_matching_posts_excluded() {
    let engine = loaded_engine(jekyll_corpus());
    let results = search(&engine, "jekyll pasta");
    assert_eq!(results.len(), 3);

    let results = search(&engine, "jekyll");
    assert!(!ids(&results).contains(&"d3".to_string()));
}

#[test]
fn test_max_results_truncates_after_ranking() {
    let mut config = SearchConfig::default();
    config.query.max_results = 2;
    let engine = engine_with(config);
    engine
        .initialize(vec![
            Document::new("a", "Coffee").with_content("coffee"),
            Document::new("b", "Coffee coffee"),
            Document::new("c", "Tea").with_content("coffee"),
        ])
        .unwrap();
    let results = search(&engine, "coffee");
    assert_eq!(ids(&results), vec!["b", "a"]);
}

#[test]
fn test_custom_weights_change_order() {
    let mut config = SearchConfig::default();
    config.scoring.weights.tag = 10.0;
    let engine = engine_with(config);
    engine
        .initialize(vec![
            Document::new("titled", "Camera"),
            Document::new("tagged", "Gear").with_tags(["camera"]),
        ])
        .unwrap();
    assert_eq!(ids(&search(&engine, "camera")), vec!["tagged", "titled"]);
}
