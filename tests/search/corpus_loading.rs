//! Corpus and config loading from JSON.

use crate::common::{engine, ids, search};
use postdex::{load_corpus, parse_corpus, EngineError, SearchConfig, SearchStrategy};
use std::io::Write;

const POSTS: &str = r#"[
  {"id": "d1", "title": "Welcome to Jekyll", "categories": ["jekyll", "update"],
   "date": "2024-05-30T10:00:00Z"},
  {"id": "d2", "title": "Deploying with Jekyll", "categories": ["jekyll", "deploy"],
   "content": "Push to the main branch.", "tags": ["ci"]},
  {"id": "d3"}
]"#;

#[test]
fn test_load_corpus_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(POSTS.as_bytes()).unwrap();

    let docs = load_corpus(file.path()).unwrap();
    assert_eq!(docs.len(), 3);
    assert!(docs[0].date.is_some());
    assert_eq!(docs[1].tags, vec!["ci"]);
    assert!(docs[2].title.is_empty());

    let engine = engine();
    engine.initialize(docs).unwrap();
    // d1 is a day old and gets the recency bonus
    assert_eq!(ids(&search(&engine, "jekyll")), vec!["d1", "d2"]);
}

#[test]
fn test_front_matter_dates_load_and_score() {
    let docs = parse_corpus(
        r#"[
          {"id": "a", "title": "Jekyll", "date": "2024-05-27"},
          {"id": "b", "title": "Jekyll", "date": "2024-05-29 12:00:00 +0200"},
          {"id": "c", "title": "Jekyll", "date": "not a date"}
        ]"#,
    )
    .unwrap();
    assert_eq!(docs.len(), 3);
    assert!(docs[2].date.is_none());

    let engine = engine();
    engine.initialize(docs).unwrap();
    let results = search(&engine, "jekyll");
    assert_eq!(ids(&results), vec!["b", "a", "c"]);
    // Two and five whole days before the reference date
    assert!((results[0].score - (6.0 + 2.8)).abs() < 1e-9);
    assert!((results[1].score - (6.0 + 2.5)).abs() < 1e-9);
    assert_eq!(results[2].score, 6.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_corpus("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
}

#[test]
fn test_malformed_corpus_is_parse_error() {
    assert!(matches!(
        parse_corpus("[{\"title\": \"no id\"}]"),
        Err(EngineError::CorpusParse(_))
    ));
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config =
        SearchConfig::from_json(r#"{"query": {"strategy": "scan"}, "scoring": {"exactMatchBonus": 3}}"#)
            .unwrap();
    assert_eq!(config.query.strategy, SearchStrategy::Scan);
    assert_eq!(config.scoring.exact_match_bonus, 3.0);
    assert_eq!(config.query.min_query_len, 2);
    assert_eq!(config.cache.max_result_entries, 100);
}

#[test]
fn test_invalid_config_rejected_by_engine() {
    let mut config = SearchConfig::default();
    config.cache.max_suggestion_entries = 0;
    assert!(matches!(
        postdex::Engine::new(config),
        Err(EngineError::InvalidConfig(_))
    ));
}
