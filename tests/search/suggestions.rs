//! Prefix suggestions through the engine.

use crate::common::{jekyll_corpus, loaded_engine};
use postdex::Document;

#[test]
fn test_jekyll_prefix() {
    let engine = loaded_engine(jekyll_corpus());
    assert_eq!(engine.get_suggestions("jek", 5), vec!["jekyll"]);
}

#[test]
fn test_prefix_is_normalized() {
    let engine = loaded_engine(jekyll_corpus());
    assert_eq!(engine.get_suggestions("  JEK ", 5), vec!["jekyll"]);
    // Same cache slot as the lowercase form
    engine.get_suggestions("jek", 5);
    assert_eq!(engine.get_statistics().suggestion_cache.entries, 1);
}

#[test]
fn test_short_prefix_or_zero_limit() {
    let engine = loaded_engine(jekyll_corpus());
    assert!(engine.get_suggestions("j", 5).is_empty());
    assert!(engine.get_suggestions("", 5).is_empty());
    assert!(engine.get_suggestions("jek", 0).is_empty());
    assert_eq!(engine.get_statistics().suggestion_cache.entries, 0);
}

#[test]
fn test_more_common_terms_first() {
    let engine = loaded_engine(vec![
        Document::new("a", "Travel tips").with_tags(["travelogue"]),
        Document::new("b", "Travel again"),
        Document::new("c", "Traverse"),
    ]);
    assert_eq!(
        engine.get_suggestions("trav", 5),
        vec!["travel", "travelogue", "traverse"]
    );
}

#[test]
fn test_exact_term_ranks_first() {
    let engine = loaded_engine(vec![
        Document::new("a", "Postgres"),
        Document::new("b", "Postgres tuning"),
        Document::new("c", "Post"),
    ]);
    assert_eq!(engine.get_suggestions("post", 2), vec!["post", "postgres"]);
}

#[test]
fn test_limit_respected() {
    let engine = loaded_engine(vec![Document::new(
        "a",
        "alpha alpine alpaca alps altitude",
    )]);
    assert_eq!(engine.get_suggestions("al", 3).len(), 3);
}

#[test]
fn test_suggestions_never_stop_words() {
    let engine = loaded_engine(vec![Document::new("a", "Theory of the theme")]);
    assert_eq!(engine.get_suggestions("the", 5), vec!["theme", "theory"]);
}

#[test]
fn test_unbounded_limit_lists_every_completion() {
    let engine = loaded_engine(jekyll_corpus());
    assert_eq!(engine.get_suggestions("jek", usize::MAX), vec!["jekyll"]);
    assert_eq!(engine.get_suggestions("de", usize::MAX), vec!["deploy", "deploying"]);
}
