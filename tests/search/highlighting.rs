//! Highlighting search results through the engine.

use crate::common::{engine_with, jekyll_corpus, loaded_engine, search};
use postdex::{Document, SearchConfig};

#[test]
fn test_highlight_jekyll_result() {
    let engine = loaded_engine(jekyll_corpus());
    let results = search(&engine, "jekyll deploy");
    let h = engine.highlight(&results[0], "jekyll deploy");

    assert_eq!(h.title, "Deploying with <mark>Jekyll</mark>");
    assert_eq!(h.categories, vec!["<mark>jekyll</mark>", "<mark>deploy</mark>"]);
    assert!(h.snippets.is_empty());
}

#[test]
fn test_exact_phrase_marked_as_exact() {
    let engine = loaded_engine(vec![Document::new("a", "A static site in an afternoon")
        .with_content("Building a static site. Then deploying it.")]);
    let results = search(&engine, "static site");
    let h = engine.highlight(&results[0], "static site");

    assert_eq!(
        h.title,
        r#"A <mark class="exact">static site</mark> in an afternoon"#
    );
    assert_eq!(h.snippets.len(), 1);
    assert_eq!(h.snippets[0].sentence, 0);
    assert_eq!(h.snippets[0].context.as_deref(), Some("Then deploying it."));
}

#[test]
fn test_marks_preserve_original_text() {
    let engine = loaded_engine(vec![Document::new("a", "Über Café Reviews")]);
    let results = search(&engine, "cafe");
    let h = engine.highlight(&results[0], "cafe");
    // Diacritics survive in the output even though matching folded them
    assert_eq!(h.title, "Über <mark>Café</mark> Reviews");
}

#[test]
fn test_html_in_posts_is_escaped() {
    let engine = loaded_engine(vec![
        Document::new("a", "<script>rust</script>").with_content("Use <b>rust</b> & wasm."),
    ]);
    let results = search(&engine, "rust");
    let h = engine.highlight(&results[0], "rust");
    assert!(!h.title.contains("<script>"));
    assert!(h.snippets[0].text.contains("&amp;"));
}

#[test]
fn test_custom_markers_from_config() {
    let mut config = SearchConfig::default();
    config.highlight.term_open = "[".into();
    config.highlight.term_close = "]".into();
    config.highlight.exact_open = "{".into();
    config.highlight.exact_close = "}".into();
    let engine = engine_with(config);
    engine.initialize(jekyll_corpus()).unwrap();

    let results = search(&engine, "jekyll update");
    let h = engine.highlight(&results[0], "jekyll update");
    assert_eq!(h.title, "Welcome to [Jekyll]");
    assert_eq!(h.categories, vec!["[jekyll]", "[update]"]);
}

#[test]
fn test_snippet_cap_from_config() {
    let mut config = SearchConfig::default();
    config.highlight.max_snippets = 1;
    let engine = engine_with(config);
    engine
        .initialize(vec![Document::new("a", "Notes")
            .with_content("Rust one. Rust two. Rust three.")])
        .unwrap();
    let results = search(&engine, "rust");
    assert_eq!(engine.highlight(&results[0], "rust").snippets.len(), 1);
}
