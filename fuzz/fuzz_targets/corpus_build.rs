// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for corpus construction.
//!
//! Builds an engine from arbitrary posts and checks that the index build is
//! either rejected cleanly (duplicate ids) or yields a queryable snapshot.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use postdex::{Document, Engine, SearchConfig, SearchOptions};
use std::collections::HashSet;

#[derive(Arbitrary, Debug)]
struct Post {
    id: u8,
    title: String,
    content: String,
    categories: Vec<String>,
    tags: Vec<String>,
}

#[derive(Arbitrary, Debug)]
struct Input {
    posts: Vec<Post>,
    query: String,
}

fuzz_target!(|input: Input| {
    let engine = match Engine::new(SearchConfig::default()) {
        Ok(engine) => engine,
        Err(_) => return,
    };

    let ids: HashSet<u8> = input.posts.iter().map(|p| p.id).collect();
    let unique = ids.len() == input.posts.len();
    let docs: Vec<Document> = input
        .posts
        .into_iter()
        .map(|p| {
            Document::new(format!("p{}", p.id), p.title)
                .with_content(p.content)
                .with_categories(p.categories)
                .with_tags(p.tags)
        })
        .collect();
    let count = docs.len();

    match engine.initialize(docs) {
        Ok(()) => {
            assert!(unique);
            assert_eq!(engine.get_statistics().documents, count);
            assert_eq!(engine.search("", &SearchOptions::new()).len(), count);
            let _ = engine.search(&input.query, &SearchOptions::new());
        }
        Err(_) => assert!(!unique),
    }
});
