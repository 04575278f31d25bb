// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests, benches and
//! the fuzz target.
//!
//! Always compiled but hidden from documentation.

#![doc(hidden)]

use crate::types::Document;
use chrono::{DateTime, TimeZone, Utc};

/// A post with just an id and a title.
pub fn make_doc(id: &str, title: &str) -> Document {
    Document::new(id, title)
}

/// A post with a title and categories.
pub fn make_doc_with_categories(id: &str, title: &str, categories: &[&str]) -> Document {
    Document::new(id, title).with_categories(categories.iter().copied())
}

/// The instant the fixtures are judged from.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Three posts: two about Jekyll, one about pasta.
pub fn jekyll_corpus() -> Vec<Document> {
    vec![
        make_doc_with_categories("d1", "Welcome to Jekyll", &["jekyll", "update"]),
        make_doc_with_categories("d2", "Deploying with Jekyll", &["jekyll", "deploy"]),
        make_doc_with_categories("d3", "Cooking pasta", &["food"]),
    ]
}

const WORDS: &[&str] = &[
    "rust", "jekyll", "deploy", "static", "site", "wasm", "search", "index", "cache", "theme",
    "layout", "markdown", "post", "draft", "server", "build", "plugin", "asset", "image", "feed",
    "pasta", "garden", "travel", "coffee", "music", "camera", "winter", "summer", "review", "guide",
];

const CATEGORIES: &[&str] = &["jekyll", "rust", "food", "travel", "tooling", "notes"];

/// A deterministic synthetic blog of `n` posts.
///
/// Word choice is driven by a small LCG so the same `(n, seed)` always yields
/// the same corpus.
pub fn synthetic_corpus(n: usize, seed: u64) -> Vec<Document> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let mut next = move |bound: usize| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) as usize) % bound
    };

    (0..n)
        .map(|i| {
            let title: Vec<&str> = (0..3).map(|_| WORDS[next(WORDS.len())]).collect();
            let sentences: Vec<String> = (0..4)
                .map(|_| {
                    let words: Vec<&str> = (0..8).map(|_| WORDS[next(WORDS.len())]).collect();
                    format!("{}.", words.join(" "))
                })
                .collect();
            let date = reference_now() - chrono::Duration::days(next(120) as i64);
            Document::new(format!("post-{i}"), title.join(" "))
                .with_content(sentences.join(" "))
                .with_categories([CATEGORIES[next(CATEGORIES.len())]])
                .with_tags([WORDS[next(WORDS.len())]])
                .with_date(date)
        })
        .collect()
}
