// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory full-text search for a static blog's admin console.
//!
//! The console holds a few hundred posts at most. On every create, update or
//! delete it hands the whole corpus to the [`Engine`], which tokenizes it
//! into an inverted index; queries are then scored against that index with
//! field weights, an exact-phrase bonus, a recency bonus and a coverage
//! factor. Results and prefix suggestions are memoized until the next
//! rebuild.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ tokenizer   │────▶│  index       │────▶│  search      │
//! │ (normalize, │     │ (postings,   │     │ (strategies, │
//! │  stop words)│     │  parallel)   │     │  scoring)    │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                      engine                          │
//! │  (snapshot swap, deferred builds, result and         │
//! │   suggestion caches, suggest, highlight, stats)      │
//! └─────────────────────────────────────────────────────┘
//!        │                                        │
//!        ▼                                        ▼
//!   wasm (PostSearch)                       postdex CLI
//! ```
//!
//! # Usage
//!
//! ```
//! use postdex::{Document, Engine, SearchConfig, SearchOptions};
//!
//! let engine = Engine::new(SearchConfig::default()).unwrap();
//! engine
//!     .initialize(vec![
//!         Document::new("d1", "Welcome to Jekyll").with_categories(["jekyll", "update"]),
//!         Document::new("d2", "Deploying with Jekyll").with_categories(["jekyll", "deploy"]),
//!     ])
//!     .unwrap();
//!
//! let results = engine.search("jekyll deploy", &SearchOptions::new());
//! assert_eq!(results[0].document.id, "d2");
//! assert_eq!(engine.get_suggestions("jek", 5), vec!["jekyll"]);
//! ```

pub mod cache;
pub mod config;
mod engine;
mod error;
pub mod highlight;
pub mod index;
pub mod scoring;
pub mod search;
pub mod suggest;
pub mod testing;
pub mod tokenizer;
mod types;
mod utils;

#[cfg(feature = "wasm")]
mod wasm;

pub use cache::{CacheStats, FifoCache};
pub use config::{
    CacheConfig, CharRange, FieldWeights, HighlightConfig, IndexConfig, QueryConfig,
    ScoringConfig, SearchConfig, SearchStrategy, TokenizerConfig, CJK_UNIFIED_IDEOGRAPHS,
};
pub use engine::{
    BuildStatus, BuildTicket, Clock, Engine, FixedClock, IndexSnapshot, Statistics, SystemClock,
};
pub use error::EngineError;
pub use highlight::{split_sentences, Highlighter, Highlights, Snippet};
pub use index::{build_index, InvertedIndex};
#[cfg(feature = "parallel")]
pub use index::build_index_parallel;
pub use search::{QueryKind, QueryProcessor};
pub use suggest::Suggester;
pub use tokenizer::{is_stop_word, tokenize, Tokenizer};
pub use types::{
    load_corpus, parse_corpus, parse_post_date, DocIndex, Document, FieldCounts, FieldType,
    Posting, PostingList, SearchOptions, SearchResult, TermId,
};
pub use utils::normalize;

#[cfg(feature = "wasm")]
pub use wasm::PostSearch;
