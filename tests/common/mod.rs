//! Shared test utilities and fixtures.

#![allow(dead_code)]

use postdex::{Document, Engine, FixedClock, SearchConfig, SearchOptions, SearchResult};
use std::sync::Arc;

// Re-export canonical test utilities from postdex::testing
pub use postdex::testing::{jekyll_corpus, make_doc, reference_now, synthetic_corpus};

// ============================================================================
// ENGINES
// ============================================================================

/// An engine with default config and a frozen clock.
pub fn engine() -> Engine {
    engine_with(SearchConfig::default())
}

pub fn engine_with(config: SearchConfig) -> Engine {
    Engine::with_clock(config, Arc::new(FixedClock(reference_now())))
        .expect("test config is valid")
}

/// A default engine already loaded with `documents`.
pub fn loaded_engine(documents: Vec<Document>) -> Engine {
    let engine = engine();
    engine.initialize(documents).expect("fixture corpus builds");
    engine
}

// ============================================================================
// RESULT HELPERS
// ============================================================================

pub fn search(engine: &Engine, query: &str) -> Arc<[SearchResult]> {
    engine.search(query, &SearchOptions::new())
}

/// Result ids in rank order.
pub fn ids(results: &[SearchResult]) -> Vec<String> {
    results.iter().map(|r| r.document.id.clone()).collect()
}

/// (id, score bits) pairs, for exact comparisons of whole result lists.
pub fn fingerprint(results: &[SearchResult]) -> Vec<(String, u64)> {
    results
        .iter()
        .map(|r| (r.document.id.clone(), r.score.to_bits()))
        .collect()
}
