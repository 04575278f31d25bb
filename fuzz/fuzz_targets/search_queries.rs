// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Arbitrary byte sequences go through search, suggestions and highlighting.
//! None of them may panic, and every result list must stay sorted.

#![no_main]

use libfuzzer_sys::fuzz_target;
use postdex::testing::{reference_now, synthetic_corpus};
use postdex::{Engine, FixedClock, SearchConfig, SearchOptions};
use std::sync::{Arc, OnceLock};

fuzz_target!(|query: &[u8]| {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    let engine = ENGINE.get_or_init(|| {
        let engine = Engine::with_clock(
            SearchConfig::default(),
            Arc::new(FixedClock(reference_now())),
        )
        .expect("default config");
        engine.initialize(synthetic_corpus(150, 3)).expect("unique ids");
        engine
    });

    let query = String::from_utf8_lossy(query);
    let results = engine.search(&query, &SearchOptions::new());

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "results out of order");
    }
    for result in results.iter().take(3) {
        assert!(result.score.is_finite());
        let _ = engine.highlight(result, &query);
    }

    let suggestions = engine.get_suggestions(&query, 5);
    assert!(suggestions.len() <= 5);
});
