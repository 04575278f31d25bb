// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine errors.
//!
//! The search path itself has no failure modes: short queries, empty
//! prefixes and odd options all resolve to empty results. Errors only come
//! from building an index out of a bad corpus, from bad configuration, or
//! from the edges (CLI file loading, JS interop).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Two posts in the corpus share an id. The previous index stays live.
    #[error("duplicate document id '{id}' at positions {first} and {second}")]
    DuplicateDocumentId {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse corpus: {0}")]
    CorpusParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
