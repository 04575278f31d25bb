// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel index construction.
//!
//! Tokenizing posts is embarrassingly parallel; assigning term ids is not,
//! because ids follow first-seen corpus order. So the map phase tokenizes
//! every post on the rayon pool and the reduce phase merges the per-post
//! term lists sequentially, in corpus order. The result is identical to
//! [`build_index`](super::build_index).
//!
//! For small corpora (<100 posts) the thread handoff costs more than it
//! saves; the engine only takes this path above its index threshold.

use rayon::prelude::*;

use super::inverted::{document_terms, DocumentTerms, IndexBuilder, InvertedIndex};
use crate::config::IndexConfig;
use crate::tokenizer::Tokenizer;
use crate::types::{DocIndex, Document};

/// Build an inverted index using parallel map, sequential reduce.
pub fn build_index_parallel<D>(
    documents: &[D],
    tokenizer: &Tokenizer,
    config: &IndexConfig,
) -> InvertedIndex
where
    D: AsRef<Document> + Sync,
{
    // MAP PHASE: tokenize each post independently
    let per_doc: Vec<DocumentTerms> = documents
        .par_iter()
        .map(|doc| document_terms(doc.as_ref(), tokenizer, config))
        .collect();

    // REDUCE PHASE: corpus order keeps term ids and posting order stable
    let mut builder = IndexBuilder::new();
    for (position, terms) in per_doc.into_iter().enumerate() {
        builder.push_document(DocIndex(position), terms);
    }
    builder.finish(documents.len())
}
