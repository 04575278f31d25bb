// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! Terms live in an arena: a `term → TermId` dictionary plus parallel
//! vectors of term strings and posting lists. Scoring hashes each query term
//! once, then works with integer ids.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_LIST_SORTED**: Each posting list is sorted by doc index
//! 2. **NON_EMPTY**: Every term has at least one posting, and every posting
//!    has a non-zero count in some field
//! 3. **FIRST_SEEN_ORDER**: Term ids follow first occurrence in corpus
//!    order (title, content, categories, tags within a post). Suggestions
//!    rely on this for deterministic candidate pools.

use crate::config::IndexConfig;
use crate::tokenizer::Tokenizer;
use crate::types::{DocIndex, Document, FieldCounts, FieldType, Posting, PostingList, TermId};
use crate::utils::truncate_chars;
use std::collections::HashMap;

/// Term → document → field counts.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
    postings: Vec<PostingList>,
    total_docs: usize,
}

impl InvertedIndex {
    /// An index over an empty corpus.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    #[inline]
    pub fn term(&self, id: TermId) -> &str {
        &self.terms[id.as_usize()]
    }

    #[inline]
    pub fn postings(&self, id: TermId) -> &PostingList {
        &self.postings[id.as_usize()]
    }

    /// Posting list for a term string, if indexed.
    pub fn lookup(&self, term: &str) -> Option<&PostingList> {
        self.term_id(term).map(|id| self.postings(id))
    }

    /// Number of documents containing `term` (0 if not indexed).
    pub fn doc_freq(&self, term: &str) -> usize {
        self.lookup(term).map_or(0, PostingList::doc_freq)
    }

    /// All terms in first-seen order.
    pub fn terms(&self) -> impl Iterator<Item = (TermId, &str)> {
        self.terms
            .iter()
            .enumerate()
            .map(|(i, t)| (TermId(i as u32), t.as_str()))
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn total_postings(&self) -> usize {
        self.postings.iter().map(PostingList::doc_freq).sum()
    }

    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// The terms of one document with their per-field counts, in first-seen order.
///
/// This is the unit of work that can run in parallel; merging is sequential.
pub type DocumentTerms = Vec<(String, FieldCounts)>;

/// Tokenize every field of one post.
///
/// Content beyond `content_index_limit` chars is ignored here to bound build
/// time. The exact-phrase check at query time still sees the full body.
pub fn document_terms(doc: &Document, tokenizer: &Tokenizer, config: &IndexConfig) -> DocumentTerms {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut terms: DocumentTerms = Vec::new();

    let mut record = |text: &str, field: FieldType| {
        for term in tokenizer.tokenize(text) {
            let slot = match slots.get(&term) {
                Some(&slot) => slot,
                None => {
                    let slot = terms.len();
                    slots.insert(term.clone(), slot);
                    terms.push((term, FieldCounts::default()));
                    slot
                }
            };
            terms[slot].1.bump(field);
        }
    };

    record(&doc.title, FieldType::Title);
    record(
        truncate_chars(&doc.content, config.content_index_limit),
        FieldType::Content,
    );
    for category in &doc.categories {
        record(category, FieldType::Category);
    }
    for tag in &doc.tags {
        record(tag, FieldType::Tag);
    }

    terms
}

/// Accumulates documents, in corpus order, into an [`InvertedIndex`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    index: InvertedIndex,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's terms.
    ///
    /// Documents must arrive in increasing `doc` order; that is what keeps
    /// every posting list sorted without a final sort pass.
    pub fn push_document(&mut self, doc: DocIndex, terms: DocumentTerms) {
        debug_assert!(doc.get() >= self.index.total_docs);
        for (term, counts) in terms {
            let id = match self.index.dictionary.get(&term) {
                Some(&id) => id,
                None => {
                    let id = TermId(self.index.terms.len() as u32);
                    self.index.dictionary.insert(term.clone(), id);
                    self.index.terms.push(term);
                    self.index.postings.push(PostingList::default());
                    id
                }
            };
            self.index.postings[id.as_usize()]
                .entries
                .push(Posting { doc, counts });
        }
        self.index.total_docs = doc.get() + 1;
    }

    pub fn finish(mut self, total_docs: usize) -> InvertedIndex {
        self.index.total_docs = total_docs;
        self.index
    }
}

/// Build an inverted index from a corpus, single-threaded.
///
/// Guarantees:
/// - `posting_list_sorted`: each posting list is sorted by doc index
/// - `build_complete`: every indexable term of every field is present
pub fn build_index<D>(documents: &[D], tokenizer: &Tokenizer, config: &IndexConfig) -> InvertedIndex
where
    D: AsRef<Document>,
{
    let mut builder = IndexBuilder::new();
    for (position, doc) in documents.iter().enumerate() {
        builder.push_document(
            DocIndex(position),
            document_terms(doc.as_ref(), tokenizer, config),
        );
    }
    builder.finish(documents.len())
}
