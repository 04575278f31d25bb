// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search index.
//!
//! Documents go in, posting lists and search results come out. Everything
//! downstream keys documents by their position in the corpus (`DocIndex`),
//! never by their string id, so ties break by corpus order for free.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Posting**: `doc < corpus.len()` and `counts.total() > 0`. An entry
//!   exists for (term, doc) iff the term occurs in at least one field.
//!
//! - **PostingList**: entries sorted by `doc`, no duplicates. Document
//!   frequency is `entries.len()`.
//!
//! - **SearchResult**: `matched_terms` is non-empty except in browse-all
//!   mode, where `score == 0.0`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Position of a document in the corpus array.
///
/// Prevents mixing up a corpus position with a term id or a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocIndex(pub usize);

impl DocIndex {
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for DocIndex {
    fn from(idx: usize) -> Self {
        DocIndex(idx)
    }
}

/// Dense identifier of a term in the index's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct TermId(pub u32);

impl TermId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// One blog post as supplied by the post-management layer.
///
/// Everything except `id` is optional on the wire. A post with no title,
/// no categories or no date still indexes; missing pieces count as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_post_date")]
    pub date: Option<DateTime<Utc>>,
}

/// Front-matter date formats, tried in order after RFC 3339.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M %z"];
const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a post date as written in blog front matter.
///
/// Accepts RFC 3339, Jekyll's `2024-01-15 10:30:00 +0100`, naive date-times
/// (read as UTC) and bare dates (midnight UTC). Anything else is `None`.
pub fn parse_post_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(date) = DateTime::parse_from_str(value, format) {
            return Some(date.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// An unreadable date drops the recency bonus, not the post.
fn deserialize_post_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => parse_post_date(&text),
        _ => None,
    })
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

impl AsRef<Document> for Document {
    fn as_ref(&self) -> &Document {
        self
    }
}

/// Which part of a post a term was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Title,
    Content,
    Category,
    Tag,
}

/// Occurrence counts of one term in one document, split by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCounts {
    pub title: u32,
    pub content: u32,
    pub category: u32,
    pub tag: u32,
}

impl FieldCounts {
    #[inline]
    pub fn bump(&mut self, field: FieldType) {
        match field {
            FieldType::Title => self.title += 1,
            FieldType::Content => self.content += 1,
            FieldType::Category => self.category += 1,
            FieldType::Tag => self.tag += 1,
        }
    }

    /// Field-wise sum, used to merge per-term counts into per-document ones.
    #[inline]
    pub fn add(&mut self, other: &FieldCounts) {
        self.title += other.title;
        self.content += other.content;
        self.category += other.category;
        self.tag += other.tag;
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.title + self.content + self.category + self.tag
    }
}

// =============================================================================
// INDEX TYPES
// =============================================================================

/// A single (document, counts) entry in a posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc: DocIndex,
    pub counts: FieldCounts,
}

/// All documents containing one term, sorted by `doc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    pub entries: Vec<Posting>,
}

impl PostingList {
    /// Number of documents containing the term.
    #[inline]
    pub fn doc_freq(&self) -> usize {
        self.entries.len()
    }

    /// Counts for one document, if it contains the term.
    pub fn get(&self, doc: DocIndex) -> Option<&FieldCounts> {
        self.entries
            .binary_search_by_key(&doc, |p| p.doc)
            .ok()
            .map(|i| &self.entries[i].counts)
    }
}

// =============================================================================
// QUERY TYPES
// =============================================================================

/// Caller-supplied search options.
///
/// Opaque to the engine: they only take part in the result-cache key. The
/// map is ordered, so equal options always serialize to the same key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchOptions(pub serde_json::Map<String, serde_json::Value>);

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub document: Arc<Document>,
    pub doc_index: DocIndex,
    pub score: f64,
    /// Query terms found in the document, in sorted order.
    pub matched_terms: BTreeSet<String>,
    /// Number of fields containing the raw query verbatim.
    pub exact_match_count: u32,
    /// Per-field occurrences summed over all matched terms.
    pub field_match_counts: FieldCounts,
}

impl SearchResult {
    /// A browse-all entry: score 0, nothing matched.
    pub fn unscored(document: Arc<Document>, doc_index: DocIndex) -> Self {
        Self {
            document,
            doc_index,
            score: 0.0,
            matched_terms: BTreeSet::new(),
            exact_match_count: 0,
            field_match_counts: FieldCounts::default(),
        }
    }
}

// =============================================================================
// CORPUS LOADING
// =============================================================================

/// Parse a JSON array of posts.
pub fn parse_corpus(json: &str) -> Result<Vec<Document>, crate::EngineError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON corpus file.
pub fn load_corpus(path: impl AsRef<std::path::Path>) -> Result<Vec<Document>, crate::EngineError> {
    let json = std::fs::read_to_string(path)?;
    parse_corpus(&json)
}
