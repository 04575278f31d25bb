// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Insertion-ordered caches for search results and suggestions.
//!
//! Eviction is FIFO-biased, not LRU: once the cache holds more than
//! `max_entries`, the oldest quarter *by insertion* goes, however recently
//! it was read. A query hit on every keystroke still ages out.
//!
//! Re-inserting an existing key replaces its value but keeps its original
//! slot in the eviction order.

use crate::types::SearchResult;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

/// Bounded map with oldest-inserted-first eviction.
#[derive(Debug, Clone)]
pub struct FifoCache<K, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
    max_entries: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Look up a key, counting the hit or miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up without touching the counters.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Store a value, evicting the oldest quarter if the cache overflows.
    ///
    /// Returns how many entries were evicted.
    pub fn put(&mut self, key: K, value: V) -> usize {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }
        if self.entries.len() <= self.max_entries {
            return 0;
        }

        let batch = (self.max_entries / 4).max(1);
        let mut evicted = 0;
        while evicted < batch {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            evicted += 1;
        }
        self.evictions += evicted as u64;
        tracing::debug!(evicted, remaining = self.entries.len(), "cache eviction");
        evicted
    }

    /// Drop everything. Counters survive; they describe the session.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            max_entries: self.max_entries,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

/// Counters exposed through engine statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Result cache key: trimmed query, serialized options and the snapshot
/// generation the results were computed against.
///
/// Case is kept: "Rust" and "rust" are separate slots even though they
/// search identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub query: String,
    pub options: String,
    pub generation: u64,
}

impl ResultKey {
    pub fn new(query: &str, options: String, generation: u64) -> Self {
        Self {
            query: query.trim().to_string(),
            options,
            generation,
        }
    }
}

/// Suggestion cache key: normalized prefix, limit and snapshot generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuggestionKey {
    pub prefix: String,
    pub limit: usize,
    pub generation: u64,
}

pub type ResultCache = FifoCache<ResultKey, Arc<[SearchResult]>>;
pub type SuggestionCache = FifoCache<SuggestionKey, Arc<[String]>>;
