// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The engine: the one object collaborators talk to.
//!
//! It owns the current index snapshot, both caches, any pending rebuild and
//! the session statistics. The post-management layer calls `initialize` (or
//! `schedule_initialize`) after every create/update/delete; the UI calls
//! `search`, `get_suggestions` and `highlight`.
//!
//! # Snapshot discipline
//!
//! The corpus and its index form an immutable [`IndexSnapshot`] behind an
//! `Arc`. A rebuild produces a complete new snapshot off to the side, swaps
//! it in, then clears both caches. Readers clone the `Arc` and work on a
//! consistent pair. Cache keys carry the snapshot generation as well, so an
//! entry computed against an older snapshot can never answer a newer one.
//!
//! # Deferred builds
//!
//! `schedule_initialize` only queues a build; the host runs it at an idle
//! point with `run_pending_build`. Queries never see a stale corpus while a
//! build is queued or running: `search` and `get_suggestions` run the
//! pending build first, or wait for the one another thread has in flight.
//! Requests that arrive while one is queued coalesce into it, the newest
//! corpus wins and only one build runs. Builds themselves run one at a time.

use crate::cache::{CacheStats, ResultCache, ResultKey, SuggestionCache, SuggestionKey};
use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::highlight::{Highlighter, Highlights};
use crate::index::{build_index, check_unique_ids, InvertedIndex};
use crate::search::{browse_all, QueryKind, QueryProcessor};
use crate::suggest::{Suggester, MIN_PREFIX_LEN};
use crate::tokenizer::Tokenizer;
use crate::types::{Document, SearchOptions, SearchResult};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of "now" for the recency bonus.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A frozen instant, for reproducible scores in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A corpus and the index built from it.
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    pub documents: Vec<Arc<Document>>,
    pub index: InvertedIndex,
    /// 0 for the empty snapshot an engine starts with.
    pub generation: u64,
}

/// Handle on a requested build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildTicket {
    generation: u64,
}

impl BuildTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Rebuild a ticket from a generation handed across an FFI boundary.
impl From<u64> for BuildTicket {
    fn from(generation: u64) -> Self {
        Self { generation }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildStatus {
    /// Queued, not yet run.
    Pending,
    /// Applied, or superseded by a later applied build.
    Complete,
    /// Rejected; the previous snapshot stayed live.
    Failed,
}

struct PendingBuild {
    documents: Vec<Arc<Document>>,
    generation: u64,
}

#[derive(Default)]
struct BuildLedger {
    completed: u64,
    failed: HashSet<u64>,
    builds: u64,
}

/// Read-only introspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub documents: usize,
    pub terms: usize,
    pub postings: usize,
    pub generation: u64,
    pub pending_build: bool,
    pub builds: u64,
    pub failed_builds: usize,
    pub searches: u64,
    pub result_cache: CacheStats,
    pub suggestion_cache: CacheStats,
}

pub struct Engine {
    config: SearchConfig,
    tokenizer: Tokenizer,
    processor: QueryProcessor,
    suggester: Suggester,
    highlighter: Highlighter,
    clock: Arc<dyn Clock>,

    snapshot: RwLock<Arc<IndexSnapshot>>,
    result_cache: Mutex<ResultCache>,
    suggestion_cache: Mutex<SuggestionCache>,
    pending: Mutex<Option<PendingBuild>>,
    /// Held from taking a build off the queue until its snapshot is live.
    build_guard: Mutex<()>,
    ledger: Mutex<BuildLedger>,
    next_generation: AtomicU64,
    searches: AtomicU64,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("generation", &self.snapshot.read().generation)
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(config: SearchConfig) -> Result<Self, EngineError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: SearchConfig, clock: Arc<dyn Clock>) -> Result<Self, EngineError> {
        config.validate()?;
        let tokenizer = Tokenizer::new(&config.tokenizer);
        Ok(Self {
            processor: QueryProcessor::new(
                tokenizer.clone(),
                config.scoring.clone(),
                config.query.clone(),
            ),
            suggester: Suggester::new(tokenizer.clone()),
            highlighter: Highlighter::new(tokenizer.clone(), config.highlight.clone()),
            result_cache: Mutex::new(ResultCache::new(config.cache.max_result_entries)),
            suggestion_cache: Mutex::new(SuggestionCache::new(config.cache.max_suggestion_entries)),
            tokenizer,
            clock,
            snapshot: RwLock::new(Arc::new(IndexSnapshot::default())),
            pending: Mutex::new(None),
            build_guard: Mutex::new(()),
            ledger: Mutex::new(BuildLedger::default()),
            next_generation: AtomicU64::new(1),
            searches: AtomicU64::new(0),
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The snapshot queries currently run against.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    // =========================================================================
    // BUILDS
    // =========================================================================

    /// Rebuild the index from `documents` now.
    ///
    /// A queued build, if any, is folded into this one. On error the
    /// previous snapshot and caches are left untouched.
    pub fn initialize(&self, documents: Vec<Document>) -> Result<(), EngineError> {
        let documents: Vec<Arc<Document>> = documents.into_iter().map(Arc::new).collect();
        let _guard = self.build_guard.lock();
        let generation = match self.pending.lock().take() {
            Some(pending) => pending.generation,
            None => self.allocate_generation(),
        };
        self.apply_build(documents, generation)
    }

    /// Queue a rebuild for the next idle point.
    pub fn schedule_initialize(&self, documents: Vec<Document>) -> BuildTicket {
        let documents: Vec<Arc<Document>> = documents.into_iter().map(Arc::new).collect();
        let mut pending = self.pending.lock();
        match pending.as_mut() {
            Some(queued) => {
                tracing::debug!(generation = queued.generation, "coalescing build request");
                queued.documents = documents;
                BuildTicket {
                    generation: queued.generation,
                }
            }
            None => {
                let generation = self.allocate_generation();
                *pending = Some(PendingBuild {
                    documents,
                    generation,
                });
                BuildTicket { generation }
            }
        }
    }

    /// Run the queued build, if any. Returns the ticket it satisfied.
    ///
    /// If another thread is already running a build this waits for it to
    /// land first.
    pub fn run_pending_build(&self) -> Result<Option<BuildTicket>, EngineError> {
        let _guard = self.build_guard.lock();
        let Some(pending) = self.pending.lock().take() else {
            return Ok(None);
        };
        let ticket = BuildTicket {
            generation: pending.generation,
        };
        self.apply_build(pending.documents, pending.generation)?;
        Ok(Some(ticket))
    }

    pub fn build_status(&self, ticket: BuildTicket) -> BuildStatus {
        if let Some(pending) = self.pending.lock().as_ref() {
            if pending.generation == ticket.generation {
                return BuildStatus::Pending;
            }
        }
        let ledger = self.ledger.lock();
        if ledger.failed.contains(&ticket.generation) {
            BuildStatus::Failed
        } else if ticket.generation <= ledger.completed {
            BuildStatus::Complete
        } else {
            // Taken off the queue, still running on another thread
            BuildStatus::Pending
        }
    }

    /// Run `ticket`'s build here if it is still queued, then report its status.
    pub fn wait(&self, ticket: BuildTicket) -> BuildStatus {
        if self.build_status(ticket) == BuildStatus::Pending {
            self.flush_pending();
        }
        self.build_status(ticket)
    }

    fn allocate_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::Relaxed)
    }

    /// Run a queued build, or wait out one in flight, before answering a
    /// query. Failures are already logged and recorded; the query proceeds
    /// on the previous snapshot.
    fn flush_pending(&self) {
        if let Err(e) = self.run_pending_build() {
            tracing::debug!(error = %e, "pending build failed, serving previous index");
        }
    }

    fn apply_build(&self, documents: Vec<Arc<Document>>, generation: u64) -> Result<(), EngineError> {
        tracing::debug!(generation, documents = documents.len(), "index build started");
        if let Err(e) = check_unique_ids(&documents) {
            tracing::warn!(generation, error = %e, "index build rejected");
            self.ledger.lock().failed.insert(generation);
            return Err(e);
        }

        let index = self.build_inverted(&documents);
        tracing::debug!(
            generation,
            documents = documents.len(),
            terms = index.term_count(),
            postings = index.total_postings(),
            "index built"
        );

        let snapshot = Arc::new(IndexSnapshot {
            documents,
            index,
            generation,
        });
        {
            let mut current = self.snapshot.write();
            // A slower build of an older request must not clobber a newer index
            if current.generation > generation {
                tracing::debug!(generation, live = current.generation, "discarding stale build");
                self.ledger.lock().builds += 1;
                return Ok(());
            }
            *current = snapshot;
            self.result_cache.lock().invalidate_all();
            self.suggestion_cache.lock().invalidate_all();
        }

        let mut ledger = self.ledger.lock();
        ledger.completed = ledger.completed.max(generation);
        ledger.builds += 1;
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn build_inverted(&self, documents: &[Arc<Document>]) -> InvertedIndex {
        if documents.len() > self.config.query.index_threshold {
            crate::index::build_index_parallel(documents, &self.tokenizer, &self.config.index)
        } else {
            build_index(documents, &self.tokenizer, &self.config.index)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn build_inverted(&self, documents: &[Arc<Document>]) -> InvertedIndex {
        build_index(documents, &self.tokenizer, &self.config.index)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Ranked results for `query`.
    ///
    /// `""` lists every post with score 0; a query shorter than the minimum
    /// returns nothing. `options` only distinguish cache slots.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Arc<[SearchResult]> {
        self.flush_pending();
        self.searches.fetch_add(1, Ordering::Relaxed);
        let snapshot = self.snapshot();

        match self.processor.classify(query) {
            QueryKind::BrowseAll => return browse_all(&snapshot.documents).into(),
            QueryKind::TooShort => return Arc::from(Vec::new()),
            QueryKind::Terms(_) => {}
        }

        // Options that don't serialize just don't get cached
        let key = serde_json::to_string(options)
            .ok()
            .map(|opts| ResultKey::new(query, opts, snapshot.generation));

        if let Some(key) = &key {
            if let Some(hit) = self.result_cache.lock().get(key) {
                tracing::trace!(query, "result cache hit");
                return hit;
            }
        }

        tracing::trace!(query, "result cache miss");
        let results: Arc<[SearchResult]> = self
            .processor
            .search(&snapshot.documents, &snapshot.index, query, self.clock.now())
            .into();

        if let Some(key) = key {
            self.result_cache.lock().put(key, Arc::clone(&results));
        }
        results
    }

    /// Decorate one result for display.
    pub fn highlight(&self, result: &SearchResult, query: &str) -> Highlights {
        self.highlighter.highlight_result(result, query)
    }

    /// Up to `limit` completions for `prefix`.
    pub fn get_suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        let normalized = Suggester::normalize_prefix(prefix);
        if normalized.chars().count() < MIN_PREFIX_LEN || limit == 0 {
            return Vec::new();
        }
        self.flush_pending();
        let snapshot = self.snapshot();

        let key = SuggestionKey {
            prefix: normalized,
            limit,
            generation: snapshot.generation,
        };
        if let Some(hit) = self.suggestion_cache.lock().get(&key) {
            return hit.to_vec();
        }

        let suggestions =
            self.suggester
                .suggest(&snapshot.documents, &snapshot.index, &key.prefix, limit);
        self.suggestion_cache
            .lock()
            .put(key, Arc::from(suggestions.clone()));
        suggestions
    }

    /// Counters and sizes. Does not run pending builds.
    pub fn get_statistics(&self) -> Statistics {
        let snapshot = self.snapshot();
        let ledger = self.ledger.lock();
        Statistics {
            documents: snapshot.documents.len(),
            terms: snapshot.index.term_count(),
            postings: snapshot.index.total_postings(),
            generation: snapshot.generation,
            pending_build: self.pending.lock().is_some(),
            builds: ledger.builds,
            failed_builds: ledger.failed.len(),
            searches: self.searches.load(Ordering::Relaxed),
            result_cache: self.result_cache.lock().stats(),
            suggestion_cache: self.suggestion_cache.lock().stats(),
        }
    }
}
