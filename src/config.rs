// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Everything here deserializes from JSON with per-field defaults, so a
//! console can ship `{"scoring": {"weights": {"title": 5}}}` and inherit the
//! rest. `SearchConfig::validate` runs once when the engine is created.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Top-level configuration for [`crate::Engine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    pub tokenizer: TokenizerConfig,
    pub index: IndexConfig,
    pub scoring: ScoringConfig,
    pub query: QueryConfig,
    pub cache: CacheConfig,
    pub highlight: HighlightConfig,
}

impl SearchConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: SearchConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the engine misbehave.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.tokenizer.min_token_len == 0 {
            return Err(EngineError::InvalidConfig(
                "tokenizer.minTokenLen must be at least 1".into(),
            ));
        }
        for range in &self.tokenizer.extra_ranges {
            if range.start > range.end {
                return Err(EngineError::InvalidConfig(format!(
                    "tokenizer.extraRanges entry {:?}..={:?} is inverted",
                    range.start, range.end
                )));
            }
        }

        let w = &self.scoring.weights;
        let factors = [
            ("scoring.weights.title", w.title),
            ("scoring.weights.content", w.content),
            ("scoring.weights.category", w.category),
            ("scoring.weights.tag", w.tag),
            ("scoring.exactMatchBonus", self.scoring.exact_match_bonus),
            ("scoring.recentPostBonus", self.scoring.recent_post_bonus),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }

        if self.query.max_results == 0 {
            return Err(EngineError::InvalidConfig(
                "query.maxResults must be at least 1".into(),
            ));
        }
        if self.cache.max_result_entries == 0 || self.cache.max_suggestion_entries == 0 {
            return Err(EngineError::InvalidConfig(
                "cache sizes must be at least 1".into(),
            ));
        }
        if self.highlight.max_snippets == 0 {
            return Err(EngineError::InvalidConfig(
                "highlight.maxSnippets must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// An inclusive char range admitted by the tokenizer on top of alphanumerics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharRange {
    pub start: char,
    pub end: char,
}

impl CharRange {
    pub const fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }
}

/// CJK Unified Ideographs, the script the blog corpus is written in besides Latin.
pub const CJK_UNIFIED_IDEOGRAPHS: CharRange = CharRange::new('\u{4E00}', '\u{9FFF}');

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenizerConfig {
    /// Tokens shorter than this many chars are dropped (default: 2)
    pub min_token_len: usize,
    /// Extra char ranges kept verbatim instead of being treated as punctuation
    pub extra_ranges: Vec<CharRange>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: 2,
            extra_ranges: vec![CJK_UNIFIED_IDEOGRAPHS],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexConfig {
    /// Content beyond this many chars is not tokenized (default: 5000)
    pub content_index_limit: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            content_index_limit: 5000,
        }
    }
}

/// Per-field multipliers for the base score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub title: f64,
    pub content: f64,
    pub category: f64,
    pub tag: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 3.0,
            content: 1.0,
            category: 2.0,
            tag: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    pub weights: FieldWeights,
    /// Multiplier when the raw query appears verbatim in a field (default: 2)
    pub exact_match_bonus: f64,
    /// Points per day of freshness inside the recency window (default: 0.1)
    pub recent_post_bonus: f64,
    /// Posts older than this many days get no recency bonus (default: 30)
    pub recent_window_days: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            exact_match_bonus: 2.0,
            recent_post_bonus: 0.1,
            recent_window_days: 30,
        }
    }
}

/// Which candidate-collection strategy the query processor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchStrategy {
    /// Index-driven above `index_threshold` documents, scan otherwise.
    #[default]
    Auto,
    IndexDriven,
    Scan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryConfig {
    /// Queries whose trimmed length is below this return nothing (default: 2)
    pub min_query_len: usize,
    /// Result list cap (default: 50)
    pub max_results: usize,
    /// Corpus size above which the index-driven strategy kicks in (default: 100)
    pub index_threshold: usize,
    pub strategy: SearchStrategy,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            max_results: 50,
            index_threshold: 100,
            strategy: SearchStrategy::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    pub max_result_entries: usize,
    pub max_suggestion_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_result_entries: 100,
            max_suggestion_entries: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightConfig {
    pub exact_open: String,
    pub exact_close: String,
    pub term_open: String,
    pub term_close: String,
    /// Snippets per document (default: 3)
    pub max_snippets: usize,
    /// Escape `&<>"'` in text outside the markup (default: true)
    pub escape_html: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            exact_open: r#"<mark class="exact">"#.to_string(),
            exact_close: "</mark>".to_string(),
            term_open: "<mark>".to_string(),
            term_close: "</mark>".to_string(),
            max_snippets: 3,
            escape_html: true,
        }
    }
}
