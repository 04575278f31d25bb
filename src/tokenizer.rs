// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text → terms.
//!
//! Every field of every post goes through here at index time, and every
//! query goes through here at search time. Both sides must agree on what a
//! term is, so there is exactly one tokenizer and it is stateless.
//!
//! # Pipeline
//!
//! 1. Normalize (lowercase, strip diacritics)
//! 2. Replace anything that is not alphanumeric, whitespace or inside a
//!    configured script range with a space
//! 3. Split on whitespace
//! 4. Drop short tokens, stop words and pure numbers

use crate::config::{CharRange, TokenizerConfig};
use crate::utils::normalize;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Stop words loaded from data/stop_words.json.
///
/// The JSON file maps a language code to a word list. All lists are
/// flattened into one set, stored in normalized form so lookups match what
/// the tokenizer produces.
static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let json_str = include_str!("../data/stop_words.json");
    parse_stop_words_json(json_str)
});

fn parse_stop_words_json(json_str: &str) -> HashSet<String> {
    let by_language: std::collections::HashMap<String, Vec<String>> =
        serde_json::from_str(json_str).unwrap_or_default();

    by_language
        .into_values()
        .flatten()
        .map(|word| normalize(&word))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Check if a (normalized) word is a stop word.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// A token located in the original text, by char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
    /// The normalized term, if the token survives filtering.
    pub term: Option<String>,
}

/// Stateless tokenizer shared by the indexer, the query processor, the
/// suggester and the highlighter.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_token_len: usize,
    extra_ranges: Vec<CharRange>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&TokenizerConfig::default())
    }
}

impl Tokenizer {
    pub fn new(config: &TokenizerConfig) -> Self {
        Self {
            min_token_len: config.min_token_len,
            extra_ranges: config.extra_ranges.clone(),
        }
    }

    pub fn min_token_len(&self) -> usize {
        self.min_token_len
    }

    #[inline]
    fn is_token_char(&self, c: char) -> bool {
        c.is_alphanumeric() || self.extra_ranges.iter().any(|r| r.contains(c))
    }

    /// Whether an already-normalized token is worth indexing.
    pub fn is_indexable(&self, token: &str) -> bool {
        token.chars().count() >= self.min_token_len
            && !is_stop_word(token)
            && !token.chars().all(char::is_numeric)
    }

    /// Turn text into indexable terms, in order, with repeats.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned: String = normalize(text)
            .chars()
            .map(|c| {
                if c.is_whitespace() || self.is_token_char(c) {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| self.is_indexable(token))
            .map(String::from)
            .collect()
    }

    /// Tokenize and drop repeats, keeping first-occurrence order.
    ///
    /// Query terms go through this: "rust rust" is one term, not two, so
    /// coverage and base scores don't double count.
    pub fn tokenize_unique(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tokenize(text)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }

    /// Locate token runs in the original text by char offset.
    ///
    /// Runs are split on the same char classes as [`Tokenizer::tokenize`];
    /// each run carries its normalized term when it would have been indexed.
    pub fn spans(&self, text: &str) -> Vec<TokenSpan> {
        let mut spans = Vec::new();
        let mut start: Option<usize> = None;
        let chars: Vec<char> = text.chars().collect();

        for (i, &c) in chars.iter().enumerate() {
            let inside = self.is_token_char(c);
            match (inside, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    spans.push(self.make_span(&chars, s, i));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            spans.push(self.make_span(&chars, s, chars.len()));
        }
        spans
    }

    fn make_span(&self, chars: &[char], start: usize, end: usize) -> TokenSpan {
        let raw: String = chars[start..end].iter().collect();
        let normalized = normalize(&raw);
        let term = if self.is_indexable(&normalized) {
            Some(normalized)
        } else {
            None
        };
        TokenSpan { start, end, term }
    }
}

/// Tokenize with the default configuration.
pub fn tokenize(text: &str) -> Vec<String> {
    static DEFAULT: LazyLock<Tokenizer> = LazyLock::new(Tokenizer::default);
    DEFAULT.tokenize(text)
}
