// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Match decoration for the results list.
//!
//! Pure functions of (post, raw query, matched terms). Nothing here touches
//! the index or the caches, so highlighting runs lazily, only for the
//! results a caller actually shows.
//!
//! Two kinds of marks:
//! - **exact**: the raw query found verbatim (case-insensitive)
//! - **term**: a whole token whose normalized form is a matched term
//!
//! Exact marks win. A term that falls inside an exact span is not wrapped
//! again, so the output never nests `<mark>` tags.

use crate::config::HighlightConfig;
use crate::tokenizer::Tokenizer;
use crate::types::{Document, SearchResult};
use crate::utils::{contains_folded, find_char_ranges, fold_chars};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Decorated fields of one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    pub title: String,
    /// Best-matching content sentences, best first.
    pub snippets: Vec<Snippet>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// One matching sentence with a neighbouring sentence for context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Position of the sentence in the post body.
    pub sentence: usize,
    /// The sentence, with marks.
    pub text: String,
    /// Previous sentence, or the next one for the opening sentence. Escaped, unmarked.
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkKind {
    Exact,
    Term,
}

#[derive(Debug, Clone, Copy)]
struct Mark {
    start: usize,
    end: usize,
    kind: MarkKind,
}

/// What to look for, prepared once per post.
struct Needles<'a> {
    folded_query: Vec<char>,
    terms: &'a BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct Highlighter {
    tokenizer: Tokenizer,
    config: HighlightConfig,
}

impl Highlighter {
    pub fn new(tokenizer: Tokenizer, config: HighlightConfig) -> Self {
        Self { tokenizer, config }
    }

    /// Highlight a search result against the query that produced it.
    pub fn highlight_result(&self, result: &SearchResult, raw_query: &str) -> Highlights {
        self.highlight(&result.document, raw_query, &result.matched_terms)
    }

    pub fn highlight(
        &self,
        doc: &Document,
        raw_query: &str,
        matched_terms: &BTreeSet<String>,
    ) -> Highlights {
        let needles = Needles {
            folded_query: fold_chars(raw_query.trim()),
            terms: matched_terms,
        };

        Highlights {
            title: self.mark(&doc.title, &needles),
            snippets: self.snippets(&doc.content, &needles),
            categories: doc.categories.iter().map(|c| self.mark(c, &needles)).collect(),
            tags: doc.tags.iter().map(|t| self.mark(t, &needles)).collect(),
        }
    }

    /// Wrap exact and term matches in `text`.
    pub fn mark_text(&self, text: &str, raw_query: &str, matched_terms: &BTreeSet<String>) -> String {
        let needles = Needles {
            folded_query: fold_chars(raw_query.trim()),
            terms: matched_terms,
        };
        self.mark(text, &needles)
    }

    fn mark(&self, text: &str, needles: &Needles<'_>) -> String {
        let chars: Vec<char> = text.chars().collect();
        let marks = self.find_marks(text, needles);

        let mut out = String::with_capacity(text.len() + marks.len() * 24);
        let mut cursor = 0;
        for mark in marks {
            self.push_text(&mut out, &chars[cursor..mark.start]);
            let (open, close) = match mark.kind {
                MarkKind::Exact => (&self.config.exact_open, &self.config.exact_close),
                MarkKind::Term => (&self.config.term_open, &self.config.term_close),
            };
            out.push_str(open);
            self.push_text(&mut out, &chars[mark.start..mark.end]);
            out.push_str(close);
            cursor = mark.end;
        }
        self.push_text(&mut out, &chars[cursor..]);
        out
    }

    /// Non-overlapping marks sorted by start.
    fn find_marks(&self, text: &str, needles: &Needles<'_>) -> Vec<Mark> {
        let folded = fold_chars(text);
        let mut marks: Vec<Mark> = find_char_ranges(&folded, &needles.folded_query)
            .into_iter()
            .map(|(start, end)| Mark {
                start,
                end,
                kind: MarkKind::Exact,
            })
            .collect();

        if !needles.terms.is_empty() {
            let exact = marks.clone();
            for span in self.tokenizer.spans(text) {
                let Some(term) = span.term.as_ref() else {
                    continue;
                };
                if !needles.terms.contains(term) {
                    continue;
                }
                let overlaps = exact
                    .iter()
                    .any(|m| span.start < m.end && m.start < span.end);
                if !overlaps {
                    marks.push(Mark {
                        start: span.start,
                        end: span.end,
                        kind: MarkKind::Term,
                    });
                }
            }
        }

        marks.sort_by_key(|m| m.start);
        marks
    }

    fn push_text(&self, out: &mut String, chars: &[char]) {
        for &c in chars {
            if self.config.escape_html {
                match c {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    '"' => out.push_str("&quot;"),
                    '\'' => out.push_str("&#39;"),
                    _ => out.push(c),
                }
            } else {
                out.push(c);
            }
        }
    }

    fn escape(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        self.push_text(&mut out, &chars);
        out
    }

    fn snippets(&self, content: &str, needles: &Needles<'_>) -> Vec<Snippet> {
        let sentences = split_sentences(content);

        // (has phrase, distinct terms, position)
        let mut scored: Vec<(bool, usize, usize)> = sentences
            .iter()
            .enumerate()
            .filter_map(|(i, sentence)| {
                let has_phrase = contains_folded(sentence, &needles.folded_query);
                let hits: HashSet<String> = self
                    .tokenizer
                    .spans(sentence)
                    .into_iter()
                    .filter_map(|s| s.term)
                    .filter(|t| needles.terms.contains(t))
                    .collect();
                (has_phrase || !hits.is_empty()).then_some((has_phrase, hits.len(), i))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));
        scored.truncate(self.config.max_snippets);

        scored
            .into_iter()
            .map(|(_, _, i)| {
                let context = if i > 0 {
                    sentences.get(i - 1)
                } else {
                    sentences.get(i + 1)
                };
                Snippet {
                    sentence: i,
                    text: self.mark(sentences[i], needles),
                    context: context.map(|c| self.escape(c)),
                }
            })
            .collect()
    }
}

/// Split text after `.`, `!`, `?`, their CJK forms, and newlines. Trimmed, empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?' | '。' | '！' | '？' | '\n') {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
