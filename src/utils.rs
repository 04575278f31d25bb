// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility functions for string processing.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize a string for search: lowercase and strip diacritics.
///
/// This lets ASCII queries find accented text and vice versa:
/// - "café" → "cafe"
/// - "naïve" → "naive"
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks
/// 3. Lowercase
///
/// Whitespace is left alone; the tokenizer splits on it afterwards.
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Lightweight normalization for builds without unicode-normalization.
/// Just lowercases. Assumes input is ASCII or pre-normalized.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Check if a character is a combining mark (diacritic).
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Lowercase a single character, keeping a one-to-one char mapping.
///
/// `str::to_lowercase` may change the number of chars (`İ` → `i̇`), which
/// breaks offset bookkeeping in the highlighter. Taking the first char of
/// the lowercase expansion keeps positions aligned.
#[inline]
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Lowercase a string char-by-char so that char offsets survive.
pub fn fold_chars(value: &str) -> Vec<char> {
    value.chars().map(fold_char).collect()
}

/// Find every non-overlapping occurrence of `needle` in `haystack`, by char index.
///
/// Both inputs are expected to be folded already. Returns `(start, end)` pairs
/// with `end` exclusive.
pub fn find_char_ranges(haystack: &[char], needle: &[char]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    if needle.is_empty() || needle.len() > haystack.len() {
        return ranges;
    }
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == *needle {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Case-insensitive substring check over folded chars.
///
/// Folding only lowercases; diacritics are kept. Term matching strips them,
/// so `cafe` matches the term in `Café` while the phrase check does not.
pub fn contains_folded(haystack: &str, folded_needle: &[char]) -> bool {
    if folded_needle.is_empty() {
        return false;
    }
    let folded = fold_chars(haystack);
    folded
        .windows(folded_needle.len())
        .any(|window| window == folded_needle)
}

/// Truncate to at most `max_chars` chars without splitting a code point.
pub fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &value[..byte_idx],
        None => value,
    }
}
