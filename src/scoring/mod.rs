// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! A post's score is built in a fixed order: weighted field counts, then the
//! exact-phrase multiplier, then the additive recency bonus, then the
//! coverage factor. Ranking is score descending with corpus order breaking
//! ties, so the same query over the same corpus always ranks the same way.

mod core;
pub mod ranking;

pub use self::core::*;
