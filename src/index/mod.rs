// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: the data structure that makes search fast.
//!
//! One index type: an inverted index from term to per-document, per-field
//! occurrence counts. It is rebuilt from scratch whenever the corpus
//! changes, never patched in place.

mod inverted;
#[cfg(feature = "parallel")]
mod parallel;

pub use inverted::*;
#[cfg(feature = "parallel")]
pub use parallel::*;

use crate::error::EngineError;
use crate::types::Document;
use std::collections::HashMap;
use std::sync::Arc;

/// Reject corpora where two posts share an id.
///
/// Checked before any index work starts, so a bad corpus never replaces a
/// good index.
pub fn check_unique_ids(documents: &[Arc<Document>]) -> Result<(), EngineError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(documents.len());
    for (position, doc) in documents.iter().enumerate() {
        if let Some(&first) = seen.get(doc.id.as_str()) {
            return Err(EngineError::DuplicateDocumentId {
                id: doc.id.clone(),
                first,
                second: position,
            });
        }
        seen.insert(doc.id.as_str(), position);
    }
    Ok(())
}
