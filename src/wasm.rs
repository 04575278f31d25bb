// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the admin console.
//!
//! `PostSearch` wraps an [`Engine`] for the console's JavaScript. Posts go in
//! as plain objects (ISO-8601 `date` strings), results come out as plain
//! objects with their highlights attached, since the console renders every
//! hit it gets back.
//!
//! Deferred builds: call `scheduleInitialize` after each post edit and
//! `runPendingBuild` from `requestIdleCallback`. A search issued before the
//! idle callback fires runs the build itself.

use crate::engine::{BuildStatus, BuildTicket, Clock, Engine};
use crate::highlight::Highlights;
use crate::types::{Document, SearchOptions, SearchResult};
use crate::SearchConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use std::sync::Arc;
use wasm_bindgen::prelude::*;

/// `Utc::now()` has no clock source on wasm32-unknown-unknown.
struct JsClock;

impl Clock for JsClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit<'a> {
    #[serde(flatten)]
    result: &'a SearchResult,
    highlights: Highlights,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects rather than JS Maps, numbers rather than BigInts
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct PostSearch {
    engine: Engine,
}

#[wasm_bindgen]
impl PostSearch {
    /// Create an engine. `config` is a partial `SearchConfig`; omitted keys
    /// take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsValue>) -> Result<PostSearch, JsValue> {
        let config: SearchConfig = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                from_value(value).map_err(js_err)?
            }
            _ => SearchConfig::default(),
        };
        let engine = Engine::with_clock(config, Arc::new(JsClock)).map_err(js_err)?;
        Ok(PostSearch { engine })
    }

    /// Rebuild the index now.
    #[wasm_bindgen]
    pub fn initialize(&self, posts: JsValue) -> Result<(), JsValue> {
        let posts: Vec<Document> = from_value(posts).map_err(js_err)?;
        self.engine.initialize(posts).map_err(js_err)
    }

    /// Queue a rebuild. Returns the build's generation.
    #[wasm_bindgen(js_name = scheduleInitialize)]
    pub fn schedule_initialize(&self, posts: JsValue) -> Result<f64, JsValue> {
        let posts: Vec<Document> = from_value(posts).map_err(js_err)?;
        Ok(self.engine.schedule_initialize(posts).generation() as f64)
    }

    /// Run the queued rebuild, if any. Returns its generation or `undefined`.
    #[wasm_bindgen(js_name = runPendingBuild)]
    pub fn run_pending_build(&self) -> Result<Option<f64>, JsValue> {
        let ticket = self.engine.run_pending_build().map_err(js_err)?;
        Ok(ticket.map(|t| t.generation() as f64))
    }

    /// `"pending"`, `"complete"` or `"failed"`.
    #[wasm_bindgen(js_name = buildStatus)]
    pub fn build_status(&self, generation: f64) -> String {
        match self.engine.build_status(BuildTicket::from(generation as u64)) {
            BuildStatus::Pending => "pending",
            BuildStatus::Complete => "complete",
            BuildStatus::Failed => "failed",
        }
        .to_string()
    }

    /// Ranked results, each with `highlights`.
    #[wasm_bindgen]
    pub fn search(&self, query: &str, options: Option<JsValue>) -> Result<JsValue, JsValue> {
        // Options only key the cache, so unreadable ones are treated as empty
        let options: SearchOptions = match options {
            Some(value) => from_value(value).unwrap_or_default(),
            None => SearchOptions::default(),
        };
        let results = self.engine.search(query, &options);
        let hits: Vec<SearchHit<'_>> = results
            .iter()
            .map(|result| SearchHit {
                result,
                highlights: self.engine.highlight(result, query),
            })
            .collect();
        to_js(&hits)
    }

    #[wasm_bindgen(js_name = getSuggestions)]
    pub fn get_suggestions(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        self.engine.get_suggestions(prefix, limit.unwrap_or(5))
    }

    #[wasm_bindgen(js_name = getStatistics)]
    pub fn get_statistics(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.get_statistics())
    }
}
