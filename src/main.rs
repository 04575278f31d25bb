// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use postdex::{
    load_corpus, Engine, Highlights, SearchConfig, SearchOptions, SearchResult, SearchStrategy,
};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Search {
            corpus,
            query,
            limit,
            highlight,
            json,
        } => run_search(config, &corpus, &query, limit, highlight, json),
        Commands::Suggest {
            corpus,
            prefix,
            limit,
        } => run_suggest(config, &corpus, &prefix, limit),
        Commands::Stats { corpus } => run_stats(config, &corpus),
    }
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    let Some(path) = path else {
        return Ok(SearchConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Ok(SearchConfig::from_json(&json)?)
}

/// Load the corpus and build the index, returning the build time in ms.
fn build_engine(config: SearchConfig, corpus: &Path) -> Result<(Engine, f64)> {
    let engine = Engine::new(config)?;
    let documents =
        load_corpus(corpus).with_context(|| format!("loading corpus {}", corpus.display()))?;
    let start = Instant::now();
    engine.initialize(documents)?;
    Ok((engine, start.elapsed().as_secs_f64() * 1000.0))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonHit<'a> {
    #[serde(flatten)]
    result: &'a SearchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlights: Option<Highlights>,
}

fn run_search(
    mut config: SearchConfig,
    corpus: &Path,
    query: &str,
    limit: usize,
    highlight: bool,
    json: bool,
) -> Result<()> {
    if highlight && !json {
        config.highlight = terminal_highlight(&config.highlight);
    }
    let (engine, build_ms) = build_engine(config, corpus)?;

    let start = Instant::now();
    let results = engine.search(query, &SearchOptions::new());
    let search_ms = start.elapsed().as_secs_f64() * 1000.0;
    let shown = &results[..results.len().min(limit)];

    if json {
        let hits: Vec<JsonHit<'_>> = shown
            .iter()
            .map(|result| JsonHit {
                result,
                highlights: highlight.then(|| engine.highlight(result, query)),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    section_top(&format!("SEARCH \"{}\"", query));
    row(&field("results", &format!("{} of {}", shown.len(), results.len())));
    row(&field("index build", &timing_ms(build_ms)));
    row(&field("search", &timing_ms(search_ms)));

    for (rank, result) in shown.iter().enumerate() {
        section_mid(&format!("#{}", rank + 1));
        let title = if highlight {
            engine.highlight(result, query).title
        } else {
            result.document.title.clone()
        };
        row(&format!(
            "{} {}",
            score_value(result.score),
            themed(BRIGHT_CYAN, &[BOLD], &title)
        ));
        row(&field("id", &result.document.id));
        if !result.matched_terms.is_empty() {
            let terms: Vec<&str> = result.matched_terms.iter().map(String::as_str).collect();
            row(&field("matched", &terms.join(", ")));
        }
        if result.exact_match_count > 0 {
            row(&field("exact fields", &result.exact_match_count.to_string()));
        }
        if !result.document.categories.is_empty() {
            row(&field(
                "categories",
                &themed(BLUE, &[], &result.document.categories.join(", ")),
            ));
        }
        if highlight {
            for snippet in engine.highlight(result, query).snippets {
                row(&format!("   {}", snippet.text));
            }
        }
    }
    section_bot();
    Ok(())
}

fn run_suggest(config: SearchConfig, corpus: &Path, prefix: &str, limit: usize) -> Result<()> {
    let (engine, _) = build_engine(config, corpus)?;
    let suggestions = engine.get_suggestions(prefix, limit);

    section_top(&format!("SUGGEST \"{}\"", prefix));
    if suggestions.is_empty() {
        row(&themed(GRAY, &[], " no suggestions"));
    }
    for suggestion in &suggestions {
        row(&format!(" {}", themed(GREEN, &[], suggestion)));
    }
    section_bot();
    Ok(())
}

fn run_stats(config: SearchConfig, corpus: &Path) -> Result<()> {
    let (engine, build_ms) = build_engine(config, corpus)?;
    let stats = engine.get_statistics();
    let config = engine.config();

    section_top("INDEX");
    row(&field("documents", &stats.documents.to_string()));
    row(&field("terms", &stats.terms.to_string()));
    row(&field("postings", &stats.postings.to_string()));
    row(&field("build", &timing_ms(build_ms)));
    let strategy = match config.query.strategy {
        SearchStrategy::IndexDriven => "index-driven (forced)",
        SearchStrategy::Scan => "scan (forced)",
        SearchStrategy::Auto if stats.documents > config.query.index_threshold => "index-driven",
        SearchStrategy::Auto => "scan",
    };
    row(&field("strategy", strategy));
    section_mid("CACHES");
    for (label, cache) in [
        ("results", &stats.result_cache),
        ("suggestions", &stats.suggestion_cache),
    ] {
        row(&field(
            label,
            &format!("{} / {} entries", cache.entries, cache.max_entries),
        ));
    }
    section_bot();
    Ok(())
}
