// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the postdex command-line interface.
//!
//! Three subcommands over a JSON corpus file (an array of posts): `search`
//! to run a ranked query, `suggest` for prefix completions, and `stats` to
//! see what the index holds. Every invocation builds the index fresh; the
//! engine's caches only matter within one process, so this is a debugging
//! and tuning tool rather than a server.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "postdex",
    about = "Full-text search over a blog's posts",
    version
)]
pub struct Cli {
    /// Engine configuration (JSON, camelCase keys). Missing keys use defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank posts against a query
    Search {
        /// JSON file holding an array of posts
        corpus: PathBuf,

        /// Search query. An empty string lists every post.
        query: String,

        /// Maximum number of results to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Show highlighted title and best snippets for each hit
        #[arg(long)]
        highlight: bool,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Complete a prefix from the index vocabulary
    Suggest {
        /// JSON file holding an array of posts
        corpus: PathBuf,

        /// Prefix to complete (at least two characters)
        prefix: String,

        /// Maximum number of suggestions
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show index and cache statistics
    Stats {
        /// JSON file holding an array of posts
        corpus: PathBuf,
    },
}
