//! CLI command definitions.

use clap::{Parser, Subcommand};
use forumwarden::AuditFormat;
use std::path::PathBuf;

/// forumwarden - forum thread cache, search and pruning for Discord
#[derive(Parser, Debug)]
#[command(name = "forumwarden")]
#[command(about = "Forum thread cache, search and pruning for Discord", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (replaces ./forumwarden.toml and the home config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show thread and owner counts for a forum
    Stats {
        /// Forum channel id
        forum: u64,
    },

    /// Search a forum's threads by name
    Search {
        /// Forum channel id
        forum: u64,

        /// Search text; empty lists the newest threads
        query: String,

        /// Maximum number of results (defaults to cache.default_search_results)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Look up a thread by exact name
    Find {
        /// Forum channel id
        forum: u64,

        /// Thread name, compared case-insensitively
        name: String,
    },

    /// Flag, and optionally delete, departed-owner and duplicate threads
    Prune {
        /// Forum channel id
        forum: u64,

        /// Delete flagged threads instead of only reporting them
        #[arg(long)]
        execute: bool,

        /// Write the flagged threads to this file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Export format
        #[arg(long, default_value = "csv")]
        format: AuditFormat,
    },

    /// Connect to the gateway and keep the configured forums cached
    Watch,
}
