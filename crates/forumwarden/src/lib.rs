//! forumwarden - forum thread cache and reconciliation for Discord communities
//!
//! forumwarden keeps an in-memory index of every thread in a set of forum
//! channels, answers exact and fuzzy name lookups against it, and prunes
//! threads whose owner left the community or that duplicate a newer thread
//! by the same owner.
//!
//! # Cargo Features
//!
//! - `discord` - Discord adapter and the `forumwarden` binary
//!
//! # Architecture
//!
//! - `forumwarden_error` - Error types
//! - `forumwarden_core` - Ids, thread metadata and prune decision types
//! - `forumwarden_cache` - Thread registry, name index, search and the cache service
//! - `forumwarden_prune` - Decision engine, orchestrator and audit export
//! - `forumwarden_discord` - serenity-backed platform adapter
//!
//! This crate re-exports everything for convenience.

#![warn(missing_docs)]

mod config;
pub mod observability;

pub use config::{DiscordConfig, WardenConfig};
pub use observability::{LoggingConfig, init_logging};

pub use forumwarden_cache::*;
pub use forumwarden_core::*;
pub use forumwarden_error::*;
pub use forumwarden_prune::*;

#[cfg(feature = "discord")]
pub use forumwarden_discord::*;
