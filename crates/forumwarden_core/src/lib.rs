//! Core data types for forumwarden.
//!
//! This crate provides the plain data shared by the thread cache, the prune
//! engine and the platform adapters. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod decision;
mod event;
mod ids;
mod name;
mod stats;
mod thread;

pub use decision::{PendingDecision, PruneMode, PruneReason};
pub use event::ThreadEvent;
pub use ids::{DISCORD_EPOCH_MS, ForumId, GuildId, ThreadId, UserId, snowflake_timestamp};
pub use name::normalize_name;
pub use stats::ForumStats;
pub use thread::ThreadMeta;
