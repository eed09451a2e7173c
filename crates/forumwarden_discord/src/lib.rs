//! Discord adapter for forumwarden.
//!
//! - [`DiscordPlatform`] implements the cache's [`ThreadSource`] and the
//!   pruner's [`CommunityDirectory`] and [`ThreadDeleter`] on serenity's HTTP
//!   client.
//! - [`ForumEventHandler`] feeds gateway thread events into a
//!   [`ForumCacheService`] and refreshes the watched forums on connect.
//! - [`WardenBot`] wires the handler into a serenity client.
//!
//! [`ThreadSource`]: forumwarden_cache::ThreadSource
//! [`ForumCacheService`]: forumwarden_cache::ForumCacheService
//! [`CommunityDirectory`]: forumwarden_prune::CommunityDirectory
//! [`ThreadDeleter`]: forumwarden_prune::ThreadDeleter

#![warn(missing_docs)]

mod bot;
mod conversions;
mod handler;
mod platform;

pub use bot::WardenBot;
pub use conversions::{
    UNKNOWN_CHANNEL, UNKNOWN_MEMBER, UNKNOWN_USER, archived_threads_query, classify_http_failure,
    platform_error,
    thread_event_from_channel, thread_meta_from_channel, thread_meta_from_parts,
};
pub use handler::ForumEventHandler;
pub use platform::DiscordPlatform;
