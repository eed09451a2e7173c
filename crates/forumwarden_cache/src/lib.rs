//! Forum thread cache.
//!
//! This crate keeps an in-memory, per-forum index of thread metadata that is
//! rebuilt wholesale from the chat platform on every refresh, and serves exact
//! and fuzzy name lookups fast enough for live autocomplete.
//!
//! - [`ThreadRegistry`] owns the forum → index table and the locking discipline
//! - [`ForumIndex`] is one immutable snapshot of a forum with its name index
//! - [`ForumCacheService`] ties the registry to a [`ThreadSource`]

#![warn(missing_docs)]

mod config;
mod index;
mod registry;
mod search;
mod service;
mod source;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use index::ForumIndex;
pub use registry::ThreadRegistry;
pub use search::{MatchScore, MatchTier, search_index};
pub use service::ForumCacheService;
pub use source::ThreadSource;
