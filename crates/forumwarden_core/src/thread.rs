//! Thread metadata.

use crate::{ForumId, ThreadId, UserId, normalize_name};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One forum discussion thread.
///
/// The display name is stored trimmed, alongside its normalized form which is
/// what every lookup compares.
///
/// # Examples
///
/// ```
/// use forumwarden_core::{ForumId, ThreadId, ThreadMeta, UserId};
///
/// let thread = ThreadMeta::new(ThreadId(10), ForumId(1), UserId(7), "  Hollow Knight ");
/// assert_eq!(thread.name(), "Hollow Knight");
/// assert_eq!(thread.normalized_name(), "hollow knight");
/// assert_eq!(*thread.created_at(), ThreadId(10).created_at());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Getters, derive_setters::Setters, Serialize, Deserialize,
)]
#[setters(prefix = "with_")]
pub struct ThreadMeta {
    /// Stable, time-ordered thread id.
    #[setters(skip)]
    id: ThreadId,
    /// Forum the thread belongs to.
    #[setters(skip)]
    forum_id: ForumId,
    /// User who started the thread.
    #[setters(skip)]
    owner_id: UserId,
    /// Display title, trimmed.
    #[setters(skip)]
    name: String,
    /// `normalize_name(name)`.
    #[setters(skip)]
    normalized_name: String,
    /// Wall-clock creation time.
    created_at: DateTime<Utc>,
}

impl ThreadMeta {
    /// Create thread metadata, deriving the creation time from the id.
    ///
    /// Use [`ThreadMeta::with_created_at`] when the platform reports an
    /// independent creation time.
    pub fn new(id: ThreadId, forum_id: ForumId, owner_id: UserId, name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim().to_string();
        Self {
            id,
            forum_id,
            owner_id,
            normalized_name: normalize_name(&name),
            name,
            created_at: id.created_at(),
        }
    }

    /// Ordering key for "older first": creation time, then id.
    ///
    /// Two threads created at the same instant are ordered by id, so the lower
    /// id is always the older thread.
    pub fn age_key(&self) -> (DateTime<Utc>, ThreadId) {
        (self.created_at, self.id)
    }
}
