//! Thread enumeration collaborator.

use async_trait::async_trait;
use forumwarden_core::{ForumId, GuildId, ThreadMeta};
use forumwarden_error::PlatformResult;

/// Enumerates every thread of a forum on the remote platform.
///
/// Implementations must return archived threads as well as active ones: a
/// missing archived thread makes its owner's newer thread look unique and
/// can hide a departed owner's leftovers.
#[async_trait]
pub trait ThreadSource: Send + Sync {
    /// List all active and archived threads in `forum_id`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformErrorKind::InvalidContainer` when `forum_id` is not a
    /// forum, and a transport error when the platform cannot be reached.
    async fn list_forum_threads(
        &self,
        guild_id: GuildId,
        forum_id: ForumId,
    ) -> PlatformResult<Vec<ThreadMeta>>;
}
