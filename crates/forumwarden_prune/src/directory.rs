//! Platform collaborators used by the prune orchestrator.

use async_trait::async_trait;
use forumwarden_core::{ForumId, GuildId, ThreadId, UserId};
use forumwarden_error::PlatformResult;

/// Outcome of a membership lookup that reached the platform.
///
/// A failed lookup is an `Err`, never `Absent`: only a confirmed absence may
/// lead to a departed-owner flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Membership {
    /// The user is a member of the community.
    Present,
    /// The platform confirmed the user is not a member.
    Absent,
}

/// Answers questions about community members.
#[async_trait]
pub trait CommunityDirectory: Send + Sync {
    /// Whether `user_id` is currently a member of `guild_id`.
    async fn membership(&self, guild_id: GuildId, user_id: UserId) -> PlatformResult<Membership>;

    /// Whether `user_id` holds moderator rights over `forum_id`.
    async fn is_moderator(
        &self,
        guild_id: GuildId,
        forum_id: ForumId,
        user_id: UserId,
    ) -> PlatformResult<bool>;
}

/// Deletes threads on the platform.
#[async_trait]
pub trait ThreadDeleter: Send + Sync {
    /// Delete `thread_id`, attaching `audit_reason` to the platform audit log.
    async fn delete_thread(&self, thread_id: ThreadId, audit_reason: &str) -> PlatformResult<()>;
}
