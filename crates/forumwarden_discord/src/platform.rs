//! Discord implementation of the platform collaborators.

use crate::conversions::{
    archived_threads_query, json_error_code, platform_error, thread_meta_from_channel,
};
use crate::{UNKNOWN_MEMBER, UNKNOWN_USER};
use async_trait::async_trait;
use forumwarden_cache::ThreadSource;
use forumwarden_core::{ForumId, GuildId, ThreadId, ThreadMeta, UserId};
use forumwarden_error::{PlatformError, PlatformErrorKind, PlatformResult};
use forumwarden_prune::{CommunityDirectory, Membership, ThreadDeleter};
use serenity::http::{Http, LightMethod, Request, Route};
use serenity::model::Timestamp;
use serenity::model::channel::{ChannelType, GuildChannel, ThreadsData};
use serenity::model::guild::Member;
use serenity::model::id::{
    ChannelId, GuildId as DiscordGuildId, UserId as DiscordUserId,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Page size for archived thread listing (the API maximum).
const ARCHIVE_PAGE_SIZE: u64 = 100;

/// Discord REST client for thread enumeration, member lookups and deletion.
///
/// A forum owner is a moderator when they hold one of the configured
/// moderator roles, or when their effective permissions in the forum include
/// Manage Threads or Administrator.
///
/// # Example
/// ```no_run
/// use forumwarden_discord::DiscordPlatform;
///
/// let token = std::env::var("DISCORD_TOKEN").unwrap();
/// let platform = DiscordPlatform::new(token).with_moderator_roles([1234567890]);
/// ```
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
    moderator_roles: HashSet<u64>,
}

fn to_channel(id: u64) -> PlatformResult<ChannelId> {
    if id == 0 {
        return Err(PlatformError::new(PlatformErrorKind::NotFound(
            "channel 0".to_string(),
        )));
    }
    Ok(ChannelId::new(id))
}

fn to_guild(id: GuildId) -> PlatformResult<DiscordGuildId> {
    if id.get() == 0 {
        return Err(PlatformError::new(PlatformErrorKind::NotFound(
            "guild 0".to_string(),
        )));
    }
    Ok(DiscordGuildId::new(id.get()))
}

fn to_user(id: UserId) -> PlatformResult<DiscordUserId> {
    if id.get() == 0 {
        return Err(PlatformError::new(PlatformErrorKind::NotFound(
            "user 0".to_string(),
        )));
    }
    Ok(DiscordUserId::new(id.get()))
}

impl DiscordPlatform {
    /// Create a platform client from a bot token.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self::with_http_client(Arc::new(Http::new(token.as_ref())))
    }

    /// Create a platform client sharing an existing HTTP client.
    pub fn with_http_client(http: Arc<Http>) -> Self {
        Self {
            http,
            moderator_roles: HashSet::new(),
        }
    }

    /// Treat holders of these role ids as moderators.
    pub fn with_moderator_roles(mut self, roles: impl IntoIterator<Item = u64>) -> Self {
        self.moderator_roles = roles.into_iter().collect();
        self
    }

    /// Underlying serenity HTTP client.
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }

    /// Fetch a channel and check that it is a forum.
    async fn forum_channel(&self, forum_id: ForumId) -> PlatformResult<GuildChannel> {
        let channel = self
            .http
            .get_channel(to_channel(forum_id.get())?)
            .await
            .map_err(platform_error)?
            .guild()
            .filter(|channel| channel.kind == ChannelType::Forum)
            .ok_or_else(|| {
                PlatformError::new(PlatformErrorKind::InvalidContainer(forum_id.get()))
            })?;
        Ok(channel)
    }

    /// Fetch a member; `None` when the platform says they are not one.
    async fn member(&self, guild: GuildId, user: UserId) -> PlatformResult<Option<Member>> {
        match self.http.get_member(to_guild(guild)?, to_user(user)?).await {
            Ok(member) => Ok(Some(member)),
            Err(e) if matches!(json_error_code(&e), Some(UNKNOWN_MEMBER | UNKNOWN_USER)) => {
                Ok(None)
            }
            Err(e) => Err(platform_error(e)),
        }
    }

    /// Archived public threads of a forum, newest archive first.
    ///
    /// Pages are walked with the oldest archive timestamp seen so far as the
    /// cursor; the walk stops when the cursor no longer moves back.
    async fn archived_threads(&self, forum: ChannelId) -> PlatformResult<Vec<GuildChannel>> {
        let mut threads = Vec::new();
        let mut before: Option<Timestamp> = None;
        loop {
            let request = Request::new(
                Route::ChannelArchivedPublicThreads { channel_id: forum },
                LightMethod::Get,
            )
            .params(Some(archived_threads_query(before.as_ref(), ARCHIVE_PAGE_SIZE)));
            let page: ThreadsData = self.http.fire(request).await.map_err(platform_error)?;
            let next = page
                .threads
                .iter()
                .filter_map(|thread| thread.thread_metadata.as_ref())
                .filter_map(|metadata| metadata.archive_timestamp)
                .min();
            let more = page.has_more && !page.threads.is_empty();
            debug!(page = page.threads.len(), more, "Fetched archived threads");
            threads.extend(page.threads);
            match next {
                Some(next) if more && before.is_none_or(|prev| next < prev) => {
                    before = Some(next)
                }
                _ => break,
            }
        }
        Ok(threads)
    }
}

#[async_trait]
impl ThreadSource for DiscordPlatform {
    #[instrument(skip(self), fields(guild_id = %guild_id, forum_id = %forum_id, active, archived))]
    async fn list_forum_threads(
        &self,
        guild_id: GuildId,
        forum_id: ForumId,
    ) -> PlatformResult<Vec<ThreadMeta>> {
        let forum = self.forum_channel(forum_id).await?;

        let active: Vec<GuildChannel> = self
            .http
            .get_guild_active_threads(to_guild(guild_id)?)
            .await
            .map_err(platform_error)?
            .threads
            .into_iter()
            .filter(|thread| thread.parent_id == Some(forum.id))
            .collect();
        let archived = self.archived_threads(forum.id).await?;

        tracing::Span::current().record("active", active.len());
        tracing::Span::current().record("archived", archived.len());
        debug!(
            active = active.len(),
            archived = archived.len(),
            "Enumerated forum threads"
        );

        Ok(active
            .iter()
            .chain(archived.iter())
            .filter_map(thread_meta_from_channel)
            .collect())
    }
}

#[async_trait]
impl CommunityDirectory for DiscordPlatform {
    #[instrument(skip(self), fields(guild_id = %guild_id, user_id = %user_id))]
    async fn membership(&self, guild_id: GuildId, user_id: UserId) -> PlatformResult<Membership> {
        let membership = match self.member(guild_id, user_id).await? {
            Some(_) => Membership::Present,
            None => Membership::Absent,
        };
        debug!(?membership, "Looked up membership");
        Ok(membership)
    }

    #[instrument(skip(self), fields(guild_id = %guild_id, forum_id = %forum_id, user_id = %user_id))]
    async fn is_moderator(
        &self,
        guild_id: GuildId,
        forum_id: ForumId,
        user_id: UserId,
    ) -> PlatformResult<bool> {
        let Some(member) = self.member(guild_id, user_id).await? else {
            return Ok(false);
        };
        if member
            .roles
            .iter()
            .any(|role| self.moderator_roles.contains(&role.get()))
        {
            debug!("Owner holds a moderator role");
            return Ok(true);
        }

        let guild = self
            .http
            .get_guild(to_guild(guild_id)?)
            .await
            .map_err(platform_error)?;
        let forum = self.forum_channel(forum_id).await?;
        let permissions = guild.user_permissions_in(&forum, &member);
        let moderator = permissions.administrator() || permissions.manage_threads();
        debug!(moderator, "Checked forum permissions");
        Ok(moderator)
    }
}

#[async_trait]
impl ThreadDeleter for DiscordPlatform {
    #[instrument(skip(self), fields(thread_id = %thread_id))]
    async fn delete_thread(&self, thread_id: ThreadId, audit_reason: &str) -> PlatformResult<()> {
        self.http
            .delete_channel(to_channel(thread_id.get())?, Some(audit_reason))
            .await
            .map_err(platform_error)?;
        debug!("Deleted thread");
        Ok(())
    }
}
