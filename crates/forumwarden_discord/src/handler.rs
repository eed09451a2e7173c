//! Gateway event handler keeping the thread cache current.

use crate::thread_event_from_channel;
use forumwarden_cache::ForumCacheService;
use forumwarden_core::{ForumId, GuildId, ThreadEvent, ThreadId};
use serenity::all::Ready;
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::{GuildChannel, PartialGuildChannel};
use serenity::model::gateway::GatewayIntents;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Applies thread create/update/delete events to a [`ForumCacheService`].
///
/// On connect every watched forum is registered and refreshed, which also
/// covers anything missed while disconnected. Events from other guilds or for
/// unwatched forums are ignored.
pub struct ForumEventHandler {
    cache: Arc<ForumCacheService>,
    guild_id: GuildId,
    forums: Vec<ForumId>,
}

impl ForumEventHandler {
    /// Create a handler for `forums` in `guild_id`.
    pub fn new(cache: Arc<ForumCacheService>, guild_id: GuildId, forums: Vec<ForumId>) -> Self {
        Self {
            cache,
            guild_id,
            forums,
        }
    }

    /// Gateway intents the handler needs. Thread events arrive under `GUILDS`.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }

    fn watches(&self, guild_id: u64) -> bool {
        guild_id == self.guild_id.get()
    }

    fn apply(&self, event: ThreadEvent) {
        let applied = self.cache.apply_event(&event);
        debug!(forum_id = %event.forum_id(), applied, "Thread event");
    }

    fn upsert(&self, thread: &GuildChannel) {
        if !self.watches(thread.guild_id.get()) {
            return;
        }
        if let Some(event) = thread_event_from_channel(thread) {
            self.apply(event);
        }
    }

    /// Register and refresh every watched forum.
    pub async fn refresh_all(&self) {
        for forum_id in &self.forums {
            self.cache.register_forum(*forum_id);
            match self.cache.refresh_forum(self.guild_id, *forum_id).await {
                Ok(stats) => info!(
                    forum_id = %forum_id,
                    thread_count = stats.thread_count(),
                    "Forum ready"
                ),
                Err(e) => error!(forum_id = %forum_id, error = %e, "Initial refresh failed"),
            }
        }
    }
}

#[async_trait]
impl EventHandler for ForumEventHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            forums = self.forums.len(),
            "Bot connected to Discord"
        );
        self.refresh_all().await;
    }

    async fn thread_create(&self, _ctx: Context, thread: GuildChannel) {
        self.upsert(&thread);
    }

    async fn thread_update(&self, _ctx: Context, _old: Option<GuildChannel>, new: GuildChannel) {
        self.upsert(&new);
    }

    async fn thread_delete(
        &self,
        _ctx: Context,
        thread: PartialGuildChannel,
        _full_thread_data: Option<GuildChannel>,
    ) {
        if !self.watches(thread.guild_id.get()) {
            return;
        }
        self.apply(ThreadEvent::Removed {
            forum_id: ForumId(thread.parent_id.get()),
            thread_id: ThreadId(thread.id.get()),
        });
    }
}
