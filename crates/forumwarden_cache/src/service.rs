//! Forum cache service.

use crate::{CacheConfig, ThreadRegistry, ThreadSource, search_index};
use forumwarden_core::{ForumId, ForumStats, GuildId, ThreadEvent, ThreadId, ThreadMeta};
use forumwarden_error::{CacheError, CacheErrorKind, CacheResult, PlatformErrorKind};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Reads and refreshes the per-forum thread cache.
///
/// One long-lived instance is shared (behind an `Arc`) by every consumer:
/// autocomplete handlers, moderation commands and the prune orchestrator.
/// Reads are synchronous in-memory lookups; only [`refresh_forum`] talks to
/// the platform.
///
/// [`refresh_forum`]: ForumCacheService::refresh_forum
pub struct ForumCacheService {
    registry: ThreadRegistry,
    source: Arc<dyn ThreadSource>,
    config: CacheConfig,
}

impl ForumCacheService {
    /// Create a service that refreshes from `source`.
    pub fn new(source: Arc<dyn ThreadSource>, config: CacheConfig) -> Self {
        debug!(
            max_search_results = config.max_search_results(),
            "Creating ForumCacheService"
        );
        Self {
            registry: ThreadRegistry::new(),
            source,
            config,
        }
    }

    /// Cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Register a forum. Idempotent; returns `true` on first registration.
    pub fn register_forum(&self, forum_id: ForumId) -> bool {
        self.registry.register(forum_id)
    }

    /// Registered forums, ascending.
    pub fn forums(&self) -> Vec<ForumId> {
        self.registry.forums()
    }

    /// Rebuild a forum's index from the platform.
    ///
    /// The forum's thread set is replaced wholesale, healing any drift from
    /// missed events or manual moderator actions. The forum is registered if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns `CacheErrorKind::InvalidContainer` when the id is not a forum
    /// and `CacheErrorKind::RefreshFailed` for any other enumeration failure.
    /// In both cases the cache is left exactly as it was.
    #[instrument(
        skip(self),
        fields(guild_id = %guild_id, forum_id = %forum_id, thread_count, owner_count)
    )]
    pub async fn refresh_forum(
        &self,
        guild_id: GuildId,
        forum_id: ForumId,
    ) -> CacheResult<ForumStats> {
        debug!("Enumerating forum threads");
        let threads = self
            .source
            .list_forum_threads(guild_id, forum_id)
            .await
            .map_err(|e| {
                error!(error = %e, "Forum refresh failed, keeping previous index");
                match e.kind() {
                    PlatformErrorKind::InvalidContainer(id) => {
                        CacheError::new(CacheErrorKind::InvalidContainer(*id))
                    }
                    kind => CacheError::new(CacheErrorKind::RefreshFailed {
                        forum_id: forum_id.get(),
                        reason: kind.to_string(),
                    }),
                }
            })?;

        let stats = self.registry.replace(forum_id, threads);

        tracing::Span::current().record("thread_count", stats.thread_count());
        tracing::Span::current().record("owner_count", stats.owner_count());
        info!(
            thread_count = stats.thread_count(),
            owner_count = stats.owner_count(),
            "Forum refreshed"
        );

        Ok(stats)
    }

    /// Apply a live thread change between refreshes.
    ///
    /// Returns `false` when the event's forum is not registered; such events
    /// are dropped because the next refresh will pick the change up.
    #[instrument(skip(self, event), fields(forum_id = %event.forum_id()))]
    pub fn apply_event(&self, event: &ThreadEvent) -> bool {
        let applied = self.registry.apply(event);
        debug!(applied, "Applied thread event");
        applied
    }

    /// Exact lookup by normalized name.
    ///
    /// The caller normalizes (`forumwarden_core::normalize_name`). With several
    /// same-name threads the lowest id, i.e. the oldest, is returned on every
    /// call.
    pub fn get_thread_by_exact_name(
        &self,
        forum_id: ForumId,
        normalized_name: &str,
    ) -> Option<ThreadMeta> {
        let index = self.registry.get(forum_id)?;
        index.find_exact(normalized_name).cloned()
    }

    /// Look up a thread by id.
    pub fn get_thread(&self, forum_id: ForumId, thread_id: ThreadId) -> Option<ThreadMeta> {
        let index = self.registry.get(forum_id)?;
        index.get(thread_id).cloned()
    }

    /// Scored name search, best match first.
    ///
    /// `limit` is capped at the configured maximum. Returns `None` when the
    /// forum is not registered.
    #[instrument(skip(self), fields(forum_id = %forum_id, result_count))]
    pub fn search_threads(
        &self,
        forum_id: ForumId,
        query: &str,
        limit: usize,
    ) -> Option<Vec<ThreadMeta>> {
        let index = self.registry.get(forum_id)?;
        let limit = limit.min(*self.config.max_search_results());
        let results = search_index(&index, query, limit);
        tracing::Span::current().record("result_count", results.len());
        Some(results)
    }

    /// Owned snapshot of every thread in a forum, ascending id.
    pub fn list_threads(&self, forum_id: ForumId) -> Option<Vec<ThreadMeta>> {
        let index = self.registry.get(forum_id)?;
        Some(index.iter().cloned().collect())
    }

    /// Thread and owner counts for a forum.
    pub fn stats(&self, forum_id: ForumId) -> Option<ForumStats> {
        self.registry.get(forum_id).map(|index| index.stats())
    }
}
