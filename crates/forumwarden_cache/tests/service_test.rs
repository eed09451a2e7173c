//! Tests for the forum cache service with a mock thread source.

use async_trait::async_trait;
use forumwarden_cache::{CacheConfig, ForumCacheService, ThreadSource};
use forumwarden_core::{ForumId, GuildId, ThreadEvent, ThreadId, ThreadMeta, UserId};
use forumwarden_error::{CacheErrorKind, PlatformError, PlatformErrorKind, PlatformResult};
use parking_lot::Mutex;
use std::sync::Arc;

const GUILD: GuildId = GuildId(1);
const FORUM: ForumId = ForumId(1000);

/// Mock source returning a scripted sequence of responses.
struct MockSource {
    responses: Mutex<Vec<PlatformResult<Vec<ThreadMeta>>>>,
}

impl MockSource {
    fn new(responses: Vec<PlatformResult<Vec<ThreadMeta>>>) -> Arc<Self> {
        let mut responses = responses;
        responses.reverse();
        Arc::new(Self {
            responses: Mutex::new(responses),
        })
    }
}

#[async_trait]
impl ThreadSource for MockSource {
    async fn list_forum_threads(
        &self,
        _guild_id: GuildId,
        _forum_id: ForumId,
    ) -> PlatformResult<Vec<ThreadMeta>> {
        self.responses
            .lock()
            .pop()
            .unwrap_or_else(|| Err(PlatformError::transport("no scripted response")))
    }
}

fn thread_meta(id: u64, owner: u64, name: &str) -> ThreadMeta {
    ThreadMeta::new(ThreadId(id << 22), FORUM, UserId(owner), name)
}

fn service(responses: Vec<PlatformResult<Vec<ThreadMeta>>>) -> ForumCacheService {
    ForumCacheService::new(MockSource::new(responses), CacheConfig::default())
}

#[tokio::test]
async fn test_lookups_before_registration_are_not_found() {
    let cache = service(vec![]);
    assert!(cache.get_thread_by_exact_name(FORUM, "celeste").is_none());
    assert!(cache.search_threads(FORUM, "celeste", 5).is_none());
    assert!(cache.list_threads(FORUM).is_none());
    assert!(cache.stats(FORUM).is_none());
}

#[tokio::test]
async fn test_registered_forum_is_empty_until_refresh() {
    let cache = service(vec![]);
    assert!(cache.register_forum(FORUM));
    assert!(!cache.register_forum(FORUM));
    assert_eq!(cache.list_threads(FORUM), Some(vec![]));
    let stats = cache.stats(FORUM).unwrap();
    assert_eq!(stats.thread_count(), &0);
    assert!(stats.refreshed_at().is_none());
}

#[tokio::test]
async fn test_refresh_populates_cache() {
    let cache = service(vec![Ok(vec![
        thread_meta(1, 10, "Celeste"),
        thread_meta(2, 11, "Hades"),
        thread_meta(3, 10, "Celeste"),
    ])]);

    let stats = cache.refresh_forum(GUILD, FORUM).await.unwrap();
    assert_eq!(stats.thread_count(), &3);
    assert_eq!(stats.owner_count(), &2);

    let found = cache.get_thread_by_exact_name(FORUM, "celeste").unwrap();
    assert_eq!(found.id(), &ThreadId(1 << 22));

    let listed = cache.list_threads(FORUM).unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(
        cache.get_thread(FORUM, ThreadId(2 << 22)).unwrap().name(),
        "Hades"
    );
}

#[tokio::test]
async fn test_failed_refresh_leaves_state_unchanged() {
    let cache = service(vec![
        Ok(vec![thread_meta(1, 10, "Celeste"), thread_meta(2, 11, "Hades")]),
        Err(PlatformError::transport("gateway timeout")),
    ]);
    cache.refresh_forum(GUILD, FORUM).await.unwrap();
    let threads_before = cache.list_threads(FORUM).unwrap();
    let stats_before = cache.stats(FORUM).unwrap();

    let err = cache.refresh_forum(GUILD, FORUM).await.unwrap_err();
    assert!(matches!(err.kind(), CacheErrorKind::RefreshFailed { forum_id, .. } if *forum_id == FORUM.get()));

    assert_eq!(cache.list_threads(FORUM).unwrap(), threads_before);
    assert_eq!(cache.stats(FORUM).unwrap(), stats_before);
    assert_eq!(
        cache.search_threads(FORUM, "hades", 5).unwrap()[0].id(),
        &ThreadId(2 << 22)
    );
}

#[tokio::test]
async fn test_failed_first_refresh_does_not_register() {
    let cache = service(vec![Err(PlatformError::transport("connection refused"))]);
    assert!(cache.refresh_forum(GUILD, FORUM).await.is_err());
    assert!(cache.forums().is_empty());
    assert!(cache.list_threads(FORUM).is_none());
}

#[tokio::test]
async fn test_invalid_container_is_reported() {
    let cache = service(vec![Err(PlatformError::new(
        PlatformErrorKind::InvalidContainer(FORUM.get()),
    ))]);
    let err = cache.refresh_forum(GUILD, FORUM).await.unwrap_err();
    assert_eq!(err.kind(), &CacheErrorKind::InvalidContainer(FORUM.get()));
}

#[tokio::test]
async fn test_refresh_replaces_rather_than_merges() {
    let cache = service(vec![
        Ok(vec![thread_meta(1, 10, "Celeste"), thread_meta(2, 11, "Hades")]),
        Ok(vec![thread_meta(2, 11, "Hades")]),
    ]);
    cache.refresh_forum(GUILD, FORUM).await.unwrap();
    cache.refresh_forum(GUILD, FORUM).await.unwrap();
    assert!(cache.get_thread_by_exact_name(FORUM, "celeste").is_none());
    assert_eq!(cache.stats(FORUM).unwrap().thread_count(), &1);
}

#[tokio::test]
async fn test_search_limit_capped_by_config() {
    let threads = (1..=40).map(|i| thread_meta(i, i, &format!("Game {i}"))).collect();
    let cache = ForumCacheService::new(
        MockSource::new(vec![Ok(threads)]),
        CacheConfig::default().with_max_search_results(10),
    );
    cache.refresh_forum(GUILD, FORUM).await.unwrap();
    assert_eq!(cache.search_threads(FORUM, "game", 100).unwrap().len(), 10);
}

#[tokio::test]
async fn test_events_visible_to_next_read() {
    let cache = service(vec![Ok(vec![thread_meta(1, 10, "Celeste")])]);
    cache.refresh_forum(GUILD, FORUM).await.unwrap();

    assert!(cache.apply_event(&ThreadEvent::Upserted(thread_meta(2, 11, "Hades"))));
    assert!(cache.get_thread_by_exact_name(FORUM, "hades").is_some());

    assert!(cache.apply_event(&ThreadEvent::Removed {
        forum_id: FORUM,
        thread_id: ThreadId(1 << 22),
    }));
    assert!(cache.get_thread_by_exact_name(FORUM, "celeste").is_none());
    assert!(!cache.apply_event(&ThreadEvent::Removed {
        forum_id: ForumId(9),
        thread_id: ThreadId(1),
    }));
}

#[tokio::test]
async fn test_concurrent_readers_during_refresh_see_whole_snapshots() {
    let old: Vec<ThreadMeta> = (1..=200).map(|i| thread_meta(i, 1, "old")).collect();
    let new: Vec<ThreadMeta> = (1..=300).map(|i| thread_meta(i, 2, "new")).collect();
    let cache = Arc::new(service(vec![Ok(old), Ok(new)]));
    cache.refresh_forum(GUILD, FORUM).await.unwrap();

    let reader = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move {
            for _ in 0..200 {
                let threads = cache.list_threads(FORUM).unwrap();
                let olds = threads.iter().filter(|t| t.name() == "old").count();
                let news = threads.iter().filter(|t| t.name() == "new").count();
                assert!((olds == 200 && news == 0) || (olds == 0 && news == 300));
                tokio::task::yield_now().await;
            }
        })
    };
    cache.refresh_forum(GUILD, FORUM).await.unwrap();
    reader.await.unwrap();
}
