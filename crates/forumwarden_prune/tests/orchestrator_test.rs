//! Tests for the prune orchestrator with mock platform collaborators.

use async_trait::async_trait;
use forumwarden_cache::{CacheConfig, ForumCacheService, ThreadSource};
use forumwarden_core::{ForumId, GuildId, PruneMode, PruneReason, ThreadId, ThreadMeta, UserId};
use forumwarden_error::{PlatformError, PlatformErrorKind, PlatformResult, PruneErrorKind};
use forumwarden_prune::{
    AuditFormat, CommunityDirectory, Membership, PruneConfig, PruneOrchestrator, ThreadDeleter,
    export_report,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

const GUILD: GuildId = GuildId(1);
const FORUM: ForumId = ForumId(1000);

/// Directory answering from fixed tables and logging every call.
#[derive(Default)]
struct MockDirectory {
    absent: HashSet<UserId>,
    moderators: HashSet<UserId>,
    failing_membership: HashSet<UserId>,
    failing_moderator: HashSet<UserId>,
    calls: Mutex<Vec<(&'static str, UserId)>>,
}

#[async_trait]
impl CommunityDirectory for MockDirectory {
    async fn membership(&self, _guild_id: GuildId, user_id: UserId) -> PlatformResult<Membership> {
        self.calls.lock().push(("membership", user_id));
        if self.failing_membership.contains(&user_id) {
            return Err(PlatformError::transport("gateway timeout"));
        }
        if self.absent.contains(&user_id) {
            Ok(Membership::Absent)
        } else {
            Ok(Membership::Present)
        }
    }

    async fn is_moderator(
        &self,
        _guild_id: GuildId,
        _forum_id: ForumId,
        user_id: UserId,
    ) -> PlatformResult<bool> {
        self.calls.lock().push(("moderator", user_id));
        if self.failing_moderator.contains(&user_id) {
            return Err(PlatformError::transport("gateway timeout"));
        }
        Ok(self.moderators.contains(&user_id))
    }
}

/// Deleter that rejects selected threads and records the rest.
#[derive(Default)]
struct MockDeleter {
    rejected: HashSet<ThreadId>,
    deleted: Mutex<Vec<(ThreadId, String)>>,
}

#[async_trait]
impl ThreadDeleter for MockDeleter {
    async fn delete_thread(&self, thread_id: ThreadId, audit_reason: &str) -> PlatformResult<()> {
        if self.rejected.contains(&thread_id) {
            return Err(PlatformError::new(PlatformErrorKind::PermissionDenied(
                "missing Manage Threads".to_string(),
            )));
        }
        self.deleted
            .lock()
            .push((thread_id, audit_reason.to_string()));
        Ok(())
    }
}

struct FixedSource {
    threads: PlatformResult<Vec<ThreadMeta>>,
}

#[async_trait]
impl ThreadSource for FixedSource {
    async fn list_forum_threads(
        &self,
        _guild_id: GuildId,
        _forum_id: ForumId,
    ) -> PlatformResult<Vec<ThreadMeta>> {
        self.threads.clone()
    }
}

fn thread_meta(seq: u64, owner: u64) -> ThreadMeta {
    ThreadMeta::new(ThreadId(seq << 22), FORUM, UserId(owner), format!("thread {seq}"))
}

fn no_delay() -> PruneConfig {
    PruneConfig::default()
        .with_lookup_delay_ms(0)
        .with_delete_delay_ms(0)
}

fn orchestrator(
    directory: MockDirectory,
    deleter: MockDeleter,
) -> (PruneOrchestrator, Arc<MockDirectory>, Arc<MockDeleter>) {
    let directory = Arc::new(directory);
    let deleter = Arc::new(deleter);
    let orchestrator = PruneOrchestrator::new(directory.clone(), deleter.clone(), no_delay());
    (orchestrator, directory, deleter)
}

/// Owner 7 holds three threads, owner 8 has left with one.
fn sample_threads() -> Vec<ThreadMeta> {
    vec![
        thread_meta(1, 7),
        thread_meta(2, 7),
        thread_meta(3, 7),
        thread_meta(4, 8),
    ]
}

#[tokio::test]
async fn test_dry_run_deletes_nothing() {
    let directory = MockDirectory {
        absent: HashSet::from([UserId(8)]),
        ..Default::default()
    };
    let (orchestrator, _, deleter) = orchestrator(directory, MockDeleter::default());

    let report = orchestrator
        .run(GUILD, FORUM, sample_threads(), PruneMode::DryRun)
        .await
        .unwrap();

    assert_eq!(report.mode(), &PruneMode::DryRun);
    assert_eq!(report.flagged_count(), 3);
    assert_eq!(report.deleted_count(), 0);
    assert!(deleter.deleted.lock().is_empty());
    assert_eq!(report.scanned(), &4);
    assert_eq!(report.owners_checked(), &2);
}

#[tokio::test]
async fn test_execute_records_partial_failure() {
    let directory = MockDirectory {
        absent: HashSet::from([UserId(8)]),
        ..Default::default()
    };
    // Flagged order is id descending: 4, 2, 1. The second deletion fails.
    let deleter = MockDeleter {
        rejected: HashSet::from([ThreadId(2 << 22)]),
        ..Default::default()
    };
    let (orchestrator, _, deleter) = orchestrator(directory, deleter);

    let report = orchestrator
        .run(GUILD, FORUM, sample_threads(), PruneMode::Execute)
        .await
        .unwrap();

    assert_eq!(report.flagged_count(), 3);
    assert_eq!(report.deleted(), &vec![ThreadId(4 << 22), ThreadId(1 << 22)]);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.failures()[0].thread_id(), &ThreadId(2 << 22));
    assert!(report.failures()[0].error().contains("Manage Threads"));

    let deleted = deleter.deleted.lock();
    assert_eq!(deleted.len(), 2);
    assert_eq!(deleted[0].1, "forumwarden prune: owner-departed");
    assert_eq!(deleted[1].1, "forumwarden prune: duplicate-older");
}

#[tokio::test]
async fn test_moderator_is_not_asked_for_membership() {
    let directory = MockDirectory {
        moderators: HashSet::from([UserId(7)]),
        ..Default::default()
    };
    let (orchestrator, directory, _) = orchestrator(directory, MockDeleter::default());

    let report = orchestrator
        .run(GUILD, FORUM, sample_threads(), PruneMode::DryRun)
        .await
        .unwrap();

    assert_eq!(report.flagged_count(), 0);
    assert_eq!(report.moderator_skipped(), &3);
    assert_eq!(
        *directory.calls.lock(),
        vec![
            ("moderator", UserId(7)),
            ("moderator", UserId(8)),
            ("membership", UserId(8)),
        ]
    );
}

#[tokio::test]
async fn test_failed_membership_lookup_treated_as_present() {
    let directory = MockDirectory {
        absent: HashSet::from([UserId(8)]),
        failing_membership: HashSet::from([UserId(8)]),
        ..Default::default()
    };
    let (orchestrator, _, _) = orchestrator(directory, MockDeleter::default());

    let report = orchestrator
        .run(GUILD, FORUM, sample_threads(), PruneMode::DryRun)
        .await
        .unwrap();

    assert_eq!(report.lookup_failures(), &1);
    assert!(
        report
            .flagged()
            .iter()
            .all(|d| *d.reason() == PruneReason::DuplicateOlder)
    );
    assert_eq!(report.flagged_count(), 2);
}

#[tokio::test]
async fn test_failed_moderator_lookup_treated_as_moderator() {
    let directory = MockDirectory {
        absent: HashSet::from([UserId(7)]),
        failing_moderator: HashSet::from([UserId(7)]),
        ..Default::default()
    };
    let (orchestrator, directory, _) = orchestrator(directory, MockDeleter::default());

    let report = orchestrator
        .run(GUILD, FORUM, sample_threads(), PruneMode::DryRun)
        .await
        .unwrap();

    assert_eq!(report.lookup_failures(), &1);
    assert_eq!(report.moderator_skipped(), &3);
    assert_eq!(report.flagged_count(), 0);
    assert!(
        !directory
            .calls
            .lock()
            .contains(&("membership", UserId(7)))
    );
}

#[tokio::test]
async fn test_resolve_facts_counts_owners() {
    let directory = MockDirectory {
        absent: HashSet::from([UserId(8)]),
        ..Default::default()
    };
    let (orchestrator, _, _) = orchestrator(directory, MockDeleter::default());

    let resolution = orchestrator
        .resolve_facts(GUILD, FORUM, &sample_threads())
        .await;

    assert_eq!(resolution.owners_checked(), &2);
    assert_eq!(resolution.lookup_failures(), &0);
    assert_eq!(resolution.facts().is_present(UserId(7)), Some(true));
    assert_eq!(resolution.facts().is_present(UserId(8)), Some(false));
}

#[tokio::test]
async fn test_run_forum_refreshes_first() {
    let source = Arc::new(FixedSource {
        threads: Ok(sample_threads()),
    });
    let cache = ForumCacheService::new(source, CacheConfig::default());
    let directory = MockDirectory {
        absent: HashSet::from([UserId(8)]),
        ..Default::default()
    };
    let (orchestrator, _, deleter) = orchestrator(directory, MockDeleter::default());

    let report = orchestrator
        .run_forum(&cache, GUILD, FORUM, PruneMode::Execute)
        .await
        .unwrap();

    assert_eq!(report.scanned(), &4);
    assert_eq!(report.deleted_count(), 3);
    assert_eq!(deleter.deleted.lock().len(), 3);
    assert_eq!(
        cache
            .list_threads(FORUM)
            .unwrap()
            .iter()
            .map(|t| *t.id())
            .collect::<Vec<_>>(),
        vec![ThreadId(3 << 22)]
    );
    assert!(cache.get_thread(FORUM, ThreadId(4 << 22)).is_none());
}

#[tokio::test]
async fn test_run_forum_keeps_undeleted_threads_cached() {
    let source = Arc::new(FixedSource {
        threads: Ok(sample_threads()),
    });
    let cache = ForumCacheService::new(source, CacheConfig::default());
    let directory = MockDirectory {
        absent: HashSet::from([UserId(8)]),
        ..Default::default()
    };
    let deleter = MockDeleter {
        rejected: HashSet::from([ThreadId(2 << 22)]),
        ..Default::default()
    };
    let (orchestrator, _, _) = orchestrator(directory, deleter);

    let report = orchestrator
        .run_forum(&cache, GUILD, FORUM, PruneMode::Execute)
        .await
        .unwrap();
    assert_eq!(report.deleted_count(), 2);

    // The rejected thread still exists on the platform, so it stays cached.
    assert!(cache.get_thread(FORUM, ThreadId(2 << 22)).is_some());
    assert!(cache.get_thread(FORUM, ThreadId(1 << 22)).is_none());
    assert_eq!(cache.stats(FORUM).unwrap().thread_count(), &2);
}

#[tokio::test]
async fn test_dry_run_forum_leaves_cache_untouched() {
    let source = Arc::new(FixedSource {
        threads: Ok(sample_threads()),
    });
    let cache = ForumCacheService::new(source, CacheConfig::default());
    let directory = MockDirectory {
        absent: HashSet::from([UserId(8)]),
        ..Default::default()
    };
    let (orchestrator, _, _) = orchestrator(directory, MockDeleter::default());

    orchestrator
        .run_forum(&cache, GUILD, FORUM, PruneMode::DryRun)
        .await
        .unwrap();
    assert_eq!(cache.stats(FORUM).unwrap().thread_count(), &4);
}

#[tokio::test]
async fn test_run_forum_aborts_when_refresh_fails() {
    let source = Arc::new(FixedSource {
        threads: Err(PlatformError::transport("connection reset")),
    });
    let cache = ForumCacheService::new(source, CacheConfig::default());
    let (orchestrator, directory, deleter) =
        orchestrator(MockDirectory::default(), MockDeleter::default());

    let err = orchestrator
        .run_forum(&cache, GUILD, FORUM, PruneMode::Execute)
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), PruneErrorKind::Refresh(_)));
    assert!(directory.calls.lock().is_empty());
    assert!(deleter.deleted.lock().is_empty());
}

#[tokio::test]
async fn test_dry_run_report_exports_every_flagged_thread() {
    let directory = MockDirectory {
        absent: HashSet::from([UserId(8)]),
        ..Default::default()
    };
    let (orchestrator, _, _) = orchestrator(directory, MockDeleter::default());
    let report = orchestrator
        .run(GUILD, FORUM, sample_threads(), PruneMode::DryRun)
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("prune.csv");
    let json_path = dir.path().join("prune.json");

    assert_eq!(export_report(&report, &csv_path, AuditFormat::Csv).unwrap(), 3);
    assert_eq!(export_report(&report, &json_path, AuditFormat::Json).unwrap(), 3);

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains(&format!("{},owner-departed", 4u64 << 22)));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
}
