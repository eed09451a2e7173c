//! Prune orchestration against the live platform.

use crate::{
    CommunityDirectory, DeletionFailure, FactsResolution, Membership, OwnerFacts, PruneConfig,
    PruneReport, ThreadDeleter, decide,
};
use forumwarden_cache::ForumCacheService;
use forumwarden_core::{ForumId, GuildId, PruneMode, ThreadEvent, ThreadMeta, UserId};
use forumwarden_error::{PruneError, PruneErrorKind, PruneResult};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Drives the decision engine with live facts and executes deletions.
///
/// Owner lookups and deletions are paced with fixed delays to stay under the
/// platform's rate limits. Lookup failures resolve to the non-destructive
/// answer: an owner whose moderator status cannot be read is treated as a
/// moderator, and one whose membership cannot be read is treated as present.
pub struct PruneOrchestrator {
    directory: Arc<dyn CommunityDirectory>,
    deleter: Arc<dyn ThreadDeleter>,
    config: PruneConfig,
}

/// Sleeps between calls, but not before the first one.
struct Pacer {
    delay: Duration,
    started: bool,
}

impl Pacer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: false,
        }
    }

    async fn wait(&mut self) {
        if self.started && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.started = true;
    }
}

impl PruneOrchestrator {
    /// Create an orchestrator.
    pub fn new(
        directory: Arc<dyn CommunityDirectory>,
        deleter: Arc<dyn ThreadDeleter>,
        config: PruneConfig,
    ) -> Self {
        Self {
            directory,
            deleter,
            config,
        }
    }

    /// Prune configuration.
    pub fn config(&self) -> &PruneConfig {
        &self.config
    }

    /// Look up moderator status and membership once per distinct owner.
    ///
    /// Owners are visited in ascending id order. Moderators are not looked up
    /// for membership since nothing of theirs is ever flagged.
    #[instrument(
        skip(self, threads),
        fields(guild_id = %guild_id, forum_id = %forum_id, owners, lookup_failures)
    )]
    pub async fn resolve_facts(
        &self,
        guild_id: GuildId,
        forum_id: ForumId,
        threads: &[ThreadMeta],
    ) -> FactsResolution {
        let owners: BTreeSet<UserId> = threads.iter().map(|t| *t.owner_id()).collect();
        tracing::Span::current().record("owners", owners.len());

        let mut facts = OwnerFacts::default();
        let mut failures = 0;
        let mut pacer = Pacer::new(self.config.lookup_delay());

        for owner in &owners {
            let owner = *owner;

            pacer.wait().await;
            let moderator = match self.directory.is_moderator(guild_id, forum_id, owner).await {
                Ok(moderator) => moderator,
                Err(e) => {
                    warn!(owner_id = %owner, error = %e, "Moderator lookup failed, treating as moderator");
                    failures += 1;
                    true
                }
            };
            if moderator {
                debug!(owner_id = %owner, "Owner is a moderator");
                facts.add_moderator(owner);
                continue;
            }

            pacer.wait().await;
            let present = match self.directory.membership(guild_id, owner).await {
                Ok(Membership::Present) => true,
                Ok(Membership::Absent) => false,
                Err(e) => {
                    warn!(owner_id = %owner, error = %e, "Membership lookup failed, treating as present");
                    failures += 1;
                    true
                }
            };
            debug!(owner_id = %owner, present, "Resolved membership");
            facts.set_present(owner, present);
        }

        tracing::Span::current().record("lookup_failures", failures);
        FactsResolution::new(facts, owners.len(), failures)
    }

    /// Decide and, in execute mode, delete.
    ///
    /// Deletions run one at a time. A failed deletion is recorded and the run
    /// moves on to the next thread.
    ///
    /// # Errors
    ///
    /// Only if the engine rejects its input, which the facts resolved here
    /// rule out.
    #[instrument(
        skip(self, threads),
        fields(guild_id = %guild_id, forum_id = %forum_id, mode = %mode, scanned = threads.len())
    )]
    pub async fn run(
        &self,
        guild_id: GuildId,
        forum_id: ForumId,
        threads: Vec<ThreadMeta>,
        mode: PruneMode,
    ) -> PruneResult<PruneReport> {
        let resolution = self.resolve_facts(guild_id, forum_id, &threads).await;
        let decision = decide(&threads, resolution.facts())?;

        info!(
            scanned = decision.scanned(),
            flagged = decision.flagged().len(),
            moderator_skipped = decision.moderator_skipped(),
            "Prune decision made"
        );

        let scanned = *decision.scanned();
        let moderator_skipped = *decision.moderator_skipped();
        let mut report = PruneReport::new(
            mode,
            guild_id,
            forum_id,
            scanned,
            moderator_skipped,
            *resolution.owners_checked(),
            *resolution.lookup_failures(),
            decision.into_flagged(),
        );

        if mode == PruneMode::DryRun {
            info!("Dry run, nothing deleted");
            return Ok(report);
        }

        let mut pacer = Pacer::new(self.config.delete_delay());
        let pending = report.flagged().clone();
        for decision in &pending {
            pacer.wait().await;
            let reason = format!("{}: {}", self.config.audit_reason_prefix(), decision.reason());
            match self.deleter.delete_thread(*decision.thread_id(), &reason).await {
                Ok(()) => {
                    debug!(thread_id = %decision.thread_id(), reason = %decision.reason(), "Deleted thread");
                    report.record_deleted(*decision.thread_id());
                }
                Err(e) => {
                    warn!(thread_id = %decision.thread_id(), error = %e, "Thread deletion failed");
                    report.record_failure(DeletionFailure::new(*decision.thread_id(), e.to_string()));
                }
            }
        }

        info!(
            deleted = report.deleted_count(),
            failures = report.failure_count(),
            "Prune run finished"
        );
        Ok(report)
    }

    /// Refresh a forum through the cache, then prune it.
    ///
    /// The refresh guarantees the decision sees archived threads and recent
    /// changes rather than a stale index. Threads deleted in execute mode are
    /// removed from the cache right away, without waiting for gateway events.
    ///
    /// # Errors
    ///
    /// Returns `PruneErrorKind::Refresh` when the refresh fails; nothing is
    /// looked up or deleted in that case.
    #[instrument(skip(self, cache), fields(guild_id = %guild_id, forum_id = %forum_id, mode = %mode))]
    pub async fn run_forum(
        &self,
        cache: &ForumCacheService,
        guild_id: GuildId,
        forum_id: ForumId,
        mode: PruneMode,
    ) -> PruneResult<PruneReport> {
        cache.refresh_forum(guild_id, forum_id).await.map_err(|e| {
            error!(error = %e, "Refresh before prune failed");
            PruneError::new(PruneErrorKind::Refresh(e.to_string()))
        })?;
        let threads = cache.list_threads(forum_id).unwrap_or_default();
        let report = self.run(guild_id, forum_id, threads, mode).await?;

        for thread_id in report.deleted() {
            cache.apply_event(&ThreadEvent::Removed {
                forum_id,
                thread_id: *thread_id,
            });
        }
        if !report.deleted().is_empty() {
            debug!(
                removed = report.deleted_count(),
                "Removed deleted threads from cache"
            );
        }
        Ok(report)
    }
}
