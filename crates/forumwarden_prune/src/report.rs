//! Prune run report.

use derive_getters::Getters;
use forumwarden_core::{ForumId, GuildId, PendingDecision, PruneMode, ThreadId};
use serde::{Deserialize, Serialize};

/// A deletion the platform rejected.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DeletionFailure {
    /// Thread that could not be deleted.
    thread_id: ThreadId,
    /// Platform error message.
    error: String,
}

impl DeletionFailure {
    /// Record a failed deletion.
    pub fn new(thread_id: ThreadId, error: impl Into<String>) -> Self {
        Self {
            thread_id,
            error: error.into(),
        }
    }
}

/// Outcome of one prune run.
///
/// The flagged list is always complete, in dry-run and execute mode alike, so
/// it can be exported for audit.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PruneReport {
    /// Whether deletions were attempted.
    mode: PruneMode,
    /// Community the forum belongs to.
    guild_id: GuildId,
    /// Pruned forum.
    forum_id: ForumId,
    /// Threads examined.
    scanned: usize,
    /// Threads skipped because their owner is a moderator.
    moderator_skipped: usize,
    /// Distinct owners looked up.
    owners_checked: usize,
    /// Owner lookups that failed and fell back to the safe default.
    lookup_failures: usize,
    /// Every thread the engine flagged, highest id first.
    flagged: Vec<PendingDecision>,
    /// Threads deleted, in deletion order.
    deleted: Vec<ThreadId>,
    /// Deletions that failed.
    failures: Vec<DeletionFailure>,
}

impl PruneReport {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        mode: PruneMode,
        guild_id: GuildId,
        forum_id: ForumId,
        scanned: usize,
        moderator_skipped: usize,
        owners_checked: usize,
        lookup_failures: usize,
        flagged: Vec<PendingDecision>,
    ) -> Self {
        Self {
            mode,
            guild_id,
            forum_id,
            scanned,
            moderator_skipped,
            owners_checked,
            lookup_failures,
            flagged,
            deleted: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub(crate) fn record_deleted(&mut self, thread_id: ThreadId) {
        self.deleted.push(thread_id);
    }

    pub(crate) fn record_failure(&mut self, failure: DeletionFailure) {
        self.failures.push(failure);
    }

    /// Number of threads flagged.
    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }

    /// Number of successful deletions.
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    /// Number of failed deletions.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}
