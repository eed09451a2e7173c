//! Prune decision engine.

use crate::OwnerFacts;
use derive_getters::Getters;
use forumwarden_core::{PendingDecision, PruneReason, ThreadId, ThreadMeta, UserId};
use forumwarden_error::{PruneError, PruneErrorKind, PruneResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Output of [`decide`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Decision {
    /// Threads to delete, highest id first.
    flagged: Vec<PendingDecision>,
    /// Distinct threads examined.
    scanned: usize,
    /// Threads left alone because their owner is a moderator.
    moderator_skipped: usize,
    /// Distinct owners examined.
    owners: usize,
}

impl Decision {
    /// Threads examined and not flagged.
    pub fn kept(&self) -> usize {
        self.scanned - self.flagged.len()
    }

    /// Consume the decision, returning the flagged list.
    pub fn into_flagged(self) -> Vec<PendingDecision> {
        self.flagged
    }
}

/// Decide which threads to delete.
///
/// Per owner:
/// 1. moderators are never flagged; their threads count as moderator-skipped
/// 2. a departed owner has every thread flagged `owner-departed`
/// 3. a present owner with several threads keeps the newest (by creation time,
///    then id) and has the rest flagged `duplicate-older`
///
/// The result does not depend on input order. Repeated thread ids are
/// examined once.
///
/// # Errors
///
/// Returns `PruneErrorKind::IncompleteFacts` when a non-moderator owner has
/// no membership fact. Nothing is flagged in that case.
///
/// # Examples
///
/// ```
/// use forumwarden_core::{ForumId, PruneReason, ThreadId, ThreadMeta, UserId};
/// use forumwarden_prune::{OwnerFacts, decide};
///
/// let forum = ForumId(1);
/// let owner = UserId(7);
/// let threads = vec![
///     ThreadMeta::new(ThreadId(1 << 22), forum, owner, "Celeste"),
///     ThreadMeta::new(ThreadId(2 << 22), forum, owner, "Celeste again"),
/// ];
/// let mut facts = OwnerFacts::default();
/// facts.set_present(owner, true);
///
/// let decision = decide(&threads, &facts).unwrap();
/// assert_eq!(decision.flagged().len(), 1);
/// assert_eq!(*decision.flagged()[0].thread_id(), ThreadId(1 << 22));
/// assert_eq!(*decision.flagged()[0].reason(), PruneReason::DuplicateOlder);
/// ```
#[instrument(skip_all, fields(input = threads.len()))]
pub fn decide(threads: &[ThreadMeta], facts: &OwnerFacts) -> PruneResult<Decision> {
    let mut unique: BTreeMap<ThreadId, &ThreadMeta> = BTreeMap::new();
    for thread in threads {
        unique.entry(*thread.id()).or_insert(thread);
    }

    let mut by_owner: BTreeMap<UserId, Vec<&ThreadMeta>> = BTreeMap::new();
    for thread in unique.values().copied() {
        by_owner.entry(*thread.owner_id()).or_default().push(thread);
    }

    if let Some(owner) = by_owner
        .keys()
        .find(|owner| !facts.is_moderator(**owner) && facts.is_present(**owner).is_none())
    {
        return Err(PruneError::new(PruneErrorKind::IncompleteFacts(owner.get())));
    }

    let owners = by_owner.len();
    let mut flagged = Vec::new();
    let mut moderator_skipped = 0;

    for (owner, mut owned) in by_owner {
        if facts.is_moderator(owner) {
            debug!(owner_id = %owner, threads = owned.len(), "Skipping moderator");
            moderator_skipped += owned.len();
            continue;
        }

        if facts.is_present(owner) == Some(false) {
            debug!(owner_id = %owner, threads = owned.len(), "Owner departed");
            flagged.extend(
                owned
                    .iter()
                    .map(|thread| PendingDecision::flag(thread, PruneReason::OwnerDeparted)),
            );
            continue;
        }

        if owned.len() < 2 {
            continue;
        }
        owned.sort_by_key(|thread| thread.age_key());
        if let Some((survivor, older)) = owned.split_last() {
            debug!(
                owner_id = %owner,
                survivor = %survivor.id(),
                duplicates = older.len(),
                "Flagging older duplicates"
            );
            flagged.extend(
                older
                    .iter()
                    .map(|thread| PendingDecision::flag(thread, PruneReason::DuplicateOlder)),
            );
        }
    }

    flagged.sort_by(|a, b| b.thread_id().cmp(a.thread_id()));

    Ok(Decision {
        flagged,
        scanned: unique.len(),
        moderator_skipped,
        owners,
    })
}
