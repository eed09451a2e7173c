//! Prune decision output types.

use crate::{ThreadId, ThreadMeta, UserId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Why a thread was flagged for deletion.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PruneReason {
    /// The owner is no longer a member of the community.
    OwnerDeparted,
    /// The owner has a newer thread; this one is an older duplicate.
    DuplicateOlder,
}

/// Whether a prune run deletes anything.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PruneMode {
    /// Decide and report only.
    #[default]
    DryRun,
    /// Decide, then delete every flagged thread.
    Execute,
}

/// One thread the prune engine decided to delete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct PendingDecision {
    /// Flagged thread.
    thread_id: ThreadId,
    /// Why it was flagged.
    reason: PruneReason,
    /// Thread owner.
    owner_id: UserId,
    /// Display name, for the audit record.
    name: String,
    /// Thread creation time.
    created_at: DateTime<Utc>,
}

impl PendingDecision {
    /// Flag `thread` for `reason`.
    pub fn flag(thread: &ThreadMeta, reason: PruneReason) -> Self {
        Self {
            thread_id: *thread.id(),
            reason,
            owner_id: *thread.owner_id(),
            name: thread.name().clone(),
            created_at: *thread.created_at(),
        }
    }
}
