//! Forum → index registry.

use crate::ForumIndex;
use chrono::Utc;
use forumwarden_core::{ForumId, ForumStats, ThreadEvent, ThreadMeta};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Table of per-forum thread indexes.
///
/// Each forum maps to an `Arc<ForumIndex>`. Readers take the read lock just
/// long enough to clone the `Arc` and then work on an immutable snapshot, so
/// reads never block one another. Writers build the replacement index first
/// and swap it in under the write lock: a reader sees the old index or the new
/// one, never a mix.
#[derive(Debug, Default)]
pub struct ThreadRegistry {
    forums: RwLock<HashMap<ForumId, Arc<ForumIndex>>>,
}

impl ThreadRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a forum with an empty index.
    ///
    /// Returns `true` when the forum was not known before. Registering a known
    /// forum leaves its index untouched.
    pub fn register(&self, forum_id: ForumId) -> bool {
        if self.forums.read().contains_key(&forum_id) {
            return false;
        }
        let mut forums = self.forums.write();
        if forums.contains_key(&forum_id) {
            return false;
        }
        debug!(forum_id = %forum_id, "Registering forum");
        forums.insert(forum_id, Arc::new(ForumIndex::empty(forum_id)));
        true
    }

    /// Replace a forum's whole thread set.
    ///
    /// Registers the forum if needed. The new index is stamped with the
    /// current time as its refresh time.
    #[instrument(skip(self, threads), fields(forum_id = %forum_id, incoming = threads.len()))]
    pub fn replace(&self, forum_id: ForumId, threads: Vec<ThreadMeta>) -> ForumStats {
        let index = Arc::new(ForumIndex::build(forum_id, threads, Some(Utc::now())));
        let stats = index.stats();
        self.forums.write().insert(forum_id, index);
        debug!(
            thread_count = stats.thread_count(),
            owner_count = stats.owner_count(),
            "Replaced forum index"
        );
        stats
    }

    /// Apply a live change to a registered forum.
    ///
    /// Returns `false` (and changes nothing) when the forum is not registered.
    ///
    /// The new index is built from a snapshot outside the lock. If another
    /// writer swapped the forum's index in the meantime the event is reapplied
    /// to the newer index, so no concurrent change is lost.
    pub fn apply(&self, event: &ThreadEvent) -> bool {
        let forum_id = event.forum_id();
        loop {
            let Some(current) = self.get(forum_id) else {
                debug!(forum_id = %forum_id, "Ignoring event for unregistered forum");
                return false;
            };
            let next = Arc::new(current.with_event(event));

            let mut forums = self.forums.write();
            match forums.get(&forum_id) {
                Some(latest) if Arc::ptr_eq(latest, &current) => {
                    forums.insert(forum_id, next);
                    return true;
                }
                Some(_) => debug!(forum_id = %forum_id, "Index changed while applying event, retrying"),
                None => return false,
            }
        }
    }

    /// Current index of a forum, or `None` when it was never registered.
    pub fn get(&self, forum_id: ForumId) -> Option<Arc<ForumIndex>> {
        self.forums.read().get(&forum_id).cloned()
    }

    /// Registered forums, ascending.
    pub fn forums(&self) -> Vec<ForumId> {
        let mut ids: Vec<ForumId> = self.forums.read().keys().copied().collect();
        ids.sort();
        ids
    }
}
