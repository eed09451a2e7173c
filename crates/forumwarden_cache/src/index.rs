//! Immutable per-forum thread index.

use chrono::{DateTime, Utc};
use forumwarden_core::{ForumId, ForumStats, ThreadEvent, ThreadId, ThreadMeta, UserId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::warn;

/// Snapshot of one forum's threads.
///
/// Holds the existence table keyed by thread id and an exact-match index from
/// normalized name to every thread sharing that name. An index is never
/// mutated after it is built; changes produce a new index that replaces the
/// old one in the registry.
#[derive(Debug, Clone)]
pub struct ForumIndex {
    forum_id: ForumId,
    threads: BTreeMap<ThreadId, ThreadMeta>,
    by_name: HashMap<String, BTreeSet<ThreadId>>,
    stats: ForumStats,
}

impl ForumIndex {
    /// Index for a registered forum that has never been refreshed.
    pub fn empty(forum_id: ForumId) -> Self {
        Self {
            forum_id,
            threads: BTreeMap::new(),
            by_name: HashMap::new(),
            stats: ForumStats::default(),
        }
    }

    /// Build an index from a complete thread list.
    ///
    /// Threads belonging to another forum are dropped. When the list holds the
    /// same id twice the later record wins.
    pub fn build(
        forum_id: ForumId,
        threads: impl IntoIterator<Item = ThreadMeta>,
        refreshed_at: Option<DateTime<Utc>>,
    ) -> Self {
        let mut table = BTreeMap::new();
        for thread in threads {
            if *thread.forum_id() != forum_id {
                warn!(
                    forum_id = %forum_id,
                    thread_id = %thread.id(),
                    thread_forum = %thread.forum_id(),
                    "Dropping thread from another forum"
                );
                continue;
            }
            if let Some(previous) = table.insert(*thread.id(), thread) {
                warn!(
                    forum_id = %forum_id,
                    thread_id = %previous.id(),
                    "Duplicate thread id in source, keeping the later record"
                );
            }
        }
        Self::from_table(forum_id, table, refreshed_at)
    }

    fn from_table(
        forum_id: ForumId,
        threads: BTreeMap<ThreadId, ThreadMeta>,
        refreshed_at: Option<DateTime<Utc>>,
    ) -> Self {
        let mut by_name: HashMap<String, BTreeSet<ThreadId>> = HashMap::new();
        let mut owners: HashSet<UserId> = HashSet::new();
        for thread in threads.values() {
            by_name
                .entry(thread.normalized_name().clone())
                .or_default()
                .insert(*thread.id());
            owners.insert(*thread.owner_id());
        }
        let stats = ForumStats::new(threads.len(), owners.len(), refreshed_at);
        Self {
            forum_id,
            threads,
            by_name,
            stats,
        }
    }

    /// New index with `event` applied; `self` is left as is.
    ///
    /// Events for another forum return an unchanged copy.
    pub fn with_event(&self, event: &ThreadEvent) -> Self {
        if event.forum_id() != self.forum_id {
            return self.clone();
        }
        let mut threads = self.threads.clone();
        match event {
            ThreadEvent::Upserted(thread) => {
                threads.insert(*thread.id(), thread.clone());
            }
            ThreadEvent::Removed { thread_id, .. } => {
                threads.remove(thread_id);
            }
        }
        Self::from_table(self.forum_id, threads, *self.stats.refreshed_at())
    }

    /// Forum this index describes.
    pub fn forum_id(&self) -> ForumId {
        self.forum_id
    }

    /// Look up a thread by id.
    pub fn get(&self, id: ThreadId) -> Option<&ThreadMeta> {
        self.threads.get(&id)
    }

    /// Look up a thread by normalized name.
    ///
    /// When several threads share the name the one with the lowest id (the
    /// oldest) is returned.
    pub fn find_exact(&self, normalized_name: &str) -> Option<&ThreadMeta> {
        let id = self.by_name.get(normalized_name)?.first()?;
        self.threads.get(id)
    }

    /// Every thread sharing a normalized name, ascending id.
    pub fn find_all_exact(&self, normalized_name: &str) -> Vec<&ThreadMeta> {
        self.by_name
            .get(normalized_name)
            .map(|ids| ids.iter().filter_map(|id| self.threads.get(id)).collect())
            .unwrap_or_default()
    }

    /// Threads in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &ThreadMeta> {
        self.threads.values()
    }

    /// Number of threads.
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Whether the forum has no threads.
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Statistics computed when the index was built.
    pub fn stats(&self) -> ForumStats {
        self.stats
    }
}
