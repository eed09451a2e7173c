//! Live thread change notifications.

use crate::{ForumId, ThreadId, ThreadMeta};
use serde::{Deserialize, Serialize};

/// A change to a forum observed between refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadEvent {
    /// A thread was created, renamed or otherwise updated.
    Upserted(ThreadMeta),
    /// A thread was deleted.
    Removed {
        /// Forum that held the thread.
        forum_id: ForumId,
        /// Deleted thread.
        thread_id: ThreadId,
    },
}

impl ThreadEvent {
    /// Forum the event applies to.
    pub fn forum_id(&self) -> ForumId {
        match self {
            Self::Upserted(thread) => *thread.forum_id(),
            Self::Removed { forum_id, .. } => *forum_id,
        }
    }
}
