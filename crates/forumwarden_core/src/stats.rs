//! Per-forum statistics.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Counts derived from a forum index when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct ForumStats {
    /// Number of threads in the forum.
    thread_count: usize,
    /// Number of distinct thread owners.
    owner_count: usize,
    /// When the index was last rebuilt from the platform; `None` until the
    /// first successful refresh.
    refreshed_at: Option<DateTime<Utc>>,
}

impl ForumStats {
    /// Create statistics for an index.
    pub fn new(
        thread_count: usize,
        owner_count: usize,
        refreshed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            thread_count,
            owner_count,
            refreshed_at,
        }
    }
}
