//! Thread cache error types.

use derive_getters::Getters;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Kinds of cache errors.
///
/// Lookups against a forum that was never registered are not errors; they
/// return `None`. Only refresh can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CacheErrorKind {
    /// Enumerating the forum's threads failed; the previous index was kept.
    #[display("Refresh of forum {} failed: {}", forum_id, reason)]
    RefreshFailed {
        /// Forum being refreshed
        forum_id: u64,
        /// Underlying failure
        reason: String,
    },

    /// The forum id does not name a thread container.
    #[display("Channel {_0} is not a forum")]
    InvalidContainer(u64),
}

/// Cache error with location tracking.
///
/// # Examples
///
/// ```
/// use forumwarden_error::{CacheError, CacheErrorKind};
///
/// let err = CacheError::new(CacheErrorKind::InvalidContainer(42));
/// assert!(format!("{}", err).contains("not a forum"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Cache Error: {} at line {} in {}", kind, line, file)]
pub struct CacheError {
    kind: CacheErrorKind,
    line: u32,
    file: &'static str,
}

impl CacheError {
    /// Create a new cache error with caller location tracking.
    #[track_caller]
    pub fn new(kind: CacheErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
