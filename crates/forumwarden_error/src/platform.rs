//! Chat platform error types.
//!
//! Raised by the collaborators that enumerate threads, look up members and
//! delete threads on the remote platform.

use derive_getters::Getters;

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Platform error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// The platform could not be reached or returned an unexpected failure.
    #[display("Transport error: {_0}")]
    Transport(String),

    /// The channel exists but cannot hold threads (not a forum).
    #[display("Channel {_0} is not a forum")]
    InvalidContainer(u64),

    /// The requested resource does not exist.
    #[display("Not found: {_0}")]
    NotFound(String),

    /// The bot lacks a permission required for the operation.
    #[display("Insufficient permissions: {_0}")]
    PermissionDenied(String),

    /// Bot token is invalid or expired.
    #[display("Invalid or expired bot token")]
    InvalidToken,
}

/// Platform error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    kind: PlatformErrorKind,
    line: u32,
    file: &'static str,
}

impl PlatformError {
    /// Create a new PlatformError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use forumwarden_error::{PlatformError, PlatformErrorKind};
    ///
    /// let err = PlatformError::new(PlatformErrorKind::InvalidToken);
    /// assert_eq!(err.kind(), &PlatformErrorKind::InvalidToken);
    /// ```
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a transport failure.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorKind::Transport(message.into()))
    }
}
