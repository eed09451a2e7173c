//! Top-level error wrapper types.

use crate::{AuditError, CacheError, ConfigError, PlatformError, PruneError};

/// Union of every forumwarden error.
///
/// # Examples
///
/// ```
/// use forumwarden_error::{ConfigError, ConfigErrorKind, WardenError};
///
/// let err: WardenError = ConfigError::new(ConfigErrorKind::MissingGuild).into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum WardenErrorKind {
    /// Remote platform error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Thread cache error
    #[from(CacheError)]
    Cache(CacheError),
    /// Prune error
    #[from(PruneError)]
    Prune(PruneError),
    /// Audit export error
    #[from(AuditError)]
    Audit(AuditError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// forumwarden error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("forumwarden Error: {}", _0)]
pub struct WardenError(Box<WardenErrorKind>);

impl WardenError {
    /// Create a new error from a kind.
    pub fn new(kind: WardenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WardenErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to WardenErrorKind
impl<T> From<T> for WardenError
where
    T: Into<WardenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for forumwarden operations.
pub type WardenResult<T> = std::result::Result<T, WardenError>;
