//! Audit export error types.

use derive_getters::Getters;

/// Result type for audit export.
pub type AuditResult<T> = Result<T, AuditError>;

/// Kinds of audit export errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AuditErrorKind {
    /// Writing the export failed
    #[display("Failed to write audit export: {}", _0)]
    Io(String),
    /// Serializing the export failed
    #[display("Failed to serialize audit export: {}", _0)]
    Json(String),
}

/// Audit error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Audit Error: {} at line {} in {}", kind, line, file)]
pub struct AuditError {
    kind: AuditErrorKind,
    line: u32,
    file: &'static str,
}

impl AuditError {
    /// Create a new audit error with caller location tracking.
    #[track_caller]
    pub fn new(kind: AuditErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<std::io::Error> for AuditError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(AuditErrorKind::Io(err.to_string()))
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for AuditError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(AuditErrorKind::Json(err.to_string()))
    }
}
