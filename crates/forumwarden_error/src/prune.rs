//! Prune error types.

use derive_getters::Getters;

/// Result type for prune operations.
pub type PruneResult<T> = Result<T, PruneError>;

/// Specific prune error conditions.
///
/// Individual deletion failures are not errors: they are recorded in the
/// prune report and the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PruneErrorKind {
    /// The decision engine was given no membership fact for an owner.
    #[display("No membership fact supplied for owner {_0}")]
    IncompleteFacts(u64),

    /// The forum could not be refreshed before pruning.
    #[display("Refresh before prune failed: {_0}")]
    Refresh(String),
}

/// Prune error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Prune Error: {} at line {} in {}", kind, line, file)]
pub struct PruneError {
    kind: PruneErrorKind,
    line: u32,
    file: &'static str,
}

impl PruneError {
    /// Create a new prune error with caller location tracking.
    #[track_caller]
    pub fn new(kind: PruneErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
