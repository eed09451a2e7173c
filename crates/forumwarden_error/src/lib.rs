//! Error types for forumwarden.
//!
//! This crate provides the error types shared by every forumwarden crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use forumwarden_error::{PlatformError, PlatformErrorKind, WardenResult};
//!
//! fn enumerate() -> WardenResult<Vec<u64>> {
//!     Err(PlatformError::new(PlatformErrorKind::Transport(
//!         "connection reset".to_string(),
//!     )))?
//! }
//!
//! match enumerate() {
//!     Ok(ids) => println!("Got {} threads", ids.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod cache;
mod config;
mod error;
mod platform;
mod prune;

pub use audit::{AuditError, AuditErrorKind, AuditResult};
pub use cache::{CacheError, CacheErrorKind, CacheResult};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{WardenError, WardenErrorKind, WardenResult};
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
pub use prune::{PruneError, PruneErrorKind, PruneResult};
