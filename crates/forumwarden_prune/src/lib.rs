//! Thread pruning for forumwarden.
//!
//! Pruning removes threads whose owner has left the community and older
//! duplicates when one owner holds several threads in a forum.
//!
//! - [`decide`] is a pure function from threads plus owner facts to the set of
//!   threads to delete. It never touches the network.
//! - [`PruneOrchestrator`] gathers owner facts from a [`CommunityDirectory`],
//!   runs the engine and, in execute mode, deletes through a [`ThreadDeleter`].
//! - [`audit`] projects the decisions into CSV or JSON for operator review.

#![warn(missing_docs)]

pub mod audit;
mod config;
mod directory;
mod engine;
mod facts;
mod orchestrator;
mod report;

pub use audit::{AuditFormat, AuditRecord, export_report, permalink, write_csv, write_json};
pub use config::{PruneConfig, PruneConfigBuilder};
pub use directory::{CommunityDirectory, Membership, ThreadDeleter};
pub use engine::{Decision, decide};
pub use facts::{FactsResolution, OwnerFacts};
pub use orchestrator::PruneOrchestrator;
pub use report::{DeletionFailure, PruneReport};
