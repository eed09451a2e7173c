//! Prune pacing configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for prune runs.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct PruneConfig {
    /// Pause between owner lookups (milliseconds)
    #[serde(default = "default_lookup_delay_ms")]
    lookup_delay_ms: u64,

    /// Pause between thread deletions (milliseconds)
    #[serde(default = "default_delete_delay_ms")]
    delete_delay_ms: u64,

    /// Prefix of the audit-log reason attached to each deletion
    #[serde(default = "default_audit_reason_prefix")]
    audit_reason_prefix: String,
}

fn default_lookup_delay_ms() -> u64 {
    250
}

fn default_delete_delay_ms() -> u64 {
    1000
}

fn default_audit_reason_prefix() -> String {
    "forumwarden prune".to_string()
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            lookup_delay_ms: default_lookup_delay_ms(),
            delete_delay_ms: default_delete_delay_ms(),
            audit_reason_prefix: default_audit_reason_prefix(),
        }
    }
}

impl PruneConfig {
    /// Pause between owner lookups.
    pub fn lookup_delay(&self) -> Duration {
        Duration::from_millis(self.lookup_delay_ms)
    }

    /// Pause between deletions.
    pub fn delete_delay(&self) -> Duration {
        Duration::from_millis(self.delete_delay_ms)
    }
}
