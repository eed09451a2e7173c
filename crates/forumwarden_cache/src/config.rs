//! Cache configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Configuration for the forum thread cache.
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
pub struct CacheConfig {
    /// Upper bound on search results (Discord autocomplete shows at most 25)
    #[serde(default = "default_max_search_results")]
    max_search_results: usize,

    /// Result count used when the caller gives no limit
    #[serde(default = "default_search_results")]
    default_search_results: usize,
}

fn default_max_search_results() -> usize {
    25
}

fn default_search_results() -> usize {
    25
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_search_results: default_max_search_results(),
            default_search_results: default_search_results(),
        }
    }
}
