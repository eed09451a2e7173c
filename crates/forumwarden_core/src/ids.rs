//! Platform identifiers.
//!
//! Every id is a Discord snowflake: a `u64` whose upper 42 bits hold the
//! milliseconds elapsed since the Discord epoch. Higher ids were created later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discord epoch (2015-01-01T00:00:00Z) in Unix milliseconds.
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// Creation instant encoded in a snowflake.
///
/// # Examples
///
/// ```
/// use forumwarden_core::snowflake_timestamp;
///
/// // id 0 is the Discord epoch itself
/// assert_eq!(snowflake_timestamp(0).timestamp_millis(), 1_420_070_400_000);
/// ```
pub fn snowflake_timestamp(id: u64) -> DateTime<Utc> {
    let millis = (id >> 22) as i64 + DISCORD_EPOCH_MS;
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        #[display("{}", _0)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }

            /// Creation instant encoded in the id.
            pub fn created_at(self) -> DateTime<Utc> {
                snowflake_timestamp(self.0)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }
    };
}

snowflake_id!(
    /// Community (Discord guild) identifier.
    GuildId
);
snowflake_id!(
    /// Forum channel identifier; the container threads live in.
    ForumId
);
snowflake_id!(
    /// Thread identifier. Time-ordered: a higher id was created later.
    ThreadId
);
snowflake_id!(
    /// User identifier.
    UserId
);
