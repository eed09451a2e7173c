//! Configuration and startup error types.

use derive_getters::Getters;

/// What went wrong while assembling `WardenConfig` or starting up.
///
/// Settings come from the bundled defaults, `forumwarden.toml` in the home
/// and working directories, and `FORUMWARDEN__*` environment variables.
/// Some commands additionally need a bot token and a guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// No bot token was passed with `--token` or `DISCORD_TOKEN`.
    #[display("DISCORD_TOKEN is not set (use --token or .env)")]
    MissingToken,

    /// `discord.guild_id` is absent from every layer.
    #[display("discord.guild_id is not configured")]
    MissingGuild,

    /// `discord.forums` is empty but the command needs forums to watch.
    #[display("discord.forums lists no forums to watch")]
    NoForums,

    /// An explicit configuration file could not be read.
    #[display("Failed to read configuration from {path}: {reason}")]
    Unreadable {
        /// File that was requested
        path: String,
        /// Loader message
        reason: String,
    },

    /// The layered sources could not be merged.
    #[display("Failed to build configuration: {_0}")]
    Build(String),

    /// The merged settings do not fit `WardenConfig`.
    #[display("Failed to parse configuration: {_0}")]
    Parse(String),

    /// The log level or `RUST_LOG` is not a valid filter directive.
    #[display("Invalid log filter: {_0}")]
    LogFilter(String),

    /// A global tracing subscriber was already installed.
    #[display("Failed to install subscriber: {_0}")]
    Subscriber(String),
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use forumwarden_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::MissingGuild);
    /// assert_eq!(err.kind(), &ConfigErrorKind::MissingGuild);
    /// assert!(err.to_string().contains("discord.guild_id"));
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
