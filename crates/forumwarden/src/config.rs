//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from forumwarden.toml)
//! - ~/.config/forumwarden/forumwarden.toml
//! - ./forumwarden.toml
//! - `FORUMWARDEN__<SECTION>__<KEY>` environment variables

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use forumwarden_cache::CacheConfig;
use forumwarden_core::{ForumId, GuildId};
use forumwarden_error::{ConfigError, ConfigErrorKind, WardenError, WardenResult};
use forumwarden_prune::PruneConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../forumwarden.toml");

/// Discord connection settings.
///
/// ```toml
/// [discord]
/// guild_id = 123456789012345678
/// forums = [234567890123456789]
/// moderator_roles = [345678901234567890]
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct DiscordConfig {
    /// Community the bot operates in
    #[serde(default)]
    guild_id: Option<GuildId>,

    /// Forums watched in gateway mode
    #[serde(default)]
    forums: Vec<ForumId>,

    /// Roles whose holders count as moderators
    #[serde(default)]
    moderator_roles: Vec<u64>,
}

/// Complete forumwarden configuration.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct WardenConfig {
    /// Thread cache settings
    #[serde(default)]
    cache: CacheConfig,

    /// Prune pacing settings
    #[serde(default)]
    prune: PruneConfig,

    /// Discord settings
    #[serde(default)]
    discord: DiscordConfig,
}

fn build_error(e: config::ConfigError) -> WardenError {
    WardenError::from(ConfigError::new(ConfigErrorKind::Build(e.to_string())))
}

fn parse_error(e: config::ConfigError) -> WardenError {
    WardenError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
}

fn environment() -> Environment {
    Environment::with_prefix("FORUMWARDEN")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("discord.forums")
        .with_list_parse_key("discord.moderator_roles")
}

impl WardenConfig {
    /// Bundled defaults only.
    pub fn defaults() -> WardenResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Load configuration from a single file.
    ///
    /// Keys missing from the file take their built-in defaults.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> WardenResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                WardenError::from(ConfigError::new(ConfigErrorKind::Unreadable {
                    path: path.as_ref().display().to_string(),
                    reason: e.to_string(),
                }))
            })?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Load configuration from every source.
    ///
    /// An explicit `path` replaces the home and current directory files.
    /// Environment variables override everything.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use forumwarden::WardenConfig;
    ///
    /// let config = WardenConfig::load(None).unwrap();
    /// println!("{} ms between deletions", config.prune().delete_delay_ms());
    /// ```
    #[instrument]
    pub fn load(path: Option<&Path>) -> WardenResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path));
            }
            None => {
                if let Some(home) = dirs::home_dir() {
                    let home_config = home.join(".config/forumwarden/forumwarden.toml");
                    builder = builder.add_source(File::from(home_config).required(false));
                }
                builder = builder.add_source(File::with_name("forumwarden").required(false));
            }
        }

        builder
            .add_source(environment())
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }
}
