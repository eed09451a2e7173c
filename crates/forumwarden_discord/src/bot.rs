//! Gateway client lifecycle.

use crate::{ForumEventHandler, platform_error};
use forumwarden_error::PlatformResult;
use serenity::Client;
use tracing::{info, instrument};

/// Long-running gateway connection feeding live thread events to the cache.
///
/// # Example
/// ```no_run
/// use forumwarden_cache::{CacheConfig, ForumCacheService};
/// use forumwarden_core::{ForumId, GuildId};
/// use forumwarden_discord::{DiscordPlatform, ForumEventHandler, WardenBot};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let platform = Arc::new(DiscordPlatform::new(&token));
///     let cache = Arc::new(ForumCacheService::new(platform, CacheConfig::default()));
///     let handler = ForumEventHandler::new(cache, GuildId(1), vec![ForumId(2)]);
///
///     let mut bot = WardenBot::new(&token, handler).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct WardenBot {
    client: Client,
}

impl WardenBot {
    /// Build a gateway client around `handler`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the client fails to
    /// initialize.
    #[instrument(skip(token, handler), fields(token_len = token.len()))]
    pub async fn new(token: &str, handler: ForumEventHandler) -> PlatformResult<Self> {
        let intents = ForumEventHandler::intents();
        info!(?intents, "Building Serenity client");
        let client = Client::builder(token, intents)
            .event_handler(handler)
            .await
            .map_err(platform_error)?;
        Ok(Self { client })
    }

    /// Connect and process events until the connection ends.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> PlatformResult<()> {
        info!("Starting gateway connection");
        self.client.start().await.map_err(platform_error)
    }
}
