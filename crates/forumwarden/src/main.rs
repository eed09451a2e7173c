//! forumwarden CLI binary.
//!
//! - Show forum statistics
//! - Search threads by name
//! - Prune departed-owner and duplicate threads
//! - Keep forums cached from live gateway events

use clap::Parser;
use forumwarden::{LoggingConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env so DISCORD_TOKEN can live next to the config
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    init_logging(
        LoggingConfig::new(log_level).with_json_logs(cli.json_logs),
    )?;

    cli::run(cli).await?;

    Ok(())
}
