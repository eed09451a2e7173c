//! Command handlers.

use super::commands::{Cli, Commands};
use forumwarden::{
    AuditFormat, ConfigError, ConfigErrorKind, DiscordPlatform, ForumCacheService,
    ForumEventHandler, ForumId, ForumStats, GuildId, PruneMode, PruneOrchestrator, PruneReport,
    ThreadMeta, WardenBot, WardenConfig, WardenResult, export_report, normalize_name,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Shared state for one CLI invocation.
struct App {
    config: WardenConfig,
    token: String,
    guild_id: GuildId,
    platform: Arc<DiscordPlatform>,
    cache: Arc<ForumCacheService>,
}

impl App {
    fn new(config: WardenConfig, token: Option<String>) -> WardenResult<Self> {
        let token = token.ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingToken))?;
        let guild_id = config
            .discord()
            .guild_id()
            .ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingGuild))?;

        let platform = Arc::new(
            DiscordPlatform::new(&token)
                .with_moderator_roles(config.discord().moderator_roles().iter().copied()),
        );
        let cache = Arc::new(ForumCacheService::new(
            platform.clone(),
            config.cache().clone(),
        ));

        Ok(Self {
            config,
            token,
            guild_id,
            platform,
            cache,
        })
    }

    /// Register and refresh a forum before answering from the cache.
    async fn refreshed(&self, forum_id: ForumId) -> WardenResult<ForumStats> {
        self.cache.register_forum(forum_id);
        Ok(self.cache.refresh_forum(self.guild_id, forum_id).await?)
    }
}

/// Execute the parsed command line.
#[instrument(skip(cli))]
pub async fn run(cli: Cli) -> WardenResult<()> {
    let config = WardenConfig::load(cli.config.as_deref())?;
    let app = App::new(config, cli.token)?;

    match cli.command {
        Commands::Stats { forum } => stats(&app, ForumId(forum)).await,
        Commands::Search {
            forum,
            query,
            limit,
        } => search(&app, ForumId(forum), &query, limit).await,
        Commands::Find { forum, name } => find(&app, ForumId(forum), &name).await,
        Commands::Prune {
            forum,
            execute,
            export,
            format,
        } => {
            let mode = if execute {
                PruneMode::Execute
            } else {
                PruneMode::DryRun
            };
            prune(&app, ForumId(forum), mode, export.as_deref(), format).await
        }
        Commands::Watch => watch(app).await,
    }
}

fn print_thread(thread: &ThreadMeta) {
    println!(
        "{:>20}  {}  {:>20}  {}",
        thread.id(),
        thread.created_at().format("%Y-%m-%d %H:%M"),
        thread.owner_id(),
        thread.name()
    );
}

async fn stats(app: &App, forum_id: ForumId) -> WardenResult<()> {
    let stats = app.refreshed(forum_id).await?;
    println!("Forum {}:", forum_id);
    println!("  threads: {}", stats.thread_count());
    println!("  owners:  {}", stats.owner_count());
    if let Some(refreshed_at) = stats.refreshed_at() {
        println!("  refreshed at: {}", refreshed_at.to_rfc3339());
    }
    Ok(())
}

async fn search(
    app: &App,
    forum_id: ForumId,
    query: &str,
    limit: Option<usize>,
) -> WardenResult<()> {
    app.refreshed(forum_id).await?;
    let limit = limit.unwrap_or(*app.config.cache().default_search_results());
    let results = app
        .cache
        .search_threads(forum_id, query, limit)
        .unwrap_or_default();

    for thread in &results {
        print_thread(thread);
    }
    println!("{} result(s)", results.len());
    Ok(())
}

async fn find(app: &App, forum_id: ForumId, name: &str) -> WardenResult<()> {
    app.refreshed(forum_id).await?;
    match app
        .cache
        .get_thread_by_exact_name(forum_id, &normalize_name(name))
    {
        Some(thread) => print_thread(&thread),
        None => println!("No thread named '{}'", name.trim()),
    }
    Ok(())
}

fn print_report(report: &PruneReport) {
    println!("Prune of forum {} ({}):", report.forum_id(), report.mode());
    println!("  scanned:           {}", report.scanned());
    println!("  owners checked:    {}", report.owners_checked());
    println!("  moderator skipped: {}", report.moderator_skipped());
    println!("  lookup failures:   {}", report.lookup_failures());
    println!("  flagged:           {}", report.flagged_count());
    for decision in report.flagged() {
        println!(
            "    {:>20}  {:<16}  {:>20}  {}",
            decision.thread_id(),
            decision.reason(),
            decision.owner_id(),
            decision.name()
        );
    }
    if *report.mode() == PruneMode::Execute {
        println!("  deleted:           {}", report.deleted_count());
        for failure in report.failures() {
            println!("    failed {}: {}", failure.thread_id(), failure.error());
        }
    }
}

async fn prune(
    app: &App,
    forum_id: ForumId,
    mode: PruneMode,
    export: Option<&Path>,
    format: AuditFormat,
) -> WardenResult<()> {
    app.cache.register_forum(forum_id);
    let orchestrator = PruneOrchestrator::new(
        app.platform.clone(),
        app.platform.clone(),
        app.config.prune().clone(),
    );
    let report = orchestrator
        .run_forum(&app.cache, app.guild_id, forum_id, mode)
        .await?;

    print_report(&report);

    if let Some(path) = export {
        let written = export_report(&report, path, format)?;
        info!(records = written, path = %path.display(), "Exported prune audit");
        println!("Wrote {} record(s) to {}", written, path.display());
    }
    Ok(())
}

async fn watch(app: App) -> WardenResult<()> {
    let forums = app.config.discord().forums().clone();
    if forums.is_empty() {
        return Err(ConfigError::new(ConfigErrorKind::NoForums).into());
    }
    info!(forums = forums.len(), "Watching forums");

    let handler = ForumEventHandler::new(app.cache.clone(), app.guild_id, forums);
    let mut bot = WardenBot::new(&app.token, handler).await?;
    bot.start().await?;
    Ok(())
}
