//! CLI administration tool for tinylink.
//!
//! Provides commands for applying migrations, inspecting and deleting links,
//! and viewing statistics without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create the schema
//! cargo run --bin admin -- db migrate
//!
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Delete a link
//! cargo run --bin admin -- links delete abc123
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection

use tinylink::application::services::LinkService;
use tinylink::config::Config;
use tinylink::domain::repositories::LinkRepository;
use tinylink::error::AppError;
use tinylink::infrastructure::persistence::{self, PgLinkRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Permanently delete a link
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Apply pending migrations
    Migrate,

    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;

    let pool = persistence::connect_pool(&config)
        .await
        .context("Failed to connect to database")?;

    let repo = Arc::new(PgLinkRepository::with_timeout(
        Arc::new(pool.clone()),
        config.store_timeout(),
    ));

    match cli.command {
        Commands::Links { action } => handle_link_action(action, repo, &config).await?,
        Commands::Stats => handle_stats(repo).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(
    action: LinkAction,
    repo: Arc<PgLinkRepository>,
    config: &Config,
) -> Result<()> {
    let service = LinkService::new(repo, config.base_url.clone());

    match action {
        LinkAction::List => list_links(&service).await?,
        LinkAction::Delete { code, yes } => delete_link(&service, code, yes).await?,
    }

    Ok(())
}

/// Lists all links in a table.
async fn list_links(service: &LinkService<PgLinkRepository>) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<9} {:<40} {:>7}  {:<17} {:<17}",
        "Code".bright_white().bold(),
        "Target".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Last click".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(95).bright_black());

    for link in &links {
        let last_clicked = link
            .last_clicked
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<9} {:<40} {:>7}  {:<17} {:<17}",
            link.code.cyan(),
            truncate(&link.target, 40),
            link.clicks.to_string().bright_green(),
            last_clicked.bright_black(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    let never_clicked = links.iter().filter(|link| !link.was_clicked()).count();

    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!(
        "  Never clicked: {}",
        never_clicked.to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Deletes a link after a confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Deletion is permanent; the code becomes available again
async fn delete_link(
    service: &LinkService<PgLinkRepository>,
    code: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = match service.get_link_stats(&code).await {
        Ok(link) => link,
        Err(AppError::NotFound) => anyhow::bail!("Link '{}' not found", code),
        Err(e) => anyhow::bail!("{}", e),
    };

    println!("  Code:   {}", link.code.cyan());
    println!("  Target: {}", link.target);
    println!("  Clicks: {}", link.clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match service.delete_link(&code).await {
        Ok(()) => {}
        Err(AppError::NotFound) => {
            println!("{}", "⚠️  Link was already deleted".yellow());
            return Ok(());
        }
        Err(e) => anyhow::bail!("Failed to delete link: {}", e),
    }

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links
/// - Total number of clicks across all links
async fn handle_stats(repo: Arc<PgLinkRepository>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = repo
        .count_links()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let clicks_count = repo
        .total_clicks()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Migrate => {
            println!("{}", "🛠️  Running migrations...".bright_blue());

            persistence::run_migrations(pool)
                .await
                .context("Migration failed")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
