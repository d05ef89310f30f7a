//! CLI administration tool for shortcode.
//!
//! Manages stored short URLs directly against the database, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List stored URLs
//! cargo run --bin admin -- urls list --skip 0 --limit 20
//!
//! # Show one record
//! cargo run --bin admin -- urls show promo
//!
//! # Create a short URL
//! cargo run --bin admin -- urls create https://example.com --alias promo --expires-in-hours 24
//!
//! # Delete a short URL
//! cargo run --bin admin -- urls delete promo
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
//! - `DATABASE_URL` (or `DB_HOST`/`DB_USER`/...): PostgreSQL connection.
//!   The in-memory store is process-local, so the tool refuses to run without it.

use shortcode::application::services::UrlService;
use shortcode::config::{Config, load_from_env};
use shortcode::domain::entities::UrlRecord;
use shortcode::domain::repositories::UrlRepository;
use shortcode::infrastructure::persistence::PgUrlRepository;
use shortcode::server::connect_database;
use shortcode::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

type PgUrlService = UrlService<PgUrlRepository, RandomCodeGenerator>;

/// CLI tool for managing shortcode.
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
    /// Manage short URLs
    Urls {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short URL management subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// List stored URLs in creation order
    List {
        #[arg(long, default_value_t = 0)]
        skip: i64,

        #[arg(long, default_value_t = 20)]
        limit: i64,
    },

    /// Show a single record, expired or not
    Show { code: String },

    /// Create a short URL
    Create {
        /// Destination, must start with http:// or https://
        url: String,

        /// Custom alias instead of a generated code
        #[arg(short, long)]
        alias: Option<String>,

        /// Hours until the short URL stops resolving
        #[arg(short, long)]
        expires_in_hours: Option<i64>,
    },

    /// Delete a short URL
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let pool = connect_database(&config, &database_url).await?;

    match cli.command {
        Commands::Urls { action } => handle_url_action(action, &config, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches URL management commands.
async fn handle_url_action(action: UrlAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    let generator = Arc::new(RandomCodeGenerator::new(config.code_length));
    let service = UrlService::new(repository, generator, config.code_max_attempts);

    match action {
        UrlAction::List { skip, limit } => list_urls(&service, skip, limit).await?,
        UrlAction::Show { code } => show_url(pool, &code).await?,
        UrlAction::Create {
            url,
            alias,
            expires_in_hours,
        } => {
            let expires_at = expires_in_hours
                .map(|hours| expiry_from_hours(Utc::now(), hours))
                .transpose()?;
            create_url(&service, url, alias, expires_at).await?
        }
        UrlAction::Delete { code, yes } => delete_url(&service, &code, yes).await?,
    }

    Ok(())
}

/// Lists stored URLs.
///
/// # Output Format
///
/// ```text
/// 📋 Short URLs
///
///   ID    Code         Clicks   Status    Destination
///   ─────────────────────────────────────────────────────────────
///   1     promo        42       ACTIVE    https://example.com
///   2     Ab3dE9       0        EXPIRED   https://example.org
/// ```
async fn list_urls(service: &PgUrlService, skip: i64, limit: i64) -> Result<()> {
    println!("{}", "📋 Short URLs".bright_blue().bold());
    println!();

    let records = service
        .list(skip.max(0), limit.max(1))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<12} {:<8} {:<9} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Status".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<5} {:<12} {:<8} {:<9} {}",
            record.id.to_string().bright_black(),
            record.short_code.cyan(),
            record.clicks.to_string(),
            status_label(record),
            record.original_url
        );
    }

    println!();
    println!(
        "  Shown: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Shows one record. Reads the row directly so expired records are visible
/// and the lookup never writes.
async fn show_url(pool: &PgPool, code: &str) -> Result<()> {
    let repository = PgUrlRepository::new(Arc::new(pool.clone()));
    let record = repository
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("URL not found")?;

    println!("{}", "🔗 Short URL".bright_blue().bold());
    println!();
    println!("  Code:        {}", record.short_code.cyan());
    println!("  Destination: {}", record.original_url);
    if let Some(ref alias) = record.custom_alias {
        println!("  Alias:       {}", alias.cyan());
    }
    println!(
        "  Clicks:      {}",
        record.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created:     {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    match record.expires_at {
        Some(at) => println!(
            "  Expires:     {}",
            at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
        ),
        None => println!("  Expires:     {}", "never".bright_black()),
    }
    println!("  Status:      {}", status_label(&record));
    println!();

    Ok(())
}

async fn create_url(
    service: &PgUrlService,
    url: String,
    alias: Option<String>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<()> {
    println!("{}", "✨ Create Short URL".bright_blue().bold());
    println!();

    let record = service
        .create(url, alias, expires_at)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create URL: {}", e))?;

    println!("{}", "✅ Short URL created successfully!".green().bold());
    println!();
    println!("  Code:        {}", record.short_code.bright_yellow().bold());
    println!("  Destination: {}", record.original_url);
    println!();

    Ok(())
}

/// Deletes a record after confirmation (default: No).
async fn delete_url(service: &PgUrlService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short URL".bright_blue().bold());
    println!();
    println!("  Code: {}", code.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete URL: {}", e))?;

    if deleted {
        println!("{}", "✅ URL deleted successfully!".green().bold());
    } else {
        println!("{}", "⚠️  URL not found".yellow());
    }
    println!();

    Ok(())
}

/// Computes `now + hours`, rejecting offsets chrono cannot represent.
fn expiry_from_hours(now: DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>> {
    Duration::try_hours(hours)
        .and_then(|offset| now.checked_add_signed(offset))
        .with_context(|| format!("--expires-in-hours {hours} is out of range"))
}

fn status_label(record: &UrlRecord) -> ColoredString {
    if record.is_expired() {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    }
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of URLs
/// - Total number of clicks
/// - Number of expired URLs
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM urls")
        .fetch_one(pool)
        .await?;

    let expired_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE expires_at IS NOT NULL AND expires_at < NOW()")
            .fetch_one(pool)
            .await?;

    println!(
        "  URLs:    {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:  {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Expired: {}",
        expired_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_from_hours() {
        let now: DateTime<Utc> = "2030-01-01T00:00:00Z".parse().unwrap();
        let expected: DateTime<Utc> = "2030-01-02T00:00:00Z".parse().unwrap();

        assert_eq!(expiry_from_hours(now, 24).unwrap(), expected);
    }

    #[test]
    fn test_expiry_from_hours_out_of_range() {
        let now = Utc::now();

        assert!(expiry_from_hours(now, i64::MAX).is_err());
        assert!(expiry_from_hours(now, i64::MIN).is_err());
        assert!(expiry_from_hours(now, 10_000_000_000).is_err());
    }
}
