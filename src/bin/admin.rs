//! CLI administration tool for hashlink.
//!
//! Runs shortener operations directly against the configured store, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/page
//!
//! # Look up a short code
//! cargo run --bin admin -- resolve 6ab016
//!
//! # Show the candidate codes for a URL without touching storage
//! cargo run --bin admin -- candidates google.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `hashlink::config`). With `STORAGE=memory` every
//! invocation starts from an empty store.

use hashlink::config::{self, Config, StorageBackend};
use hashlink::server;
use hashlink::utils::code_generator;
use hashlink::utils::url_normalizer::normalize_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing hashlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create (or look up) the short code for a URL
    Shorten {
        /// URL to shorten (scheme optional)
        url: String,
    },

    /// Print the long URL stored for a short code
    Resolve {
        /// Six-character short code
        code: String,
    },

    /// Print the normalized URL and its candidate codes
    Candidates {
        /// URL to inspect (scheme optional)
        url: String,

        /// Number of candidates to print
        #[arg(short, long, default_value_t = code_generator::MAX_CANDIDATES)]
        limit: usize,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Shorten { url } => handle_shorten(&config, &url).await?,
        Commands::Resolve { code } => handle_resolve(&config, &code).await?,
        Commands::Candidates { url, limit } => handle_candidates(&url, limit)?,
        Commands::Db { action } => handle_db_action(&config, action).await?,
    }

    Ok(())
}

fn warn_if_ephemeral(config: &Config) {
    if config.storage == StorageBackend::Memory {
        println!(
            "{}",
            "⚠️  STORAGE=memory: nothing is persisted between runs".yellow()
        );
        println!();
    }
}

/// Shortens a URL through the same service the server uses.
async fn handle_shorten(config: &Config, url: &str) -> Result<()> {
    warn_if_ephemeral(config);

    let service = server::build_service(config).await?;
    let code = service
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    let short_url = format!("{}/{}", config.base_url.trim_end_matches('/'), code);

    println!("{}", "✅ Short link ready".green().bold());
    println!();
    println!("  Long URL:  {}", url.cyan());
    println!("  Code:      {}", code.bright_green().bold());
    println!("  Short URL: {}", short_url.bright_white());
    println!();

    Ok(())
}

/// Resolves a short code to its long URL.
async fn handle_resolve(config: &Config, code: &str) -> Result<()> {
    warn_if_ephemeral(config);

    let service = server::build_service(config).await?;
    let long_url = service
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve '{}': {}", code, e))?;

    println!("  {} → {}", code.bright_green().bold(), long_url.cyan());

    Ok(())
}

/// Prints the candidate sequence for a URL.
///
/// Pure computation: no store is opened.
fn handle_candidates(url: &str, limit: usize) -> Result<()> {
    let normalized = normalize_url(url).context("Invalid URL")?;

    println!("{}", "🔍 Candidate codes".bright_blue().bold());
    println!();
    println!("  Normalized: {}", normalized.cyan());
    println!("  Digest:     {}", code_generator::digest_hex(&normalized).bright_black());
    println!();

    for candidate in code_generator::candidates(&normalized).take(limit) {
        println!(
            "  {:>2}  {}",
            candidate.source_index,
            candidate.short_code.bright_green()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(config: &Config, action: DbAction) -> Result<()> {
    if config.storage != StorageBackend::Postgres {
        anyhow::bail!("Database commands require STORAGE=postgres");
    }

    let pool = server::connect_pool(config).await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            let mappings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
                .fetch_one(&pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Mappings:   {}",
                mappings.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
