//! CLI administration tool for link-router.
//!
//! Edits redirect rules and checks the database without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Interactively edit the rules of a short URL
//! cargo run --bin admin -- rules edit abc123
//! cargo run --bin admin -- rules edit abc123 --domain s.example.com
//!
//! # Print the rules of a short URL
//! cargo run --bin admin -- rules show abc123
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use link_router::application::rule_management::{Prompter, run_rule_session};
use link_router::application::services::RedirectRuleService;
use link_router::config::{Config, mask_connection_string};
use link_router::domain::entities::{ShortUrl, ShortUrlIdentifier};
use link_router::infrastructure::persistence::PgShortUrlRepository;
use link_router::infrastructure::terminal::DialoguerPrompter;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-router.
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
    /// Manage redirect rules of a short URL
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Redirect rule subcommands.
#[derive(Subcommand)]
enum RulesAction {
    /// Interactively add, remove and re-arrange rules
    Edit {
        /// Short code
        code: String,

        /// Domain the short URL belongs to (omit for the default domain)
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// Print the current rules
    Show {
        /// Short code
        code: String,

        /// Domain the short URL belongs to (omit for the default domain)
        #[arg(short, long)]
        domain: Option<String>,
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

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&database_url)))?;

    match cli.command {
        Commands::Rules { action } => handle_rules_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches rule management commands.
async fn handle_rules_action(action: RulesAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgShortUrlRepository::new(Arc::new(pool.clone())));
    let service = RedirectRuleService::new(repository);

    match action {
        RulesAction::Edit { code, domain } => {
            let identifier = ShortUrlIdentifier::new(code, domain.as_deref());
            edit_rules(&service, &identifier).await?;
        }
        RulesAction::Show { code, domain } => {
            let identifier = ShortUrlIdentifier::new(code, domain.as_deref());
            show_rules(&service, &identifier).await?;
        }
    }

    Ok(())
}

async fn load_short_url(
    service: &RedirectRuleService,
    identifier: &ShortUrlIdentifier,
) -> Result<ShortUrl> {
    service
        .load(identifier)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", identifier, e))
}

/// Runs the interactive editing session and saves on request.
///
/// # Flow
///
/// 1. Load the short URL with its current rules
/// 2. Run the session until the operator saves or discards
/// 3. Confirm and replace the stored rule set
async fn edit_rules(service: &RedirectRuleService, identifier: &ShortUrlIdentifier) -> Result<()> {
    println!("{}", "🔀 Redirect Rules".bright_blue().bold());
    println!();

    let short_url = load_short_url(service, identifier).await?;
    let mut prompter = DialoguerPrompter::new();

    let Some(rules) = run_rule_session(&mut prompter, &short_url)? else {
        println!("{}", "❌ Changes discarded".red());
        return Ok(());
    };

    let confirmed = Confirm::new()
        .with_prompt(format!("Save {} rules for {}?", rules.len(), identifier))
        .default(true)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    service
        .set_rules(&short_url, rules)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to save rules: {}", e))?;

    println!();
    println!("{}", "✅ Rules saved successfully!".green().bold());
    println!();

    let saved = service
        .reload(short_url.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to reload {}: {}", identifier, e))?;
    print_rules(&saved);

    Ok(())
}

/// Prints the rules of a short URL in evaluation order.
async fn show_rules(service: &RedirectRuleService, identifier: &ShortUrlIdentifier) -> Result<()> {
    let short_url = load_short_url(service, identifier).await?;

    println!("{} {}", "📋 Redirect rules of".bright_blue().bold(), identifier.to_string().cyan());
    println!("  Default target: {}", short_url.long_url.bright_white());

    if short_url.rules().is_empty() {
        println!();
        println!("{}", "  No rules found".yellow());
        println!(
            "  Add one with: {} admin -- rules edit {}",
            "cargo run --bin".bright_cyan(),
            short_url.short_code
        );
        return Ok(());
    }

    print_rules(&short_url);
    Ok(())
}

/// Prints a rule table in evaluation order.
fn print_rules(short_url: &ShortUrl) {
    if short_url.rules().is_empty() {
        println!("{}", "  No rules: every request goes to the default target".yellow());
        println!();
        return;
    }

    let rows: Vec<Vec<String>> = short_url
        .rules()
        .iter()
        .map(|rule| {
            vec![
                rule.priority().to_string(),
                rule.conditions_summary(),
                rule.long_url().to_string(),
            ]
        })
        .collect();

    DialoguerPrompter::new().table(&["Priority", "Conditions", "Target"], &rows);
    println!("  Total: {}", rows.len().to_string().bright_white().bold());
    println!();
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
            let short_urls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
                .fetch_one(pool)
                .await?;
            let rules: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM redirect_rules")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL:     {}", version.bright_white());
            println!("  Short URLs:     {}", short_urls.to_string().bright_green().bold());
            println!("  Redirect rules: {}", rules.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
