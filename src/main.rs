use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, warn};

use scamguard::config::Config;
use scamguard::db::models::{CheckFilter, DatePeriod, RiskLevel};
use scamguard::db::Database;
use scamguard::output::terminal;

/// ScamGuard: heuristic scam-risk scoring for messages and links.
///
/// Scores text for common scam markers (pressure keywords, links, very short
/// bait messages) and serves the scorer as a small JSON API.
#[derive(Parser)]
#[command(name = "scamguard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Run the JSON API server
    Serve {
        /// Port to listen on (default: SCAMGUARD_PORT or 8000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: SCAMGUARD_BIND or 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,

        /// Don't store checks, even if SCAMGUARD_PERSIST is on
        #[arg(long)]
        no_persist: bool,
    },

    /// Score a message
    Check {
        /// The message text
        message: String,

        /// Store the check in the database
        #[arg(long)]
        save: bool,
    },

    /// Assess a single link
    CheckLink {
        /// The URL (scheme optional)
        url: String,
    },

    /// List stored checks, most recent first
    History {
        /// Only this risk level (safe, medium, high)
        #[arg(long)]
        risk: Option<String>,

        /// Only checks created in this window (today, past_7_days, this_month, this_year)
        #[arg(long)]
        since: Option<String>,

        /// Only messages containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Max checks to show (default: 20)
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Show system status (DB stats, counts per risk level, latest check)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scamguard=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing ScamGuard database...");
            let config = Config::load()?;
            config.require_storage()?;
            let db = init_database(&config)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nScamGuard is ready. Start the API with: cargo run -- serve");
        }

        Commands::Serve {
            port,
            bind,
            no_persist,
        } => {
            let mut config = Config::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if no_persist {
                config.persist_checks = false;
            }

            let db = if config.persist_checks {
                match init_database(&config) {
                    Ok(db) => Some(db),
                    Err(e) => {
                        warn!(error = %e, "Record store unavailable, serving without persistence");
                        None
                    }
                }
            } else {
                None
            };

            let state = scamguard::web::AppState::new(config, db);
            scamguard::web::run_server(state).await?;
        }

        Commands::Check { message, save } => {
            if message.is_empty() {
                anyhow::bail!("Message is required");
            }

            let result = scamguard::scoring::analyze_message(&message);
            terminal::display_message_analysis(&message, &result);

            if save {
                let config = Config::load()?;
                config.require_storage()?;
                let db = init_database(&config)?;
                let id = db.insert_check(&message, &result).await?;
                println!("{}", format!("Saved as check #{id}").dimmed());
            }
        }

        Commands::CheckLink { url } => {
            if url.trim().is_empty() {
                anyhow::bail!("URL is required");
            }
            let analysis = scamguard::scoring::link::analyze_link(&url);
            terminal::display_link_analysis(&url, &analysis);
        }

        Commands::History {
            risk,
            since,
            search,
            limit,
        } => {
            let config = Config::load()?;
            config.require_storage()?;
            let db = open_database(&config)?;

            let filter = CheckFilter {
                risk_level: parse_option(risk.as_deref(), RiskLevel::parse, "risk level")?,
                since: parse_option(since.as_deref(), DatePeriod::parse, "period")?,
                search,
                limit: Some(limit),
                offset: 0,
            };

            let checks = db.list_checks(&filter).await?;
            let total = db.count_checks(&filter).await?;
            terminal::display_check_list(&checks, total);
        }

        Commands::Status => {
            let config = Config::load()?;
            config.require_storage()?;
            if scamguard::status::check_initialized(&config.db_path) {
                let db = open_database(&config)?;
                scamguard::status::show(&db, &config.db_path).await?;
            }
            println!(
                "Persistence: {}",
                if config.persist_checks { "on" } else { "off" }
            );
        }
    }

    Ok(())
}

/// Parse an optional CLI filter value, rejecting values the parser doesn't know.
fn parse_option<T>(
    value: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    what: &str,
) -> Result<Option<T>> {
    match value {
        None => Ok(None),
        Some(raw) => match parse(raw) {
            Some(parsed) => Ok(Some(parsed)),
            None => anyhow::bail!("Unknown {what}: {raw:?}"),
        },
    }
}

/// Open the existing record store.
#[cfg(feature = "sqlite")]
fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    scamguard::db::open_sqlite(&config.db_path)
}

/// Initialize the record store (create if needed).
#[cfg(feature = "sqlite")]
fn init_database(config: &Config) -> Result<Arc<dyn Database>> {
    scamguard::db::initialize_sqlite(&config.db_path)
}

#[cfg(not(feature = "sqlite"))]
fn open_database(_config: &Config) -> Result<Arc<dyn Database>> {
    anyhow::bail!("Built without the 'sqlite' feature. Rebuild with: cargo build --features sqlite")
}

#[cfg(not(feature = "sqlite"))]
fn init_database(config: &Config) -> Result<Arc<dyn Database>> {
    open_database(config)
}
