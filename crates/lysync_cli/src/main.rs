//! lysync CLI
//!
//! Command-line tools for the lysync mirror.
//!
//! # Commands
//!
//! - `sync` - Run a sync for one entity kind and print its statistics
//! - `health` - Probe the remote API
//! - `endpoints` - List the known entity endpoints
//! - `version` - Show version information
//!
//! Credentials come from the `LYCEUM_API_BASE_URL`, `LYCEUM_API_USERNAME`,
//! and `LYCEUM_API_PASSWORD` environment variables, with flag overrides.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// lysync command-line mirror tools.
#[derive(Parser)]
#[command(name = "lysync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the remote API (overrides LYCEUM_API_BASE_URL)
    #[arg(global = true, long)]
    base_url: Option<String>,

    /// Basic-auth username (overrides LYCEUM_API_USERNAME)
    #[arg(global = true, long)]
    username: Option<String>,

    /// Basic-auth password (overrides LYCEUM_API_PASSWORD)
    #[arg(global = true, long)]
    password: Option<String>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a sync for one entity kind and print its statistics
    Sync {
        /// Entity kind to synchronize
        #[arg(short, long, default_value = "alunos")]
        entity: String,

        /// Skip records whose change stamp has not moved
        #[arg(short, long)]
        incremental: bool,

        /// Records per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Defensive page cap (default: fetch until the remote signals done)
        #[arg(long)]
        max_pages: Option<u32>,

        /// Inter-page delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Probe the remote API
    Health,

    /// List the known entity endpoints
    Endpoints,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let credentials = commands::Credentials::resolve(cli.base_url, cli.username, cli.password);

    match cli.command {
        Commands::Sync {
            entity,
            incremental,
            page_size,
            max_pages,
            delay_ms,
            format,
        } => {
            commands::sync::run(
                &credentials,
                &entity,
                incremental,
                page_size,
                max_pages,
                delay_ms,
                &format,
            )?;
        }
        Commands::Health => {
            commands::health::run(&credentials)?;
        }
        Commands::Endpoints => {
            commands::endpoints::run();
        }
        Commands::Version => {
            println!("lysync CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
