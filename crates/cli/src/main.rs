//! Marquee CLI - mq command

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli_lib::logging::{self, LogTarget};
use cli_lib::system_config;
use std::path::PathBuf;

mod cmd;

/// Marquee - search live events from the terminal
#[derive(Parser)]
#[command(name = "mq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Answer searches from a saved API response instead of the network
    #[arg(long, global = true, value_name = "FILE")]
    fixture: Option<PathBuf>,

    /// Keep favorite flags in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search events once and print the results
    Search {
        /// Search text
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Search as you type (one line per edit)
    Watch,
    /// Show details of one search result
    Show {
        /// Row number in the result list (default: 1)
        #[arg(short, long, default_value = "1")]
        row: usize,
        /// Search text
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Manage favorite events
    #[command(subcommand)]
    Fav(FavCommands),
    /// View or edit configuration
    Config {
        /// List all values
        #[arg(long)]
        list: bool,
        /// Print one value
        #[arg(long, value_name = "KEY")]
        get: Option<String>,
        /// Set one value
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,
        /// Print the config file path
        #[arg(long)]
        path: bool,
        /// With --path: create the file if missing
        #[arg(long)]
        create: bool,
        /// Print an example configuration
        #[arg(long)]
        example: bool,
    },
}

#[derive(Subcommand)]
enum FavCommands {
    /// List marked event ids
    List,
    /// Mark an event
    Add { id: String },
    /// Unmark an event
    Remove { id: String },
    /// Flip an event's mark
    Toggle { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = system_config::load()?;

    // Initialize tracing
    let target = match cli.command {
        Commands::Watch => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    let _log_guard = logging::init(&config, target)?;
    for warning in config.warnings() {
        tracing::warn!("{}", warning);
    }

    let fixture = cli.fixture.as_deref();
    let ephemeral = cli.ephemeral;

    match cli.command {
        Commands::Search { query } => cmd::search::run(&config, &query, fixture, ephemeral).await,
        Commands::Watch => cmd::watch::run(&config, fixture, ephemeral).await,
        Commands::Show { row, query } => {
            cmd::show::run(&config, &query, row, fixture, ephemeral).await
        }
        Commands::Fav(fav_cmd) => match fav_cmd {
            FavCommands::List => cmd::fav::run_list(&config, ephemeral).await,
            FavCommands::Add { id } => cmd::fav::run_add(&config, &id, ephemeral).await,
            FavCommands::Remove { id } => cmd::fav::run_remove(&config, &id, ephemeral).await,
            FavCommands::Toggle { id } => cmd::fav::run_toggle(&config, &id, ephemeral).await,
        },
        Commands::Config { list, get, set, path, create, example } => {
            if list {
                cmd::config::run_list(&config).await
            } else if let Some(key) = get {
                cmd::config::run_get(&config, &key).await
            } else if let Some([key, value]) = set.as_deref() {
                cmd::config::run_set(&config, key, value).await
            } else if path {
                cmd::config::run_path(create).await
            } else if example {
                cmd::config::run_example().await
            } else {
                cmd::config::run_list(&config).await
            }
        }
    }
}
