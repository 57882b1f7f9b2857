//! Movie Awards CLI - ingest movie lists and report producer award intervals
//!
//! # Commands
//!
//! ```bash
//! movie-awards serve                  # Start HTTP server (port 3000)
//! movie-awards ingest movielist.csv   # Load a `;`-delimited movie list
//! movie-awards list                   # Print stored movies as JSON
//! movie-awards awards                 # Print min/max producer intervals
//! movie-awards edit 3 --title "New"   # Merge fields into movie 3
//! movie-awards delete 3               # Delete movie 3
//! ```
//!
//! JSON results go to stdout; progress goes to stderr.

use clap::{Parser, Subcommand};
use movie_awards::{AppConfig, MovieCatalog, MovieId, MoviePatch, SqliteMovieStore};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "movie-awards")]
#[command(about = "Ingest movie lists and report producer award intervals", long_about = None)]
struct Cli {
    /// Database URL (overrides DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Log filter, e.g. `debug` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ingest a `;`-delimited movie list
    Ingest {
        /// Input CSV file
        input: PathBuf,
    },

    /// List stored movies
    List,

    /// Show producers with the shortest and longest win intervals
    Awards,

    /// Merge fields into a stored movie
    Edit {
        /// Movie id
        id: MovieId,

        #[arg(long)]
        year: Option<i64>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        studios: Option<String>,

        #[arg(long)]
        producers: Option<String>,

        /// Winner marker (`yes` marks a win)
        #[arg(long)]
        winner: Option<String>,

        /// Clear the winner marker
        #[arg(long, conflicts_with = "winner")]
        clear_winner: bool,
    },

    /// Delete a stored movie
    Delete {
        /// Movie id
        id: MovieId,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if let Some(filter) = cli.log_level {
        config.log_filter = filter;
    }

    init_tracing(&config.log_filter);

    let result = run(cli.command, config).await;

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(filter)
                .unwrap_or_else(|_| EnvFilter::new(movie_awards::config::DEFAULT_LOG_FILTER)),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(command: Commands, mut config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteMovieStore::connect(&config.database_url).await?;
    let catalog = MovieCatalog::new(Arc::new(store));

    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            movie_awards::server::start_server(&config, catalog).await?;
        }

        Commands::Ingest { input } => cmd_ingest(&catalog, &input).await?,

        Commands::List => {
            let movies = catalog.list().await?;
            eprintln!("🎬 {} movies stored", movies.len());
            print_json(&movies)?;
        }

        Commands::Awards => {
            let awards = catalog.awards_interval().await?;
            print_json(&awards)?;
        }

        Commands::Edit {
            id,
            year,
            title,
            studios,
            producers,
            winner,
            clear_winner,
        } => {
            let patch = MoviePatch {
                year,
                title,
                studios,
                producers,
                winner: if clear_winner { Some(None) } else { winner.map(Some) },
            };
            if patch.is_empty() {
                eprintln!("⚠️  No fields given, movie {} left unchanged", id);
            }
            let movie = catalog.edit(id, patch).await?;
            eprintln!("✏️  Movie {} updated", id);
            print_json(&movie)?;
        }

        Commands::Delete { id } => {
            catalog.delete(id).await?;
            eprintln!("🗑️  Movie deleted: {}", id);
        }
    }

    Ok(())
}

async fn cmd_ingest(catalog: &MovieCatalog, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Ingesting: {}", input.display());

    let report = catalog.ingest_file(input).await?;

    eprintln!("   Inserted: {}", report.inserted_count);
    if report.rejected_count > 0 {
        eprintln!("   ⚠️  Rejected: {}", report.rejected_count);
    }
    eprintln!("✨ Done!");

    print_json(&report)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
