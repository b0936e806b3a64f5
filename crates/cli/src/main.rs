use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use cinesync_core::MovieId;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod session;

use app::App;

#[derive(Parser)]
#[command(name = "cinesync")]
#[command(about = "Browse movies, keep a saved list and see what people search for", long_about = None)]
struct Cli {
    /// Keep all data in memory for this run (nothing is written to disk)
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and count the search (blank query lists popular movies)
    Search {
        query: String,
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show catalog details for one movie
    Details { id: MovieId },
    /// Most searched terms
    Trending {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Save a movie for the current user (or this device when signed out)
    Save {
        id: MovieId,
        #[arg(long)]
        title: String,
        /// Catalog poster path, e.g. /abc.jpg
        #[arg(long)]
        poster: Option<String>,
    },
    /// Remove a saved movie
    Unsave { id: MovieId },
    /// List saved movies, newest first
    Saved,
    /// Check whether a movie is saved
    IsSaved { id: MovieId },
    /// Sign in and move this device's saved movies to the account
    SignIn {
        user_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Sign out (saved movies stay with the account)
    SignOut,
    /// Show who operations currently run as
    Whoami,
}

fn get_data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("cinesync")
}

pub(crate) fn get_db_path() -> PathBuf {
    std::env::var_os("CINESYNC_DB_PATH")
        .map_or_else(|| get_data_dir().join("cinesync.db"), PathBuf::from)
}

pub(crate) fn get_session_path() -> PathBuf {
    std::env::var_os("CINESYNC_SESSION_PATH")
        .map_or_else(|| get_data_dir().join("session.json"), PathBuf::from)
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::open(cli.ephemeral)?;

    match cli.command {
        Commands::Search { query, limit } => commands::catalog::run_search(&app, &query, limit).await,
        Commands::Details { id } => commands::catalog::run_details(id).await,
        Commands::Trending { limit } => commands::trending::run_trending(&app, limit).await,
        Commands::Save { id, title, poster } => {
            commands::saved::run_save(&app, id, title, poster).await
        },
        Commands::Unsave { id } => commands::saved::run_unsave(&app, id).await,
        Commands::Saved => commands::saved::run_saved(&app).await,
        Commands::IsSaved { id } => commands::saved::run_is_saved(&app, id).await,
        Commands::SignIn { user_id, name, email } => {
            commands::account::run_sign_in(&app, user_id, name, email).await
        },
        Commands::SignOut => commands::account::run_sign_out(&app).await,
        Commands::Whoami => commands::account::run_whoami(&app).await,
    }
}
