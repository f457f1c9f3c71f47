//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for Practice Minder.
//! Each subcommand is implemented in its own submodule for maintainability:
//! - `lookup`: Metadata lookup and song record filling
//! - `genres`: Genre tag normalization
//! - `links`: Streaming and tab site search links
//! - `config`: Configuration file inspection

mod config;
mod genres;
mod links;
mod lookup;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::enrichment::{Aggregator, GenreTaxonomy};

pub use config::cmd_config;
pub use genres::cmd_genres;
pub use links::cmd_links;
pub use lookup::{cmd_fill, cmd_lookup};

/// Practice Minder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Per-request timeout in seconds (overrides the config file)
    #[arg(long, global = true, env = "PRACTICE_MINDER_TIMEOUT")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Look up tempo, key, album and genres for a song
    Lookup {
        /// Song title
        title: String,
        /// Artist name
        artist: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill the empty fields of a song record file
    Fill {
        /// Path to the song record (JSON)
        record: PathBuf,
        /// Write the filled record back to the file
        #[arg(long)]
        write: bool,
    },
    /// Map free-text genre tags onto the genre taxonomy
    Genres {
        /// Tags to normalize
        tags: Vec<String>,
        /// Print the taxonomy instead
        #[arg(long)]
        list: bool,
    },
    /// Print streaming and tab site search links for a song
    Links {
        /// Song title
        title: String,
        /// Artist name
        artist: String,
    },
    /// Show the configuration file location and effective settings
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Lookup {
            title,
            artist,
            json,
        } => {
            let rt = Runtime::new()?;
            let aggregator = build_aggregator(cli)?;
            cmd_lookup(&rt, &aggregator, title, artist, *json)
        }
        Commands::Fill { record, write } => {
            let rt = Runtime::new()?;
            let aggregator = build_aggregator(cli)?;
            cmd_fill(&rt, &aggregator, record, *write)
        }
        Commands::Genres { tags, list } => cmd_genres(tags, *list),
        Commands::Links { title, artist } => cmd_links(title, artist),
        Commands::Config { init } => cmd_config(*init, cli.timeout),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Effective configuration: the config file plus command-line overrides.
pub(crate) fn effective_config(timeout: Option<u64>) -> crate::config::Config {
    let mut config = crate::config::load();
    if let Some(secs) = timeout {
        config.http.timeout_secs = secs;
    }
    config
}

/// Aggregator over the configured sources with the standard taxonomy.
fn build_aggregator(cli: &Cli) -> anyhow::Result<Aggregator> {
    let config = effective_config(cli.timeout);
    let aggregator = Aggregator::new(&config, Arc::new(GenreTaxonomy::standard()))?;
    Ok(aggregator)
}
