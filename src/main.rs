//! Practice Minder - song metadata for a personal music-practice tracker.
//!
//! Looks up tempo, key, album and genres for a song by scraping several
//! music sites, and fills the empty fields of song records with the result.

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod links;
pub mod model;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = EnvFilter::builder()
        .with_default_directive("practice_minder=info".parse()?)
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
