//! Command-line interface for practice-minder.
//!
//! This module provides CLI commands for looking up song metadata,
//! filling song records, normalizing genre tags and generating search links.

mod commands;

pub use commands::{Cli, Commands, run_command};
