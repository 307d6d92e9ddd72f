//! CLI module for Wordbank
//!
//! Provides command-line interface for:
//! - serve: Load configuration and run the HTTP server
//! - seed: Bulk-load words from a JSON file

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, seed, seed_from_file, seed_words, serve, SeedReport};
pub use errors::{CliError, CliErrorCode, CliResult};
