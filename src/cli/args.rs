//! CLI argument definitions using clap
//!
//! Commands:
//! - wordbank serve --config <path>
//! - wordbank seed --file <path> --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wordbank - word-game vocabulary API
#[derive(Parser, Debug)]
#[command(name = "wordbank")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./wordbank.json")]
        config: PathBuf,
    },

    /// Load words from a JSON array into the configured store
    Seed {
        /// JSON file holding an array of word objects
        #[arg(long)]
        file: PathBuf,

        /// Path to configuration file
        #[arg(long, default_value = "./wordbank.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_default_config() {
        let cli = Cli::try_parse_from(["wordbank", "serve"]).unwrap();
        match cli.command {
            Command::Serve { config } => assert_eq!(config, PathBuf::from("./wordbank.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_seed_requires_file() {
        assert!(Cli::try_parse_from(["wordbank", "seed"]).is_err());

        let cli = Cli::try_parse_from(["wordbank", "seed", "--file", "words.json"]).unwrap();
        assert!(matches!(cli.command, Command::Seed { .. }));
    }
}
