//! CLI command implementations
//!
//! Each command loads configuration, installs logging, then runs to
//! completion on its own tokio runtime.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::args::Command;
use super::errors::{CliError, CliResult};
use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::rest_api::{ApiError, AppState, WordService};
use crate::store::StoreHandle;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    // A missing .env is normal outside development.
    let _ = dotenv::dotenv();

    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config } => serve(&config),
        Command::Seed { file, config } => seed(&config, &file),
    }
}

fn load_config(config_path: &Path) -> CliResult<AppConfig> {
    let config = AppConfig::load(config_path)?;
    init_logging(&config.log_level, config.log_format)?;
    Ok(config)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP server and block until shutdown
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    tracing::info!(
        config = %config_path.display(),
        destructive_endpoints_enabled = config.destructive_endpoints_enabled,
        data_file = ?config.store.data_file,
        "starting wordbank"
    );
    if !config.destructive_endpoints_enabled {
        tracing::info!("destructive endpoints disabled; POST, PUT and DELETE return 403");
    }

    // The store connects lazily on the first request.
    let state = AppState::new(
        StoreHandle::new(config.store.connector()),
        config.feature_flags(),
    );
    let server = HttpServer::new(config.server.clone(), state);

    runtime()?.block_on(server.start())?;
    Ok(())
}

/// Outcome of a seed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub invalid: usize,
}

/// Load a JSON array of words from `file` into the configured store
pub fn seed(config_path: &Path, file: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let report = seed_from_file(&config, file)?;

    tracing::info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        invalid = report.invalid,
        "seed complete"
    );
    println!(
        "Seeded {} words ({} duplicates skipped, {} invalid skipped)",
        report.inserted, report.duplicates, report.invalid
    );
    Ok(())
}

/// Read `file` and seed the store described by `config`
pub fn seed_from_file(config: &AppConfig, file: &Path) -> CliResult<SeedReport> {
    let content = fs::read_to_string(file)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", file.display(), e)))?;
    let entries = match serde_json::from_str::<Value>(&content)? {
        Value::Array(entries) => entries,
        _ => {
            return Err(CliError::seed_failed(format!(
                "{} must contain a JSON array of words",
                file.display()
            )))
        }
    };

    let handle = StoreHandle::new(config.store.connector());
    runtime()?.block_on(async {
        let service = WordService::new(handle.get().await.map_err(ApiError::from)?);
        seed_words(&service, &entries).await
    })
}

/// Insert each entry through the same validation as `POST /words`.
///
/// Duplicates and invalid entries are skipped; a store failure stops the run.
pub async fn seed_words(service: &WordService, entries: &[Value]) -> CliResult<SeedReport> {
    let mut report = SeedReport::default();

    for (index, entry) in entries.iter().enumerate() {
        match service.create(entry).await {
            Ok(_) => report.inserted += 1,
            Err(ApiError::Conflict(word)) => {
                tracing::info!(index, word = %word, "skipping duplicate word");
                report.duplicates += 1;
            }
            Err(ApiError::Store(e)) => return Err(ApiError::Store(e).into()),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping invalid word");
                report.invalid += 1;
            }
        }
    }

    Ok(report)
}
