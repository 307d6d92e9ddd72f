//! # Application Configuration
//!
//! Loaded from an optional JSON file, then overridden from the environment
//! (after `.env` is read by the binary).
//!
//! | Variable | Field |
//! |---|---|
//! | `WORDBANK_HOST` | `server.host` |
//! | `WORDBANK_PORT` | `server.port` |
//! | `WORDBANK_CORS_ORIGINS` | `server.cors_origins` (comma-separated) |
//! | `WORDBANK_DATA_FILE` | `store.data_file` |
//! | `WORDBANK_LOG_FORMAT` | `log_format` (`pretty` or `json`) |
//! | `ENABLE_DESTRUCTIVE_ENDPOINTS` | `destructive_endpoints_enabled` |

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::rest_api::FeatureFlags;
use crate::store::MemoryConnector;

/// Environment variable gating POST, PUT and DELETE
pub const DESTRUCTIVE_FLAG_VAR: &str = "ENABLE_DESTRUCTIVE_ENDPOINTS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: String, value: String },
}

/// Store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot of the word collection. Unset keeps words in memory only.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

impl StoreConfig {
    pub fn connector(&self) -> MemoryConnector {
        MemoryConnector::new(self.data_file.clone())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    /// Disabled unless explicitly turned on
    #[serde(default)]
    pub destructive_endpoints_enabled: bool,

    /// Default `tracing` filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info,tower_http=info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            store: StoreConfig::default(),
            destructive_endpoints_enabled: false,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path` and apply process environment overrides.
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Read the JSON file only
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("WORDBANK_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WORDBANK_PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "WORDBANK_PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(origins) = lookup("WORDBANK_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(path) = lookup("WORDBANK_DATA_FILE") {
            self.store.data_file = Some(PathBuf::from(path));
        }
        if let Some(format) = lookup("WORDBANK_LOG_FORMAT") {
            self.log_format = format.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "WORDBANK_LOG_FORMAT".to_string(),
                value: format.clone(),
            })?;
        }
        if let Some(flag) = lookup(DESTRUCTIVE_FLAG_VAR) {
            self.destructive_endpoints_enabled = parse_flag(&flag);
        }
        Ok(())
    }

    pub fn feature_flags(&self) -> FeatureFlags {
        FeatureFlags {
            destructive_endpoints_enabled: self.destructive_endpoints_enabled,
        }
    }
}

/// `true`, `1`, `yes` and `on` enable a flag; anything else disables it
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
