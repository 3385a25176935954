//! Service and console configuration
//!
//! Loaded once at startup from a JSON file. Every section has defaults, so a
//! file holding only `api_key` is complete. The `COURSELIST_API_KEY`
//! environment variable overrides the file's key.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `api_key`
pub const API_KEY_ENV: &str = "COURSELIST_API_KEY";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Shared key required on every API request
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Datastore backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// SQLite database file (default: "./courses.db")
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./courses.db")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
        }
    }
}

/// Console agent connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root (default: "http://localhost:5000/api/v1")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Extra PEM root certificate for HTTPS servers
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:5000/api/v1".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ca_cert: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (default: "warn")
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file directory; `null` logs to the console only
    #[serde(default = "default_log_directory")]
    pub directory: Option<PathBuf>,

    #[serde(default = "default_log_file")]
    pub file_name: String,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_log_directory() -> Option<PathBuf> {
    Some(PathBuf::from("./log"))
}

fn default_log_file() -> String {
    "logfile.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: default_log_directory(),
            file_name: default_log_file(),
        }
    }
}

impl Config {
    /// Load from `path`, apply the environment override, then validate
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = serde_json::from_str(&content)?;
        config.apply_env_override(std::env::var(API_KEY_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    fn apply_env_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "api_key is empty; set it in the file or via {}",
                API_KEY_ENV
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".into()));
        }

        if self.store.backend == StoreBackend::Sqlite && self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "store.path is required for the sqlite backend".into(),
            ));
        }

        if self.client.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("client.base_url is empty".into()));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid logging.level: '{}'",
                self.logging.level
            )));
        }

        if self.logging.file_name.is_empty() {
            return Err(ConfigError::Invalid("logging.file_name is empty".into()));
        }

        Ok(())
    }
}
