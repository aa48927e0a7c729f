use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Environment variables that override file settings.
pub const ENV_API_TOKEN: &str = "API_TOKEN";
pub const ENV_DATABASE_PATH: &str = "DATABASE_PATH";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_BEARER_TOKEN: &str = "BEARER_TOKEN";

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/referrals/config.toml` on Unix/macOS, or the
    /// platform equivalent via `dirs::config_dir()`. Falls back to the
    /// current directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("referrals").join("config.toml")
    }

    /// Loads configuration from the default path, then applies environment
    /// overrides and validates.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - A missing file yields `Config::default()`.
    /// - Environment variables override file values.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_API_TOKEN) {
            self.server.api_token = token;
        }
        if let Some(path) = get(ENV_DATABASE_PATH) {
            self.server.database_path = PathBuf::from(path);
        }
        if let Some(addr) = get(ENV_BIND_ADDR) {
            self.server.bind_addr = addr;
        }
        if let Some(url) = get(ENV_API_BASE_URL) {
            self.client.base_url = url;
        }
        if let Some(token) = get(ENV_BEARER_TOKEN) {
            self.client.bearer_token = token;
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The server token is non-empty
    /// - The bind address parses as `host:port`
    /// - Client timeout and page size are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.api_token.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "server.api_token must not be empty".to_string(),
            });
        }

        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid bind address '{}'", self.server.bind_addr),
            });
        }

        if self.client.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "client.timeout_seconds must be greater than zero".to_string(),
            });
        }

        if self.client.page_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "client.page_size must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// The parsed bind address. Valid after [`Config::validate`].
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e| ConfigError::ValidationError {
                message: format!("Invalid bind address '{}': {}", self.server.bind_addr, e),
            })
    }
}
