use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_PAGE_SIZE;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Settings for the HTTP service (`referrals serve`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the service (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Static bearer token every request must present.
    #[serde(default = "default_token")]
    pub api_token: String,
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

/// Settings for the CLI when it talks to a running service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Token sent as `Authorization: Bearer <token>`.
    #[serde(default = "default_token")]
    pub bearer_token: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Rows per page when listing (default: 50).
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_token() -> String {
    "dev-token".to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data.sqlite")
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            api_token: default_token(),
            database_path: default_database_path(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bearer_token: default_token(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}
