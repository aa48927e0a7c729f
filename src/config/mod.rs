//! Configuration: TOML file under the user config dir, environment
//! overrides, validation.

mod loader;
mod types;

pub use loader::{
    ConfigError, ENV_API_BASE_URL, ENV_API_TOKEN, ENV_BEARER_TOKEN, ENV_BIND_ADDR,
    ENV_DATABASE_PATH,
};
pub use types::{ClientConfig, Config, ServerConfig};
