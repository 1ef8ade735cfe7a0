//! CLI configuration.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use watcher_api::CorsConfig;
use watcher_observability::LoggingConfig;

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable overriding the data file location.
pub const DATA_FILE_ENV: &str = "WATCHER_DATA_FILE";

/// Watcher configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// HTTP listener configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Deal storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Browser origins admitted by the API.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WatcherConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Apply `PORT` and `WATCHER_DATA_FILE` from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV).filter(|v| !v.trim().is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value: {}", PORT_ENV, port))?;
        }

        if let Some(data_file) = lookup(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            self.storage.data_file = data_file;
        }

        Ok(())
    }

    /// The address the server binds.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address: {}:{}",
                    self.server.host, self.server.port
                )
            })
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0).
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind (default: 3001).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Deal storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the deal collection (default: data/deals.json).
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_data_file() -> String {
    "data/deals.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

/// Generate a default config file content.
pub fn generate_default_config() -> String {
    r#"# ASIN watcher configuration

[server]
host = "0.0.0.0"
port = 3001

[storage]
data_file = "data/deals.json"

[cors]
allowed_origins = ["http://localhost:3000", "http://localhost:5173"]
allow_browser_extensions = true

[logging]
# human or json
format = "human"
# Overridden by RUST_LOG when set
level = "info"
"#
    .to_string()
}
