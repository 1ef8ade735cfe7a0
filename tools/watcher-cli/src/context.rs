//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use watcher_store::FileStore;

use crate::config::WatcherConfig;
use crate::output::Output;

/// Config file names searched for, nearest directory first.
const CONFIG_NAMES: [&str; 3] = ["watcher.toml", ".watcher.toml", "watcher.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Watcher configuration, with environment overrides applied.
    pub config: WatcherConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = if let Some(path) = config_path {
            WatcherConfig::load(path)?
        } else {
            find_config(&cwd).unwrap_or_default()
        };
        config.apply_env()?;

        Ok(Self { config, output, cwd })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// The file store named by the configuration.
    pub fn file_store(&self) -> FileStore {
        self.store_at(&self.config.storage.data_file)
    }

    /// A file store at `data_file`, resolved against the working directory.
    pub fn store_at(&self, data_file: &str) -> FileStore {
        FileStore::new(self.resolve_path(data_file))
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<WatcherConfig> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = WatcherConfig::load(config_path.to_str()?) {
                    return Some(config);
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}
