use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the platform data directory for the watchlist file.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_watchlist_file")]
    pub watchlist_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Artificial latency applied to every persistence call, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// JSON file replacing the built-in catalog dataset.
    #[serde(default)]
    pub catalog_seed: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a notification stays up before auto-dismiss, in milliseconds.
    #[serde(default = "default_dismiss_ms")]
    pub notification_dismiss_ms: u64,
}

fn default_watchlist_file() -> String {
    "mylist.json".to_string()
}

fn default_latency_ms() -> u64 {
    300
}

fn default_dismiss_ms() -> u64 {
    3000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            watchlist_file: default_watchlist_file(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            catalog_seed: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_dismiss_ms: default_dismiss_ms(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing config file means defaults; a present but broken one is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.storage.watchlist_file.is_empty() {
            return Err(anyhow::anyhow!("watchlist_file cannot be empty"));
        }
        if self.storage.watchlist_file.contains(std::path::MAIN_SEPARATOR) {
            return Err(anyhow::anyhow!(
                "watchlist_file must be a file name, not a path: {}",
                self.storage.watchlist_file
            ));
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.service.latency_ms)
    }

    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.ui.notification_dismiss_ms)
    }
}
