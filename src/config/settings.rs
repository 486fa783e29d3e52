/// Configuration structures loaded from TOML

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::core::LOOKBACK_HOURS;

pub const DEFAULT_CONFIG_PATH: &str = "config/hype_meter.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
    /// Used when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_prefix: "hype-meter.log".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON snapshot loaded at startup; never written
    pub snapshot_path: Option<PathBuf>,
    /// Where the store is written on shutdown; unset disables saving
    pub save_path: Option<PathBuf>,
    pub retention_hours: i64,
    pub cleanup_interval_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            save_path: None,
            retention_hours: 48,
            cleanup_interval_secs: 300,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.bind_address.trim().is_empty() {
            bail!("server.bind_address must not be empty");
        }
        if self.logging.file_prefix.trim().is_empty() {
            bail!("logging.file_prefix must not be empty");
        }
        if self.store.retention_hours < LOOKBACK_HOURS {
            bail!(
                "store.retention_hours ({}) must cover the {}h lookback window",
                self.store.retention_hours,
                LOOKBACK_HOURS
            );
        }
        if let (Some(load), Some(save)) = (&self.store.snapshot_path, &self.store.save_path) {
            if load == save {
                bail!(
                    "store.save_path must differ from store.snapshot_path ({})",
                    load.display()
                );
            }
        }
        if self.store.cleanup_interval_secs == 0 {
            bail!("store.cleanup_interval_secs must be positive");
        }
        Ok(())
    }
}
