use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::fetch::StrategyChoice;

pub const DEFAULT_FEED_URL: &str = "https://docs.house.gov/BillsThisWeek-RSS.xml";

/// Global configuration loaded from `~/.config/feedtail/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedtailConfig {
    /// Feed to inspect.
    pub url: String,
    /// Upper bound on tail bytes kept (and requested via `Range: bytes=-K`).
    pub max_tail_bytes: usize,
    /// Receive buffer size for the streaming strategy.
    pub chunk_size: usize,
    pub connect_timeout_secs: u64,
    /// Abort when no body byte arrives for this long (read stall).
    pub read_timeout_secs: u64,
    /// Hard cap on the whole transfer, so a stuck stream eventually fails.
    #[serde(default = "default_max_transfer_secs")]
    pub max_transfer_secs: u64,
    pub user_agent: String,
    /// Strategy: "auto" (default), "range", "range-compressed" or "stream".
    #[serde(default)]
    pub strategy: Option<StrategyChoice>,
    /// Characters of raw tail shown in the report.
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

fn default_snippet_chars() -> usize {
    1000
}

fn default_max_transfer_secs() -> u64 {
    3600
}

impl Default for FeedtailConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            max_tail_bytes: 15_000,
            chunk_size: 8 * 1024,
            connect_timeout_secs: 10,
            read_timeout_secs: 45,
            max_transfer_secs: default_max_transfer_secs(),
            user_agent: "Mozilla/5.0 (feedtail inspector)".to_string(),
            strategy: None,
            snippet_chars: default_snippet_chars(),
        }
    }
}

impl FeedtailConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn max_transfer(&self) -> Duration {
        Duration::from_secs(self.max_transfer_secs)
    }

    pub fn strategy(&self) -> StrategyChoice {
        self.strategy.unwrap_or_default()
    }

    /// Pretty TOML, as written by `load_or_init`.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values that would make a fetch meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.url).map_err(|e| ConfigError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        if self.max_tail_bytes == 0 {
            return Err(ConfigError::Zero { field: "max_tail_bytes" });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::Zero { field: "chunk_size" });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Zero { field: "connect_timeout_secs" });
        }
        if self.read_timeout_secs == 0 {
            return Err(ConfigError::Zero { field: "read_timeout_secs" });
        }
        if self.max_transfer_secs == 0 {
            return Err(ConfigError::Zero { field: "max_transfer_secs" });
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("feedtail")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FeedtailConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FeedtailConfig::default();
        let toml = default_cfg.to_toml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path (no default file is created).
pub fn load_from(path: &Path) -> Result<FeedtailConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FeedtailConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
