use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backoff::BackoffStrategy;
use crate::retry::{self, ConfigError};

/// Retry parameters as written in `config.toml` (`[retry]` section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Maximum number of attempts (including the first). Must be at least 1.
    pub attempts: u32,
    /// Base delay between attempts in milliseconds.
    pub delay_ms: u64,
    /// How the delay grows: "none", "attempt_multiple" or "fibonacci".
    pub backoff: BackoffStrategy,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: retry::DEFAULT_ATTEMPTS,
            delay_ms: retry::DEFAULT_DELAY.as_millis() as u64,
            backoff: BackoffStrategy::None,
        }
    }
}

impl RetrySettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Build an engine config with the default (always true) predicate.
    pub fn to_config<T>(&self) -> Result<retry::Config<T>, ConfigError> {
        Ok(retry::Config::new()
            .with_attempts(self.attempts)?
            .with_delay(self.delay())
            .with_backoff(self.backoff))
    }
}

/// Global configuration loaded from `~/.config/reattempt/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReattemptConfig {
    /// Optional retry section; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetrySettings>,
}

impl ReattemptConfig {
    pub fn retry_settings(&self) -> RetrySettings {
        self.retry.unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("reattempt")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ReattemptConfig> {
    let path = config_path()?;
    if !path.exists() {
        return write_default(&path);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<ReattemptConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ReattemptConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path) -> Result<ReattemptConfig> {
    let default_cfg = ReattemptConfig {
        retry: Some(RetrySettings::default()),
    };
    let toml = toml::to_string_pretty(&default_cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write config {}", path.display()))?;
    tracing::info!("created default config at {}", path.display());
    Ok(default_cfg)
}
