//! Global configuration (`~/.config/pget/config.toml`).

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::download::TransferOptions;
use crate::pipeline::DEFAULT_WORKERS;

fn default_threads() -> usize {
    DEFAULT_WORKERS
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> u32 {
    10
}

/// Defaults apply per field, so a partial file overrides only what it names.
#[derive(Debug, Clone, Deserialize)]
pub struct PgetConfig {
    /// Batch workers when `--threads` is not given.
    #[serde(default = "default_threads")]
    pub default_threads: usize,
    /// Connection establishment timeout in seconds; 0 disables it.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Redirect-follow cap for batch downloads.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
}

impl Default for PgetConfig {
    fn default() -> Self {
        Self {
            default_threads: default_threads(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl PgetConfig {
    /// Transfer knobs for the batch pipeline.
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            connect_timeout: if self.connect_timeout_secs > 0 {
                Some(Duration::from_secs(self.connect_timeout_secs))
            } else {
                None
            },
            max_redirects: self.max_redirects,
        }
    }
}

/// Path of the user config file, whether or not it exists.
pub fn config_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("pget")?;
    Ok(dirs.get_config_home().join("config.toml"))
}

/// Loads the config file when present, defaults otherwise. Never writes;
/// runs leave no state behind.
pub fn load() -> Result<PgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(PgetConfig::default());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    let config = toml::from_str(&raw)
        .with_context(|| format!("cannot parse config {}", path.display()))?;
    Ok(config)
}
