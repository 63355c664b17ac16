mod file_config;

pub use file_config::{FileConfig, SyncConfig};

use std::time::Duration;

use anyhow::{bail, Result};

use crate::sync::SyncSettings;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub remote_url: Option<String>,
    pub username: Option<String>,
    pub poll_interval_ms: u64,
    pub remote_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub remote_url: String,
    pub username: String,
    pub poll_interval_ms: u64,
    pub remote_timeout_secs: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let remote_url = file
            .remote_url
            .or_else(|| cli.remote_url.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("remote_url must be specified via --remote-url or in config file")
            })?;
        if !remote_url.starts_with("http://") && !remote_url.starts_with("https://") {
            bail!("remote_url must be an http(s) URL: {}", remote_url);
        }
        let remote_url = remote_url.trim_end_matches('/').to_string();

        let username = file
            .username
            .or_else(|| cli.username.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("username must be specified via --username or in config file")
            })?;
        if username.trim().is_empty() {
            bail!("username must not be empty");
        }

        let sync_file = file.sync.unwrap_or_default();
        let poll_interval_ms = sync_file.poll_interval_ms.unwrap_or(cli.poll_interval_ms);
        if poll_interval_ms == 0 {
            bail!("poll interval must be greater than zero");
        }

        let remote_timeout_secs = file.remote_timeout_secs.unwrap_or(cli.remote_timeout_secs);
        if remote_timeout_secs == 0 {
            bail!("remote timeout must be greater than zero");
        }

        Ok(Self {
            remote_url,
            username,
            poll_interval_ms,
            remote_timeout_secs,
        })
    }

    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}
