// User configuration loaded from ~/.config/playlist-queue/config.toml.
// Falls back to sensible defaults when the file is missing.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration, deserialized from `~/.config/playlist-queue/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// `EnvFilter` directive for the log file (default: `playlist_queue=debug`).
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "playlist_queue=debug".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// How queue events and query results are written to stdout.
    #[serde(default)]
    pub format: EventFormat,
    /// Print queue events as they fire (default: true).
    #[serde(default = "default_echo")]
    pub echo: bool,
}

fn default_echo() -> bool {
    true
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            format: EventFormat::default(),
            echo: default_echo(),
        }
    }
}

impl Config {
    /// Read config from disk, or return defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("playlist-queue")
            .join("config.toml")
    }
}
