use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Player tuning
    #[serde(default)]
    pub player: PlayerConfig,
}

/// Playback tuning knobs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerConfig {
    // @field: Position polling cadence while playing, in milliseconds
    #[serde(default = "default_position_poll_interval_ms")]
    pub position_poll_interval_ms: u64,

    // @field: Buffered player events per subscriber
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl PlayerConfig {
    /// Polling cadence as a duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.position_poll_interval_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            position_poll_interval_ms: default_position_poll_interval_ms(),
            event_buffer: default_event_buffer(),
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: log crate level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_position_poll_interval_ms() -> u64 {
    500
}

fn default_event_buffer() -> usize {
    64
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
