//! Configuration management for pipeplay
//!
//! Handles config file loading and the defaults the player falls
//! back to. Config is stored at ~/.config/pipeplay/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::stream::{PlayerSpec, PlayerType};

/// URL played when neither the command line nor the config names one
pub const DEFAULT_URL: &str = "http://localhost:8080/mp3/test.mp3";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// URL of the MP3 to stream
    pub url: Option<String>,
    /// Built-in player preset
    pub player: Option<PlayerType>,
    /// Custom player executable (overrides `player`)
    pub player_command: Option<String>,
    /// Player arguments (override the preset's stdin flags)
    pub player_args: Option<Vec<String>>,
    /// Give up after this many seconds
    pub timeout_secs: Option<u64>,
    /// Stream non-2xx responses instead of failing
    pub allow_error_status: Option<bool>,
}

impl Config {
    /// Get config file path (~/.config/pipeplay/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pipeplay").join("config.toml"))
    }

    /// Load config from the default path, or return default if missing or unreadable
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path. Errors if it can't be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Player described by this config, falling back to the default preset
    pub fn player_spec(&self) -> PlayerSpec {
        let spec = match &self.player_command {
            Some(cmd) => PlayerSpec::custom(cmd.clone(), Vec::new()),
            None => PlayerSpec::preset(self.player.unwrap_or_default()),
        };
        match &self.player_args {
            Some(args) => spec.with_args(args.clone()),
            None => spec,
        }
    }
}

/// Fully resolved settings for one play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaySettings {
    pub url: String,
    pub player: PlayerSpec,
    pub timeout: Option<Duration>,
    pub allow_error_status: bool,
}

impl From<&Config> for PlaySettings {
    fn from(config: &Config) -> Self {
        Self {
            url: config.url.clone().unwrap_or_else(|| DEFAULT_URL.to_string()),
            player: config.player_spec(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            allow_error_status: config.allow_error_status.unwrap_or(false),
        }
    }
}
