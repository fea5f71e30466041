//! Configuration module for Wren

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::x::DEFAULT_API_BASE;
use crate::paths;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme
    #[serde(default)]
    pub theme: Theme,

    /// Seconds the success/failure message stays before the draft is cleared
    #[serde(default = "default_feedback_delay")]
    pub feedback_delay_secs: u64,

    /// Clear the draft after a failed post too (otherwise keep it for resubmission)
    #[serde(default = "default_clear_draft_on_failure")]
    pub clear_draft_on_failure: bool,

    /// X API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_feedback_delay() -> u64 {
    5
}

fn default_clear_draft_on_failure() -> bool {
    true
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            feedback_delay_secs: default_feedback_delay(),
            clear_draft_on_failure: default_clear_draft_on_failure(),
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub const fn feedback_delay(&self) -> Duration {
        Duration::from_secs(self.feedback_delay_secs)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
