//! Application configuration.
//!
//! Loaded from `<config_dir>/study-buddy/config.toml` when present,
//! otherwise defaults are used. The API key can always be supplied via
//! the `OPENAI_API_KEY` environment variable, which wins over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::AiConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

fn default_top_k() -> usize {
    4
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Provider settings shared by the chat, embedding and moderation
    /// endpoints
    pub ai: AiConfig,
    /// Number of chunks retrieved as context per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Override for the vector index location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            top_k: default_top_k(),
            index_path: None,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when no
    /// file exists, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config = match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply environment variables on top of whatever was loaded.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.ai.api_key = Some(key);
            }
        }
        self
    }

    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("study-buddy").join("config.toml"))
    }

    pub fn default_index_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("study-buddy").join("index.sqlite3"))
    }

    /// The index location to use: explicit override, then config file,
    /// then the platform data directory.
    pub fn resolved_index_path(&self, override_path: Option<&Path>) -> Option<PathBuf> {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.index_path.clone())
            .or_else(Self::default_index_path)
    }
}
