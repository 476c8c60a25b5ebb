use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, anyhow};

use crate::client::DEFAULT_BASE_URL;
use crate::persist::{HistoryFile, DEFAULT_HISTORY_FILE};
use crate::translation::Translation;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "VERSESEARCH_API_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub default_translation: Option<String>,
    pub timeout_secs: Option<u64>,
    pub history_file: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            default_translation: Some(Translation::default().as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config file {}: {}", config_path.display(), e))?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    /// Base URL of the verse API; the environment wins over the config file
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Configured translation, falling back to WEB for missing or unknown codes
    pub fn translation(&self) -> Translation {
        self.default_translation
            .as_deref()
            .and_then(Translation::from_str)
            .unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    pub fn history_file(&self) -> HistoryFile {
        HistoryFile::new(
            self.history_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE)),
        )
    }

    /// `<config dir>/versesearch/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("versesearch").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config, Config::new());
        assert_eq!(config.translation(), Translation::Web);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.history_file().path(), Path::new(DEFAULT_HISTORY_FILE));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_base_url: Some("http://localhost:8080".to_string()),
            default_translation: Some("kjv".to_string()),
            timeout_secs: Some(3),
            history_file: Some(dir.path().join("history.txt")),
            log_filter: Some("debug".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.translation(), Translation::Kjv);
        assert_eq!(loaded.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_file_uses_fallbacks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_translation": "niv", "timeout_secs": 0}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.translation(), Translation::Web);
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
