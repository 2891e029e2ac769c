//! Configuration management for Dojo

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::quiz::Difficulty;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the tutor service
    pub service_url: String,

    /// Difficulty preselected in quiz setup
    pub default_difficulty: Difficulty,

    /// Question count preselected in quiz setup
    pub default_question_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:5000/api".to_string(),
            default_difficulty: Difficulty::Easy,
            default_question_count: 5,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "dojo").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "dojo").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_local_service() {
        let config = Config::default();
        assert_eq!(config.service_url, "http://localhost:5000/api");
        assert_eq!(config.default_question_count, 5);
    }

    #[test]
    fn config_serializes_to_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("localhost:5000"));
    }

    #[test]
    fn config_deserializes_from_json() {
        let json = r#"{
            "service_url": "https://tutor.example.com",
            "default_difficulty": "Hard",
            "default_question_count": 8
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.service_url, "https://tutor.example.com");
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert_eq!(config.default_question_count, 8);
    }
}
