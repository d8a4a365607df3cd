//! Configuration management for co-apply

use crate::error::{CoApplyError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the achievement library and parsed jobs
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum relevance score for an achievement to count as relevant
    pub relevance_threshold: f64,
    /// How many matches to show in console output
    pub top_matches: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub color_output: bool,
    pub detailed: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("co-apply");

        Self {
            storage: StorageConfig { data_dir },
            matching: MatchingConfig {
                relevance_threshold: 0.3,
                top_matches: 10,
            },
            output: OutputConfig {
                color_output: true,
                detailed: false,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                CoApplyError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CoApplyError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("co-apply")
            .join("config.toml")
    }

    /// Path of the achievement library JSON file
    pub fn library_path(&self) -> PathBuf {
        self.storage.data_dir.join("achievements.json")
    }

    /// Path where a parsed job is stored
    pub fn job_path(&self, job_id: &str) -> PathBuf {
        self.storage.data_dir.join("jobs").join(format!("{}.json", job_id))
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(self.storage.data_dir.join("jobs"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.matching.relevance_threshold, 0.3);
        assert_eq!(config.matching.top_matches, 10);
        assert!(config.output.color_output);
    }

    #[test]
    fn test_job_path_layout() {
        let config = Config::default();
        let path = config.job_path("acme_123");
        assert!(path.ends_with("jobs/acme_123.json"));
    }
}
