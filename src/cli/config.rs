// ABOUTME: Configuration management for the elementals application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::FUNCTIONS_FILE_ENV;
use crate::template::MissingPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit configFunctions.yaml; discovered when unset.
    pub functions_file: Option<PathBuf>,

    /// Policy used by `render` when no `--on-missing` is given.
    pub on_missing: MissingPolicy,

    pub flatten_records: bool,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            functions_file: None,
            on_missing: MissingPolicy::None,
            flatten_records: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Config::default()
        };

        // Merge with environment variables
        config.merge_env()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("elementals.yaml"),
            PathBuf::from("elementals.yml"),
            PathBuf::from(".elementals.yaml"),
            PathBuf::from(".elementals.yml"),
        ];

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".elementals").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("elementals.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        // Logging configuration
        if let Ok(level) = std::env::var("ELEMENTALS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ELEMENTALS_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Ok(path) = std::env::var(FUNCTIONS_FILE_ENV) {
            self.functions_file = Some(PathBuf::from(path));
        }
        if let Ok(policy) = std::env::var("ELEMENTALS_ON_MISSING") {
            self.on_missing = policy.parse()?;
        }

        Ok(())
    }
}
