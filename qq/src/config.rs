//! QueueQuest configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::live::LiveConfig;
use crate::oracle::OracleConfig;
use crate::planner::PlannerConfig;
use crate::transit::TransitConfig;
use crate::weather::WeatherConfig;

/// Main QueueQuest configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Venue catalog source
    pub catalog: CatalogConfig,

    /// Live queue feed
    pub live: LiveConfig,

    /// Walking model
    pub transit: TransitConfig,

    /// Wait forecasts
    pub oracle: OracleConfig,

    /// Cost weights and thresholds
    pub planner: PlannerConfig,

    /// Daily weather forecasts
    pub weather: WeatherConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: ./queuequest.yml
        let local_config = PathBuf::from("queuequest.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/queuequest/queuequest.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("queuequest").join("queuequest.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Where venue data comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// YAML or JSON catalog file; the built-in catalog is used when unset
    pub path: Option<PathBuf>,
}
