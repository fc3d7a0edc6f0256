//! Configuration management for Flood Guard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with FLOODGUARD_ prefix

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use config::{Environment, File};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// en-US `toLocaleString` layout, e.g. `1/12/2026, 1:35:43 PM`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Main configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Key-value store configuration
    pub storage: StorageConfig,

    /// Event history configuration
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key (native front-ends only)
    pub data_dir: PathBuf,

    /// Slot holding the event history
    pub history_key: String,

    /// Slot holding the volunteer list
    pub volunteers_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Oldest entries are evicted beyond this many; unbounded when unset
    pub max_entries: Option<usize>,

    /// chrono format string for entry timestamps
    pub timestamp_format: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> CoreResult<Self> {
        let environment =
            std::env::var("FLOODGUARD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("storage.data_dir", ".floodguard")?
            .set_default("storage.history_key", "history")?
            .set_default("storage.volunteers_key", "volunteers")?
            .set_default("history.timestamp_format", DEFAULT_TIMESTAMP_FORMAT)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FLOODGUARD_ prefix)
            .add_source(
                Environment::with_prefix("FLOODGUARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.storage.history_key.trim().is_empty() {
            return Err(CoreError::Configuration(
                "storage.history_key must not be empty".into(),
            ));
        }
        if self.storage.volunteers_key.trim().is_empty() {
            return Err(CoreError::Configuration(
                "storage.volunteers_key must not be empty".into(),
            ));
        }
        if self.storage.history_key == self.storage.volunteers_key {
            return Err(CoreError::Configuration(
                "history and volunteers must use different storage keys".into(),
            ));
        }
        if StrftimeItems::new(&self.history.timestamp_format).any(|item| item == Item::Error) {
            return Err(CoreError::Configuration(format!(
                "history.timestamp_format is not a valid format: {}",
                self.history.timestamp_format
            )));
        }
        if self.history.max_entries == Some(0) {
            return Err(CoreError::Configuration(
                "history.max_entries must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            storage: StorageConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".floodguard"),
            history_key: "history".to_string(),
            volunteers_key: "volunteers".to_string(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}
