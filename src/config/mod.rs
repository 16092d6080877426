//! User preferences persisted next to the ledger data.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    currency::AmountLocale, errors::ConfigError, storage::DEFAULT_STORAGE_KEY,
    utils::write_atomic,
};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub decimal_separator: AmountLocale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional directory for the transaction store. Defaults to `<home>/data`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: Self::default_storage_key(),
            decimal_separator: AmountLocale::default(),
            data_dir: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_storage_key() -> String {
        DEFAULT_STORAGE_KEY.into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self, home: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| home.join(DATA_DIR))
    }
}

/// Loads and saves [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: &Path) -> Self {
        Self::new(base.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns defaults when no file has been written yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.config_path, &json)?;
        Ok(())
    }
}
