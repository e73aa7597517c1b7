//! Game configuration
//!
//! Read from a RON file (`notrouge.ron`, or the path in `NOTROUGE_CONFIG`).
//! Every field has a default, so a partial file is fine and a missing one
//! means "all defaults".

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::economy::DEFAULT_STOCK_SIZE;
use crate::save::default_save_path;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "notrouge.ron";
/// Environment variable overriding the config location
pub const CONFIG_ENV_VAR: &str = "NOTROUGE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Runtime settings. Game rules stay constants in their modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pipe-delimited item catalog
    pub items_path: PathBuf,
    /// Pipe-delimited enemy catalog
    pub enemies_path: PathBuf,
    /// Save file; platform data dir when unset
    pub save_path: Option<PathBuf>,
    /// Offers per shop visit
    pub shop_stock_size: usize,
    /// Pause between auto-attack ticks in the terminal front-end
    pub auto_attack_delay_ms: u64,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            items_path: PathBuf::from("assets/data/items.txt"),
            enemies_path: PathBuf::from("assets/data/enemies.txt"),
            save_path: None,
            shop_stock_size: DEFAULT_STOCK_SIZE,
            auto_attack_delay_ms: 100,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Where to look for the config file
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Parse a config from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Load `path`, falling back to defaults when it is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write this config as pretty RON
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Save file location after applying the default
    pub fn resolved_save_path(&self) -> PathBuf {
        self.save_path.clone().unwrap_or_else(default_save_path)
    }
}
