//! # Storage Configuration
//!
//! Where the state lives and which backends are active.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VYAPAR_DATA_DIR=/srv/vyapar                                        │
//! │     VYAPAR_DESKTOP_FOLDER=true                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vyapar-flow/storage.toml (Linux)                         │
//! │     ~/Library/Application Support/com.vyapar.flow/storage.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir, key "vyapar_flow_db_v1", desktop folder off     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storage.toml
//! data_dir = "/home/shop/.local/share/vyapar-flow"
//! storage_key = "vyapar_flow_db_v1"
//! data_file_name = "vyapar_data.json"
//! desktop_folder = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};

/// Key the state is stored under in the local store.
pub const DEFAULT_STORAGE_KEY: &str = "vyapar_flow_db_v1";

/// File written into the user's data folder on every save.
pub const DEFAULT_DATA_FILE_NAME: &str = "vyapar_data.json";

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory backing the local key-value store.
    pub data_dir: PathBuf,

    /// Key for the state payload.
    pub storage_key: String,

    /// File name used inside `settings.dataFolderPath`.
    pub data_file_name: String,

    /// Whether the data folder capability is available.
    ///
    /// Off by default, matching the browser build where only the local
    /// store exists.
    pub desktop_folder: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: Self::default_data_dir().unwrap_or_else(|| PathBuf::from(".vyapar")),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_file_name: DEFAULT_DATA_FILE_NAME.to_string(),
            desktop_folder: false,
        }
    }
}

impl StorageConfig {
    /// Config rooted at an explicit directory (tests, portable installs).
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Enables or disables the data folder backend.
    pub fn with_desktop_folder(mut self, enabled: bool) -> Self {
        self.desktop_folder = enabled;
        self
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storage.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StorageResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storage config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storage config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StorageResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StorageError::NoLocation("no config directory".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storage config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StorageResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(StorageError::InvalidConfig(
                "storage_key must not be empty".into(),
            ));
        }

        let name = self.data_file_name.trim();
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(StorageError::InvalidConfig(format!(
                "data_file_name must be a plain file name, got: {:?}",
                self.data_file_name
            )));
        }

        Ok(())
    }

    /// Applies `VYAPAR_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("VYAPAR_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = lookup("VYAPAR_STORAGE_KEY") {
            self.storage_key = key;
        }

        if let Some(name) = lookup("VYAPAR_DATA_FILE") {
            self.data_file_name = name;
        }

        if let Some(flag) = lookup("VYAPAR_DESKTOP_FOLDER") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.desktop_folder = true,
                "0" | "false" | "no" | "off" => self.desktop_folder = false,
                _ => warn!(value = %flag, "Unknown VYAPAR_DESKTOP_FOLDER value"),
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "vyapar", "flow")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("storage.toml"))
    }

    fn default_data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }
}
