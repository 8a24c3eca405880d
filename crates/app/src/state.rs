use std::{fs, path::PathBuf};

use common::ls::DEFAULT_CONCURRENCY;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "ufs";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const BLOCKS_DIR_NAME: &str = "blocks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the block store (defaults to <ufs dir>/blocks)
    #[serde(default)]
    pub blocks_path: Option<PathBuf>,
    /// Arguments, and children per directory, fetched at once while listing
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Default log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            blocks_path: None,
            concurrency: default_concurrency(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the ufs directory (~/.ufs)
    pub ufs_dir: PathBuf,
    /// Path to the block store
    pub blocks_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the ufs directory path (custom or default ~/.ufs)
    pub fn ufs_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new ufs state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let ufs_dir = Self::ufs_dir(custom_path)?;

        if ufs_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&ufs_dir)?;

        let config = config.unwrap_or_default();
        let blocks_path = Self::blocks_path(&ufs_dir, &config);
        fs::create_dir_all(&blocks_path)?;

        let config_path = ufs_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            ufs_dir,
            blocks_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the ufs directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let ufs_dir = Self::ufs_dir(custom_path)?;

        if !ufs_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = ufs_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;
        let blocks_path = Self::blocks_path(&ufs_dir, &config);

        Ok(Self {
            ufs_dir,
            blocks_path,
            config_path,
            config,
        })
    }

    fn blocks_path(ufs_dir: &std::path::Path, config: &AppConfig) -> PathBuf {
        config
            .blocks_path
            .clone()
            .unwrap_or_else(|| ufs_dir.join(BLOCKS_DIR_NAME))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("ufs directory not initialized. Run 'ufs init' first")]
    NotInitialized,

    #[error("ufs directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
