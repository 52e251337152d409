//! Console configuration
//!
//! Loaded from a TOML file. Every section is optional:
//!
//! ```toml
//! [storage]
//! path = "/var/lib/visitor-console/session.db"
//!
//! [store]
//! seed = true
//! page_size = 10
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::store::DEFAULT_PAGE_SIZE;

/// File name of the session database inside the data directory
pub const SESSION_DB_FILE: &str = "session.db";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Where the persisted session lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Session database path; defaults to the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Shape of the in-memory data store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Load the demo datasets
    #[serde(default = "default_seed")]
    pub seed: bool,
    /// Default visitor page size; zero means the built-in default
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_seed() -> bool {
    true
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            page_size: default_page_size(),
        }
    }
}

impl ConsoleConfig {
    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolved session database path
    pub fn session_db_path(&self) -> Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(default_data_dir()?.join(SESSION_DB_FILE)),
        }
    }
}

/// Platform data directory for the console
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "onyx", "visitor-console").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })?;

    Ok(dirs.data_dir().to_path_buf())
}

/// Platform config file location
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "onyx", "visitor-console")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
