//! Catalog file locations, optionally read from `movie-catalog.toml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::Result;

/// Name of the optional config file, looked up in the working directory
pub const CONFIG_FILE: &str = "movie-catalog.toml";

/// File locations the catalog works with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub database_path: PathBuf,
    pub import_path: PathBuf,
    pub export_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("movies.db"),
            import_path: PathBuf::from("movies.json"),
            export_path: PathBuf::from("exported.json"),
        }
    }
}

impl CatalogConfig {
    /// Load the config file at `path`, falling back to the defaults when
    /// it does not exist. Keys left out keep their default value.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using default paths", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Create the directory the database file lives in, if it is missing
    pub fn prepare_database_dir(&self) -> Result<()> {
        match self.database_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                tracing::info!("Creating {}", dir.display());
                std::fs::create_dir_all(dir)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
