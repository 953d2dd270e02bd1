// SPDX-License-Identifier: AGPL-3.0-or-later
//! Store configuration, read from TOML

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one JSON file per persisted slot
    pub data_dir: PathBuf,
    /// Prepended to every slot name
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Seed the welcome documents when nothing has been saved yet
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
}

fn default_key_prefix() -> String {
    "blockdocs-".to_string()
}

fn default_seed_samples() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("blockdocs-data"),
            key_prefix: default_key_prefix(),
            seed_samples: default_seed_samples(),
        }
    }
}

impl StoreConfig {
    /// Load from a TOML file; `Ok(None)` when the file does not exist
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }
}
