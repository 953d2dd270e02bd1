// SPDX-License-Identifier: AGPL-3.0-or-later
//! Persistence collaborator: a key-value store of named string slots
//!
//! The document store never touches a storage medium directly. It is handed
//! a [`Persistence`] implementation and calls `load` at session start and
//! `save` after each accepted mutation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::config::StoreConfig;

/// Slot names used by the store
pub mod slots {
    pub const DOCUMENTS: &str = "documents";
    pub const ACTIVE_DOCUMENT_ID: &str = "activeDocumentId";
    pub const DARK_MODE: &str = "darkModePreference";
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error on slot {slot}: {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error on slot {slot}: {source}")]
    Serialization {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Key-value storage medium keyed by slot name
pub trait Persistence {
    /// Read a slot; `Ok(None)` when it has never been written
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot, replacing any previous value
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Typed JSON helpers over any [`Persistence`]
pub trait PersistenceExt: Persistence {
    /// Read and decode a slot
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.load(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| PersistenceError::Serialization {
                    slot: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Read a slot, falling back to `default` when absent or unreadable
    ///
    /// Failures are logged and never propagated.
    fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.load_json(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!(slot = key, error = %e, "failed to load slot, using default");
                default
            }
        }
    }

    /// Encode and write a slot
    fn save_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|source| PersistenceError::Serialization {
            slot: key.to_string(),
            source,
        })?;
        self.save(key, &raw)
    }
}

impl<T: Persistence + ?Sized> PersistenceExt for T {}

/// In-memory slots, for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slots: HashMap<String, String>,
    failing: bool,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent load and save fail
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Raw slot contents
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.slots.insert(key.to_string(), value.into());
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self, key: &str) -> Result<Option<String>> {
        if self.failing {
            return Err(PersistenceError::Unavailable(format!("cannot read {}", key)));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        if self.failing {
            return Err(PersistenceError::Unavailable(format!("cannot write {}", key)));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per slot under a data directory
#[derive(Debug, Clone)]
pub struct FilePersistence {
    dir: PathBuf,
    prefix: String,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.data_dir, &config.key_prefix)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", self.prefix, key))
    }
}

impl Persistence for FilePersistence {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io {
                slot: key.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let io_err = |source| PersistenceError::Io {
            slot: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write beside the target and rename so a crash never leaves half a slot
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}
