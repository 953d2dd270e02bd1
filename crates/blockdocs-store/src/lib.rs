// SPDX-License-Identifier: AGPL-3.0-or-later
//! Blockdocs Store - document collection, persistence and export delivery
//!
//! Provides:
//! - `DocumentStore`, the single owner of all documents and the active selection
//! - The persistence collaborator trait with in-memory and file-backed slots
//! - TOML store configuration
//! - A directory-backed export sink

pub mod config;
pub mod persistence;
pub mod samples;
pub mod sink;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use persistence::{
    slots, FilePersistence, MemoryPersistence, Persistence, PersistenceError, PersistenceExt,
};
pub use sink::{DirectorySink, SinkError};
pub use store::{Clock, DocumentStore};
