// SPDX-License-Identifier: AGPL-3.0-or-later
//! Document store: owns the document collection and the active selection
//!
//! All changes to documents go through this type. Rejected requests
//! (unknown ids, empty titles, removing the last block) return `false` and
//! leave everything untouched. Accepted changes are saved through the
//! persistence collaborator; a failed save is logged and the in-memory
//! state stays authoritative.

use blockdocs_core::{
    engine, Block, BlockId, BlockKind, Document, DocumentId, ExportArtifact, ExportFormat,
    ExportSink,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::persistence::{slots, Persistence, PersistenceExt};
use crate::samples::welcome_documents;

/// Source of "now" for timestamps
pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct DocumentStore<P: Persistence> {
    documents: Vec<Document>,
    active_id: Option<DocumentId>,
    search_query: String,
    dark_mode: bool,
    persistence: P,
    clock: Clock,
}

impl<P: Persistence> DocumentStore<P> {
    /// An empty collection that saves through `persistence`
    pub fn new(persistence: P) -> Self {
        Self {
            documents: Vec::new(),
            active_id: None,
            search_query: String::new(),
            dark_mode: false,
            persistence,
            clock: Box::new(Utc::now),
        }
    }

    /// Start a session from whatever `persistence` holds
    ///
    /// Missing or unreadable slots fall back to defaults: the welcome
    /// documents (or nothing, when seeding is off), the first document as
    /// active, light mode.
    pub fn load(persistence: P, config: &StoreConfig) -> Self {
        let mut store = Self::new(persistence);
        let now = (store.clock)();

        let fallback = if config.seed_samples {
            welcome_documents(now)
        } else {
            Vec::new()
        };
        let documents: Vec<Document> = store.persistence.load_or(slots::DOCUMENTS, fallback);
        store.documents = sanitize(documents);

        let default_active = store.documents.first().map(|d| d.id.clone());
        let active: Option<DocumentId> = store
            .persistence
            .load_or(slots::ACTIVE_DOCUMENT_ID, default_active);
        store.active_id = active.filter(|id| store.get(id).is_some());

        store.dark_mode = store.persistence.load_or(slots::DARK_MODE, false);

        info!(
            documents = store.documents.len(),
            active = ?store.active_id,
            "loaded document store"
        );
        store
    }

    /// Replace the clock, mainly for tests
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// All documents, newest creations first
    pub fn list_all(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| &d.id == id)
    }

    /// Documents whose title, tags or block text contain `query`
    pub fn search(&self, query: &str) -> Vec<&Document> {
        self.documents.iter().filter(|d| d.matches(query)).collect()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Set the transient sidebar query; never persisted
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// The collection filtered by the current search query
    pub fn filtered(&self) -> Vec<&Document> {
        self.search(&self.search_query)
    }

    pub fn active_id(&self) -> Option<&DocumentId> {
        self.active_id.as_ref()
    }

    pub fn active(&self) -> Option<&Document> {
        self.active_id.as_ref().and_then(|id| self.get(id))
    }

    /// Create an untitled document, prepend it and make it active
    pub fn create(&mut self) -> &Document {
        let doc = Document::new((self.clock)());
        debug!(document = %doc.id, "created document");
        self.active_id = Some(doc.id.clone());
        self.documents.insert(0, doc);
        self.persist_documents();
        self.persist_active();
        &self.documents[0]
    }

    /// Make `id` the active document; unknown ids are ignored
    pub fn select(&mut self, id: &DocumentId) -> bool {
        if self.get(id).is_none() {
            debug!(document = %id, "ignoring select of unknown document");
            return false;
        }
        self.active_id = Some(id.clone());
        self.persist_active();
        true
    }

    /// Set a document's title; whitespace-only titles are rejected
    pub fn rename(&mut self, id: &DocumentId, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            warn!(document = %id, "rejected rename to empty title");
            return false;
        }
        let now = (self.clock)();
        let Some(doc) = self.document_mut(id) else {
            return false;
        };
        doc.title = title.to_string();
        doc.touch(now);
        debug!(document = %id, "renamed document");
        self.persist_documents();
        true
    }

    /// Remove a document from the collection
    ///
    /// Deleting the active document selects the new first document, or
    /// nothing when the collection is now empty.
    pub fn delete(&mut self, id: &DocumentId) -> bool {
        let Some(index) = self.documents.iter().position(|d| &d.id == id) else {
            return false;
        };
        self.documents.remove(index);
        debug!(document = %id, remaining = self.documents.len(), "deleted document");

        if self.active_id.as_ref() == Some(id) {
            self.active_id = self.documents.first().map(|d| d.id.clone());
        }
        self.persist_documents();
        self.persist_active();
        true
    }

    /// Replace a document's blocks; an empty block list is rejected
    pub fn replace_content(&mut self, id: &DocumentId, blocks: Vec<Block>) -> bool {
        if blocks.is_empty() {
            warn!(document = %id, "rejected empty block list");
            return false;
        }
        let now = (self.clock)();
        let Some(doc) = self.document_mut(id) else {
            return false;
        };
        doc.blocks = blocks;
        doc.touch(now);
        debug!(document = %id, blocks = doc.blocks.len(), "replaced content");
        self.persist_documents();
        true
    }

    /// Run a mutation-engine transform over a document's blocks and store the result
    pub fn edit<F>(&mut self, id: &DocumentId, transform: F) -> bool
    where
        F: FnOnce(&[Block]) -> Vec<Block>,
    {
        let Some(doc) = self.get(id) else {
            return false;
        };
        let blocks = transform(&doc.blocks);
        self.replace_content(id, blocks)
    }

    /// Delete one block, refusing to remove a document's last block
    pub fn delete_block(&mut self, id: &DocumentId, block_id: &BlockId) -> bool {
        let Some(doc) = self.get(id) else {
            return false;
        };
        if doc.blocks.len() <= 1 {
            warn!(document = %id, block = %block_id, "rejected deleting the last block");
            return false;
        }
        if doc.block(block_id).is_none() {
            return false;
        }
        let blocks = engine::delete_block(&doc.blocks, block_id);
        self.replace_content(id, blocks)
    }

    /// Append a tag; blank tags and exact duplicates are ignored
    pub fn add_tag(&mut self, id: &DocumentId, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        let now = (self.clock)();
        let Some(doc) = self.document_mut(id) else {
            return false;
        };
        if doc.has_tag(tag) {
            return false;
        }
        doc.tags.push(tag.to_string());
        doc.touch(now);
        debug!(document = %id, tag, "added tag");
        self.persist_documents();
        true
    }

    /// Remove a tag, matched after trimming; blank tags are ignored
    pub fn remove_tag(&mut self, id: &DocumentId, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        let now = (self.clock)();
        let Some(doc) = self.document_mut(id) else {
            return false;
        };
        let before = doc.tags.len();
        doc.tags.retain(|t| t != tag);
        if doc.tags.len() == before {
            return false;
        }
        doc.touch(now);
        debug!(document = %id, tag, "removed tag");
        self.persist_documents();
        true
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        debug!(enabled, "set dark mode");
        self.save_slot(slots::DARK_MODE, &enabled);
    }

    /// Build the export artifact for a document
    pub fn export(&self, id: &DocumentId, format: ExportFormat) -> Option<ExportArtifact> {
        self.get(id).map(|doc| ExportArtifact::build(doc, format))
    }

    /// Build the export artifact and hand it to `sink`
    ///
    /// Returns `Ok(false)` when the document does not exist.
    pub fn export_to<S: ExportSink>(
        &self,
        id: &DocumentId,
        format: ExportFormat,
        sink: &mut S,
    ) -> Result<bool, S::Error> {
        let Some(artifact) = self.export(id, format) else {
            return Ok(false);
        };
        sink.deliver(&artifact)?;
        Ok(true)
    }

    fn document_mut(&mut self, id: &DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| &d.id == id)
    }

    fn persist_documents(&mut self) {
        if let Err(e) = self.persistence.save_json(slots::DOCUMENTS, &self.documents) {
            warn!(slot = slots::DOCUMENTS, error = %e, "failed to save, keeping in-memory state");
        }
    }

    fn persist_active(&mut self) {
        let active = self.active_id.clone();
        self.save_slot(slots::ACTIVE_DOCUMENT_ID, &active);
    }

    fn save_slot<T: serde::Serialize>(&mut self, key: &str, value: &T) {
        if let Err(e) = self.persistence.save_json(key, value) {
            warn!(slot = key, error = %e, "failed to save, keeping in-memory state");
        }
    }
}

/// Drop duplicate ids and give block-less documents an empty paragraph
fn sanitize(documents: Vec<Document>) -> Vec<Document> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .filter_map(|mut doc| {
            if !seen.insert(doc.id.clone()) {
                warn!(document = %doc.id, "dropping document with duplicate id");
                return None;
            }
            if doc.blocks.is_empty() {
                warn!(document = %doc.id, "document had no blocks, adding an empty paragraph");
                doc.blocks.push(Block::new(BlockKind::Paragraph));
            }
            Some(doc)
        })
        .collect()
}
