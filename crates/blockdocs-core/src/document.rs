// SPDX-License-Identifier: AGPL-3.0-or-later
//! Document model: an ordered block list plus title, tags and timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::block::{Block, BlockId, BlockKind};

/// Title given to freshly created documents
pub const DEFAULT_TITLE: &str = "Untitled Document";

/// Unique document identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A titled, tagged, ordered sequence of blocks
///
/// Block order is the render and export order. `created_at` is fixed at
/// creation; `updated_at` moves on every content, title or tag change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    #[serde(alias = "content")]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a new untitled document holding a single empty paragraph
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: DocumentId::generate(),
            title: DEFAULT_TITLE.to_string(),
            blocks: vec![Block::new(BlockKind::Paragraph)],
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the modification timestamp
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Whether `tag` is already present (exact, case-sensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match against title, tags and block text
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            || self
                .blocks
                .iter()
                .any(|b| b.text.to_lowercase().contains(&needle))
    }

    /// Count words in the document body
    pub fn word_count(&self) -> usize {
        self.blocks.iter().map(Block::word_count).sum()
    }

    /// Count characters in the document body
    pub fn char_count(&self) -> usize {
        self.blocks.iter().map(Block::char_count).sum()
    }
}
