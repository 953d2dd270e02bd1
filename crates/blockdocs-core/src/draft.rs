// SPDX-License-Identifier: AGPL-3.0-or-later
//! Per-block draft text held while a block is being edited
//!
//! Drafts are view state: they are never part of a document and never
//! persisted. A draft is folded back into the block list on commit.

use std::collections::HashMap;

use crate::block::{Block, BlockId};
use crate::engine;

#[derive(Debug, Clone, Default)]
pub struct DraftBuffers {
    drafts: HashMap<BlockId, String>,
}

impl DraftBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing a block, seeding the draft with its current text
    pub fn begin(&mut self, block: &Block) {
        self.drafts.insert(block.id.clone(), block.text.clone());
    }

    /// Replace the draft text; ignored when no edit is in progress
    pub fn edit(&mut self, id: &BlockId, text: impl Into<String>) -> bool {
        match self.drafts.get_mut(id) {
            Some(draft) => {
                *draft = text.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &BlockId) -> Option<&str> {
        self.drafts.get(id).map(String::as_str)
    }

    pub fn is_editing(&self, id: &BlockId) -> bool {
        self.drafts.contains_key(id)
    }

    /// End the edit and write the draft into `blocks`
    ///
    /// Returns `None` when there was no draft for `id`.
    pub fn commit(&mut self, blocks: &[Block], id: &BlockId) -> Option<Vec<Block>> {
        let text = self.drafts.remove(id)?;
        Some(engine::update_content(blocks, id, &text))
    }

    /// End the edit without writing anything back
    pub fn discard(&mut self, id: &BlockId) {
        self.drafts.remove(id);
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
