// SPDX-License-Identifier: AGPL-3.0-or-later
//! Block mutation engine
//!
//! Stateless transforms over a block list. Every function takes the current
//! list by reference and returns a new one; an unknown block id yields an
//! unchanged copy rather than an error.
//!
//! `delete_block` does not check the never-empty rule. Callers go through
//! the store (or [`backspace_on_empty`]), which refuses to remove the last
//! block.

use crate::block::{Block, BlockId, BlockKind, BlockMetadata};

/// Outcome of a line-submit (enter) event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub blocks: Vec<Block>,
    /// Block the editor surface should focus next
    pub focus: BlockId,
}

/// Outcome of a backspace on an empty block that was accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backspace {
    pub blocks: Vec<Block>,
    pub focus: Option<BlockId>,
}

pub fn find<'a>(blocks: &'a [Block], id: &BlockId) -> Option<&'a Block> {
    blocks.iter().find(|b| &b.id == id)
}

pub fn position(blocks: &[Block], id: &BlockId) -> Option<usize> {
    blocks.iter().position(|b| &b.id == id)
}

fn map_block(blocks: &[Block], id: &BlockId, f: impl FnOnce(&mut Block)) -> Vec<Block> {
    let mut out = blocks.to_vec();
    if let Some(block) = out.iter_mut().find(|b| &b.id == id) {
        f(block);
    }
    out
}

/// Replace the text of one block
pub fn update_content(blocks: &[Block], id: &BlockId, text: &str) -> Vec<Block> {
    map_block(blocks, id, |b| b.text = text.to_string())
}

/// Insert an empty block of `kind` right after `id`
///
/// Returns the new list and the id of the inserted block, or the unchanged
/// list and `None` when `id` is unknown.
pub fn split_after(blocks: &[Block], id: &BlockId, kind: BlockKind) -> (Vec<Block>, Option<BlockId>) {
    let Some(index) = position(blocks, id) else {
        return (blocks.to_vec(), None);
    };
    let block = Block::new(kind);
    let new_id = block.id.clone();
    let mut out = blocks.to_vec();
    out.insert(index + 1, block);
    (out, Some(new_id))
}

/// Append a newline to a code block; other kinds are left alone
pub fn append_newline(blocks: &[Block], id: &BlockId) -> Vec<Block> {
    map_block(blocks, id, |b| {
        if b.kind == BlockKind::Code {
            b.text.push('\n');
        }
    })
}

/// Remove a block, keeping the order of the rest
pub fn delete_block(blocks: &[Block], id: &BlockId) -> Vec<Block> {
    blocks.iter().filter(|b| &b.id != id).cloned().collect()
}

/// Change the kind of a block and reset its metadata for the new kind
pub fn retype(blocks: &[Block], id: &BlockId, kind: BlockKind) -> Vec<Block> {
    map_block(blocks, id, |b| {
        b.kind = kind;
        b.metadata = kind.initial_metadata();
    })
}

/// Flip the checked state of a checkbox item
pub fn toggle_checked(blocks: &[Block], id: &BlockId) -> Vec<Block> {
    map_block(blocks, id, |b| {
        if b.kind != BlockKind::CheckboxItem {
            return;
        }
        let checked = b.is_checked();
        b.metadata.get_or_insert_with(BlockMetadata::default).checked = Some(!checked);
    })
}

/// Set or clear the language of a code block
pub fn set_language(blocks: &[Block], id: &BlockId, language: &str) -> Vec<Block> {
    map_block(blocks, id, |b| {
        if b.kind != BlockKind::Code {
            return;
        }
        let language = language.trim();
        b.metadata = if language.is_empty() {
            None
        } else {
            Some(BlockMetadata {
                checked: None,
                language: Some(language.to_string()),
            })
        };
    })
}

/// Handle enter inside a block
///
/// Code blocks keep multi-line content, so they grow a newline; anything
/// else gets a fresh paragraph after it, which takes focus.
pub fn submit_line(blocks: &[Block], id: &BlockId) -> Option<Submit> {
    let block = find(blocks, id)?;
    if block.kind == BlockKind::Code {
        return Some(Submit {
            blocks: append_newline(blocks, id),
            focus: id.clone(),
        });
    }
    let (blocks, focus) = split_after(blocks, id, BlockKind::Paragraph);
    Some(Submit {
        blocks,
        focus: focus?,
    })
}

/// Block to focus once `id` is deleted from `blocks`
///
/// The preceding block, or the first remaining one when `id` was first.
pub fn focus_after_delete(blocks: &[Block], id: &BlockId) -> Option<BlockId> {
    let index = position(blocks, id)?;
    let remaining: Vec<&Block> = blocks.iter().filter(|b| &b.id != id).collect();
    remaining
        .get(index.saturating_sub(1))
        .map(|b| b.id.clone())
}

/// Handle backspace in an empty block
///
/// Only empty non-paragraph blocks are removed, and never the last block of
/// a document. Returns `None` when nothing should happen.
pub fn backspace_on_empty(blocks: &[Block], id: &BlockId) -> Option<Backspace> {
    let block = find(blocks, id)?;
    if !block.is_empty() || block.kind == BlockKind::Paragraph || blocks.len() <= 1 {
        return None;
    }
    Some(Backspace {
        focus: focus_after_delete(blocks, id),
        blocks: delete_block(blocks, id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Block> {
        vec![
            Block::with_text(BlockKind::Heading1, "Title").with_id("a"),
            Block::with_text(BlockKind::Paragraph, "Body").with_id("b"),
            Block::checkbox("Task", false).with_id("c"),
            Block::code("let x = 1;", Some("rust")).with_id("d"),
        ]
    }

    fn ids(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_update_content() {
        let blocks = sample();
        let out = update_content(&blocks, &"b".into(), "Changed");
        assert_eq!(out[1].text, "Changed");
        assert_eq!(out[1].kind, BlockKind::Paragraph);
        assert_eq!(blocks[1].text, "Body");
    }

    #[test]
    fn test_update_content_unknown_id() {
        let blocks = sample();
        assert_eq!(update_content(&blocks, &"zz".into(), "x"), blocks);
    }

    #[test]
    fn test_split_after_inserts_empty_block() {
        let blocks = sample();
        let (out, new_id) = split_after(&blocks, &"a".into(), BlockKind::Paragraph);
        let new_id = new_id.unwrap();
        assert_eq!(out.len(), 5);
        assert_eq!(out[1].id, new_id);
        assert!(out[1].is_empty());
        assert_eq!(out[1].kind, BlockKind::Paragraph);
        assert_eq!(out[2].id.as_str(), "b");
    }

    #[test]
    fn test_split_after_last() {
        let blocks = sample();
        let (out, new_id) = split_after(&blocks, &"d".into(), BlockKind::BulletItem);
        assert_eq!(out.last().map(|b| &b.id), new_id.as_ref());
        assert_eq!(out[4].kind, BlockKind::BulletItem);
    }

    #[test]
    fn test_split_after_unknown_id() {
        let blocks = sample();
        let (out, new_id) = split_after(&blocks, &"zz".into(), BlockKind::Paragraph);
        assert_eq!(out, blocks);
        assert!(new_id.is_none());
    }

    #[test]
    fn test_append_newline_code_only() {
        let blocks = sample();
        let out = append_newline(&blocks, &"d".into());
        assert_eq!(out[3].text, "let x = 1;\n");
        assert_eq!(out.len(), blocks.len());

        let out = append_newline(&blocks, &"b".into());
        assert_eq!(out, blocks);
    }

    #[test]
    fn test_delete_block_keeps_order() {
        let blocks = sample();
        let out = delete_block(&blocks, &"b".into());
        assert_eq!(ids(&out), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_retype_to_checkbox_resets_checked() {
        let blocks = vec![Block::checkbox("Done", true).with_id("x")];
        let out = retype(&blocks, &"x".into(), BlockKind::Paragraph);
        assert!(out[0].metadata.is_none());

        let out = retype(&out, &"x".into(), BlockKind::CheckboxItem);
        assert_eq!(out[0].metadata.as_ref().and_then(|m| m.checked), Some(false));
    }

    #[test]
    fn test_retype_clears_language() {
        let blocks = sample();
        let out = retype(&blocks, &"d".into(), BlockKind::Paragraph);
        assert_eq!(out[3].kind, BlockKind::Paragraph);
        assert!(out[3].metadata.is_none());
        assert_eq!(out[3].text, "let x = 1;");
    }

    #[test]
    fn test_toggle_checked() {
        let blocks = sample();
        let out = toggle_checked(&blocks, &"c".into());
        assert!(out[2].is_checked());
        let out = toggle_checked(&out, &"c".into());
        assert!(!out[2].is_checked());
    }

    #[test]
    fn test_toggle_checked_without_metadata() {
        let mut block = Block::new(BlockKind::CheckboxItem).with_id("c");
        block.metadata = None;
        let out = toggle_checked(&[block], &"c".into());
        assert!(out[0].is_checked());
    }

    #[test]
    fn test_toggle_checked_other_kinds() {
        let blocks = sample();
        assert_eq!(toggle_checked(&blocks, &"b".into()), blocks);
    }

    #[test]
    fn test_set_language() {
        let blocks = sample();
        let out = set_language(&blocks, &"d".into(), " python ");
        assert_eq!(out[3].language(), Some("python"));
        let out = set_language(&out, &"d".into(), "");
        assert_eq!(out[3].language(), None);
        assert_eq!(set_language(&blocks, &"b".into(), "rust"), blocks);
    }

    #[test]
    fn test_submit_line_splits_non_code() {
        let blocks = sample();
        let submit = submit_line(&blocks, &"a".into()).unwrap();
        assert_eq!(submit.blocks.len(), 5);
        assert_eq!(submit.blocks[1].id, submit.focus);
        assert_eq!(submit.blocks[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_submit_line_in_code_appends_newline() {
        let blocks = sample();
        let submit = submit_line(&blocks, &"d".into()).unwrap();
        assert_eq!(submit.blocks.len(), 4);
        assert_eq!(submit.focus.as_str(), "d");
        assert_eq!(submit.blocks[3].text, "let x = 1;\n");
    }

    #[test]
    fn test_submit_line_unknown_id() {
        assert!(submit_line(&sample(), &"zz".into()).is_none());
    }

    #[test]
    fn test_focus_after_delete() {
        let blocks = sample();
        assert_eq!(focus_after_delete(&blocks, &"c".into()), Some("b".into()));
        assert_eq!(focus_after_delete(&blocks, &"a".into()), Some("b".into()));
        assert_eq!(focus_after_delete(&blocks, &"zz".into()), None);

        let single = vec![Block::new(BlockKind::Heading1).with_id("only")];
        assert_eq!(focus_after_delete(&single, &"only".into()), None);
    }

    #[test]
    fn test_backspace_deletes_empty_non_paragraph() {
        let blocks = vec![
            Block::with_text(BlockKind::Paragraph, "Body").with_id("a"),
            Block::new(BlockKind::BulletItem).with_id("b"),
        ];
        let out = backspace_on_empty(&blocks, &"b".into()).unwrap();
        assert_eq!(ids(&out.blocks), vec!["a"]);
        assert_eq!(out.focus, Some("a".into()));
    }

    #[test]
    fn test_backspace_keeps_empty_paragraph() {
        let blocks = vec![
            Block::with_text(BlockKind::Heading1, "T").with_id("a"),
            Block::new(BlockKind::Paragraph).with_id("b"),
        ];
        assert!(backspace_on_empty(&blocks, &"b".into()).is_none());
    }

    #[test]
    fn test_backspace_keeps_non_empty_block() {
        assert!(backspace_on_empty(&sample(), &"a".into()).is_none());
    }

    #[test]
    fn test_backspace_keeps_last_block() {
        let blocks = vec![Block::new(BlockKind::Heading2).with_id("a")];
        assert!(backspace_on_empty(&blocks, &"a".into()).is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn kind_strategy() -> impl Strategy<Value = BlockKind> {
        prop::sample::select(BlockKind::ALL.to_vec())
    }

    fn block_strategy() -> impl Strategy<Value = Block> {
        (kind_strategy(), "[a-z ]{0,12}", proptest::bool::ANY).prop_map(|(kind, text, checked)| {
            let mut block = Block::with_text(kind, text);
            if kind == BlockKind::CheckboxItem {
                block = Block::checkbox(block.text, checked);
            }
            block
        })
    }

    // Non-empty block list plus an index into it
    fn blocks_and_index() -> impl Strategy<Value = (Vec<Block>, usize)> {
        prop::collection::vec(block_strategy(), 1..10)
            .prop_flat_map(|blocks| {
                let len = blocks.len();
                (Just(blocks), 0..len)
            })
    }

    proptest! {
        // Property: toggling twice restores checkbox state, other kinds untouched
        #[test]
        fn prop_toggle_checked_involution((blocks, index) in blocks_and_index()) {
            let id = blocks[index].id.clone();
            let once = toggle_checked(&blocks, &id);
            let twice = toggle_checked(&once, &id);
            prop_assert_eq!(twice[index].is_checked(), blocks[index].is_checked());
            if blocks[index].kind == BlockKind::CheckboxItem {
                prop_assert_ne!(once[index].is_checked(), blocks[index].is_checked());
            } else {
                prop_assert_eq!(&once, &blocks);
            }
        }

        // Property: deleting shrinks the list by one and keeps relative order
        #[test]
        fn prop_delete_block_preserves_order((blocks, index) in blocks_and_index()) {
            let id = blocks[index].id.clone();
            let out = delete_block(&blocks, &id);
            prop_assert_eq!(out.len(), blocks.len() - 1);
            let expected: Vec<Block> = blocks
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, b)| b.clone())
                .collect();
            prop_assert_eq!(out, expected);
        }

        // Property: retyping to checkbox always yields unchecked
        #[test]
        fn prop_retype_checkbox_unchecked((blocks, index) in blocks_and_index()) {
            let id = blocks[index].id.clone();
            let out = retype(&blocks, &id, BlockKind::CheckboxItem);
            prop_assert_eq!(out[index].kind, BlockKind::CheckboxItem);
            prop_assert_eq!(
                out[index].metadata.as_ref().and_then(|m| m.checked),
                Some(false)
            );
        }

        // Property: split keeps every original block and adds exactly one
        #[test]
        fn prop_split_after_adds_one((blocks, index) in blocks_and_index(), kind in kind_strategy()) {
            let id = blocks[index].id.clone();
            let (out, new_id) = split_after(&blocks, &id, kind);
            let new_id = new_id.expect("known id");
            prop_assert_eq!(out.len(), blocks.len() + 1);
            prop_assert_eq!(&out[index + 1].id, &new_id);
            prop_assert_eq!(delete_block(&out, &new_id), blocks);
        }

        // Property: the input list is never modified
        #[test]
        fn prop_transforms_leave_input((blocks, index) in blocks_and_index()) {
            let before = blocks.clone();
            let id = blocks[index].id.clone();
            let _ = update_content(&blocks, &id, "changed");
            let _ = retype(&blocks, &id, BlockKind::Code);
            let _ = append_newline(&blocks, &id);
            let _ = toggle_checked(&blocks, &id);
            prop_assert_eq!(blocks, before);
        }
    }
}
