// SPDX-License-Identifier: AGPL-3.0-or-later
//! Exporters for each supported format

pub mod markdown;
pub mod plaintext;

pub use markdown::{to_markdown, MarkdownRenderer};
pub use plaintext::{to_plain_text, PlainTextRenderer};

use crate::block::{Block, BlockKind};

/// Pair each block with its list number, if it is a numbered item
///
/// The counter restarts at 1 whenever the previous block was not a
/// numbered item, so a paragraph between two numbered items starts a new
/// list. There is no tracking of separate or nested lists.
pub(crate) fn numbered(blocks: &[Block]) -> impl Iterator<Item = (&Block, Option<u32>)> + '_ {
    let mut counter = 0u32;
    blocks.iter().map(move |block| {
        if block.kind == BlockKind::NumberItem {
            counter += 1;
            (block, Some(counter))
        } else {
            counter = 0;
            (block, None)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_restarts_after_other_block() {
        let blocks = vec![
            Block::with_text(BlockKind::NumberItem, "a"),
            Block::with_text(BlockKind::NumberItem, "b"),
            Block::with_text(BlockKind::Paragraph, "gap"),
            Block::with_text(BlockKind::NumberItem, "c"),
        ];
        let numbers: Vec<Option<u32>> = numbered(&blocks).map(|(_, n)| n).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), None, Some(1)]);
    }
}
