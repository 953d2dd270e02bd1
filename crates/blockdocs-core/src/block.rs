// SPDX-License-Identifier: AGPL-3.0-or-later
//! Block model: the typed unit of document content
//!
//! A block is one line-level element of a document (heading, paragraph,
//! list item, checkbox, code). Its `text` never carries structural markup;
//! the kind alone decides how it is rendered or exported.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::traits::ParseError;

/// Opaque block identifier, stable for the block's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Discriminant of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    #[serde(alias = "bulletList")]
    BulletItem,
    #[serde(alias = "numberList")]
    NumberItem,
    #[serde(alias = "checkbox")]
    CheckboxItem,
    Code,
}

impl BlockKind {
    /// All kinds in toolbar order
    pub const ALL: [Self; 8] = [
        Self::Paragraph,
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::BulletItem,
        Self::NumberItem,
        Self::CheckboxItem,
        Self::Code,
    ];

    /// Wire name, as used in persisted documents
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading1",
            Self::Heading2 => "heading2",
            Self::Heading3 => "heading3",
            Self::BulletItem => "bulletItem",
            Self::NumberItem => "numberItem",
            Self::CheckboxItem => "checkboxItem",
            Self::Code => "code",
        }
    }

    /// Short display name
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Paragraph => "Text",
            Self::Heading1 => "Heading 1",
            Self::Heading2 => "Heading 2",
            Self::Heading3 => "Heading 3",
            Self::BulletItem => "Bulleted list",
            Self::NumberItem => "Numbered list",
            Self::CheckboxItem => "To-do list",
            Self::Code => "Code",
        }
    }

    /// Hint shown by an editor surface while the block is empty
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Paragraph => "Type something...",
            Self::Heading1 => "Heading 1",
            Self::Heading2 => "Heading 2",
            Self::Heading3 => "Heading 3",
            Self::BulletItem => "Bullet point",
            Self::NumberItem => "Numbered item",
            Self::CheckboxItem => "To-do item",
            Self::Code => "Enter code here...",
        }
    }

    /// Metadata a freshly created or retyped block of this kind starts with
    pub fn initial_metadata(&self) -> Option<BlockMetadata> {
        match self {
            Self::CheckboxItem => Some(BlockMetadata {
                checked: Some(false),
                language: None,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(Self::Paragraph),
            "heading1" => Ok(Self::Heading1),
            "heading2" => Ok(Self::Heading2),
            "heading3" => Ok(Self::Heading3),
            "bulletItem" | "bulletList" => Ok(Self::BulletItem),
            "numberItem" | "numberList" => Ok(Self::NumberItem),
            "checkboxItem" | "checkbox" => Ok(Self::CheckboxItem),
            "code" => Ok(Self::Code),
            other => Err(ParseError::UnknownKind(other.to_string())),
        }
    }
}

/// Kind-dependent block metadata
///
/// `checked` is only meaningful on checkbox items and `language` only on
/// code blocks. An absent `checked` reads as unchecked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// A single content unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(alias = "type")]
    pub kind: BlockKind,
    #[serde(alias = "content")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BlockMetadata>,
}

impl Block {
    /// Create an empty block of `kind` with a fresh id
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: BlockId::generate(),
            kind,
            text: String::new(),
            metadata: kind.initial_metadata(),
        }
    }

    pub fn with_text(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(kind)
        }
    }

    /// Checkbox item with an explicit state
    pub fn checkbox(text: impl Into<String>, checked: bool) -> Self {
        Self {
            metadata: Some(BlockMetadata {
                checked: Some(checked),
                language: None,
            }),
            ..Self::with_text(BlockKind::CheckboxItem, text)
        }
    }

    /// Code block, optionally tagged with a language
    pub fn code(text: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            metadata: language.map(|lang| BlockMetadata {
                checked: None,
                language: Some(lang.to_string()),
            }),
            ..Self::with_text(BlockKind::Code, text)
        }
    }

    /// Replace the generated id, mostly for fixtures and seeded content
    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = id.into();
        self
    }

    /// Checked state; false for anything that is not a checked checkbox item
    pub fn is_checked(&self) -> bool {
        self.kind == BlockKind::CheckboxItem
            && self
                .metadata
                .as_ref()
                .and_then(|m| m.checked)
                .unwrap_or(false)
    }

    /// Code language, if this is a code block that has one
    pub fn language(&self) -> Option<&str> {
        if self.kind != BlockKind::Code {
            return None;
        }
        self.metadata.as_ref().and_then(|m| m.language.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Length of `text` in UTF-16 code units, the unit the web editor measures
/// titles and headings in
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_is_empty() {
        let block = Block::new(BlockKind::Heading2);
        assert!(block.is_empty());
        assert_eq!(block.kind, BlockKind::Heading2);
        assert!(block.metadata.is_none());
    }

    #[test]
    fn test_new_checkbox_starts_unchecked() {
        let block = Block::new(BlockKind::CheckboxItem);
        assert_eq!(block.metadata.as_ref().and_then(|m| m.checked), Some(false));
        assert!(!block.is_checked());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Block::new(BlockKind::Paragraph);
        let b = Block::new(BlockKind::Paragraph);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_checked_is_ignored_outside_checkbox() {
        let mut block = Block::checkbox("done", true);
        assert!(block.is_checked());
        block.kind = BlockKind::Paragraph;
        assert!(!block.is_checked());
    }

    #[test]
    fn test_missing_metadata_reads_unchecked() {
        let mut block = Block::new(BlockKind::CheckboxItem);
        block.metadata = None;
        assert!(!block.is_checked());
    }

    #[test]
    fn test_code_language() {
        assert_eq!(Block::code("x", Some("rust")).language(), Some("rust"));
        assert_eq!(Block::code("x", None).language(), None);
    }

    #[test]
    fn test_kind_from_str_accepts_legacy_names() {
        assert_eq!("numberList".parse::<BlockKind>().unwrap(), BlockKind::NumberItem);
        assert_eq!("checkbox".parse::<BlockKind>().unwrap(), BlockKind::CheckboxItem);
        assert!(matches!(
            "quote".parse::<BlockKind>(),
            Err(ParseError::UnknownKind(name)) if name == "quote"
        ));
    }

    #[test]
    fn test_kind_wire_names() {
        for kind in BlockKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<BlockKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_block_json_shape() {
        let block = Block::code("fn main() {}", Some("rust")).with_id("b1");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "b1",
                "kind": "code",
                "text": "fn main() {}",
                "metadata": { "language": "rust" }
            })
        );
    }

    #[test]
    fn test_block_reads_legacy_shape() {
        let block: Block = serde_json::from_str(
            r#"{"id":"2-2","type":"checkbox","content":"Ship it","metadata":{"checked":true}}"#,
        )
        .unwrap();
        assert_eq!(block.kind, BlockKind::CheckboxItem);
        assert_eq!(block.text, "Ship it");
        assert!(block.is_checked());
    }

    #[test]
    fn test_word_and_char_count() {
        let block = Block::with_text(BlockKind::Paragraph, "héllo big world");
        assert_eq!(block.word_count(), 3);
        assert_eq!(block.char_count(), 15);
    }

    #[test]
    fn test_utf16_len() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("🚀"), 2);
        assert_eq!(utf16_len("e\u{301}"), 2);
        assert_eq!(utf16_len("né"), 2);
    }
}
