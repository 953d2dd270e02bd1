// SPDX-License-Identifier: AGPL-3.0-or-later
//! Blockdocs Core - Block/document model, mutation engine and exporters
//!
//! This crate provides:
//! - The block and document model with its structural rules
//! - A stateless mutation engine for edit events (enter, backspace, retype, toggle)
//! - Deterministic Markdown and plain text exporters
//! - Export artifact construction (content, filename, MIME type)
//! - Transient per-block draft buffers for editor surfaces

pub mod block;
pub mod document;
pub mod draft;
pub mod engine;
pub mod export;
pub mod formats;
pub mod traits;

pub use block::{Block, BlockId, BlockKind, BlockMetadata};
pub use document::{Document, DocumentId, DEFAULT_TITLE};
pub use draft::DraftBuffers;
pub use export::{export_filename, ExportArtifact, ExportFormat};
pub use formats::{to_markdown, to_plain_text};
pub use traits::{ExportSink, ParseError, Renderer, Result};
