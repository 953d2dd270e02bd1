// SPDX-License-Identifier: AGPL-3.0-or-later
//! Export artifacts: rendered content plus the filename and MIME type a
//! download collaborator needs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::Document;
use crate::formats::{MarkdownRenderer, PlainTextRenderer};
use crate::traits::{ParseError, Renderer};

/// Export target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    PlainText,
}

impl ExportFormat {
    /// File extension for this format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::PlainText => "txt",
        }
    }

    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown",
            Self::PlainText => "text/plain",
        }
    }

    /// Short display name
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::PlainText => "Text",
        }
    }

    /// All formats in toolbar order
    pub const ALL: [Self; 2] = [Self::Markdown, Self::PlainText];

    pub fn renderer(&self) -> &'static dyn Renderer {
        match self {
            Self::Markdown => &MarkdownRenderer,
            Self::PlainText => &PlainTextRenderer,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md" | "markdown" => Ok(Self::Markdown),
            "txt" | "text" => Ok(Self::PlainText),
            other => Err(ParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render `doc` in the given format
pub fn render(doc: &Document, format: ExportFormat) -> String {
    format.renderer().render(doc)
}

/// Derive the download filename for a document title
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, the rest is
/// lowercased, and the format's extension is appended.
pub fn export_filename(title: &str, format: ExportFormat) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.{}", stem, format.extension())
}

/// Everything the export collaborator needs to save a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub content: String,
    pub filename: String,
    pub mime_type: String,
}

impl ExportArtifact {
    pub fn build(doc: &Document, format: ExportFormat) -> Self {
        Self {
            content: render(doc, format),
            filename: export_filename(&doc.title, format),
            mime_type: format.mime_type().to_string(),
        }
    }
}
