// SPDX-License-Identifier: AGPL-3.0-or-later
//! Renderer and export-sink traits shared by the exporters and their hosts

use crate::document::Document;
use crate::export::{ExportArtifact, ExportFormat};

/// Error for names coming in from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown block kind: {0}")]
    UnknownKind(String),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Renderer trait: convert a document to an export format
///
/// Rendering is pure and total; every document has a rendering.
pub trait Renderer: Send + Sync {
    /// The format this renderer produces
    fn format(&self) -> ExportFormat;

    /// Render a document to a string
    fn render(&self, doc: &Document) -> String;
}

/// Export collaborator: hands a finished artifact to the user's environment
pub trait ExportSink {
    type Error: std::error::Error;

    fn deliver(&mut self, artifact: &ExportArtifact) -> std::result::Result<(), Self::Error>;
}
