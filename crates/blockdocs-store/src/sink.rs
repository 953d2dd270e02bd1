// SPDX-License-Identifier: AGPL-3.0-or-later
//! Export sink that saves artifacts into a directory

use blockdocs_core::{ExportArtifact, ExportSink};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write export {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes each delivered artifact to `<dir>/<filename>`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    type Error = SinkError;

    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<(), SinkError> {
        let path = self.dir.join(&artifact.filename);
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(&path, &artifact.content))
            .map_err(|source| SinkError::Write {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), mime = %artifact.mime_type, "exported document");
        Ok(())
    }
}
