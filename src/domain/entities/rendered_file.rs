//! Rendered file entity
//!
//! Output of a template set: a path relative to the service root and the
//! full content to write there.

use std::path::{Path, PathBuf};

/// A file produced by a template set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path relative to the service root
    path: PathBuf,
    content: String,
}

impl RenderedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Absolute destination under `root`
    pub fn destination(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }
}
