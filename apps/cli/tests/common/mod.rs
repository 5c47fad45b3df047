//! Common test utilities for integration tests.
//!
//! Provides a temporary content root populated with quiz documents.

pub mod fixtures;

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use fastlearn_cli::source::LocalSource;

/// Temporary content tree and a source reading from it.
pub struct TestContent {
    pub dir: TempDir,
    pub source: LocalSource,
}

impl TestContent {
    /// Create an empty content root.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let source = LocalSource::new(dir.path());
        Self { dir, source }
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, content).expect("failed to write fixture");
    }

    /// Create an empty directory relative to the root.
    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.dir.path().join(relative)).expect("failed to create dir");
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
