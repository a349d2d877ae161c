//! Common test utilities for integration tests
//!
//! This module contains shared test fixtures and helper functions used across
//! integration tests. These utilities are not compiled into the library.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated documentation tree with automatic cleanup
///
/// Each fixture lives in its own temporary directory, allowing tests to run
/// in parallel without interfering with each other.
pub struct TestFixture {
    _docs_dir: TempDir,
    root: PathBuf,
}

impl TestFixture {
    /// Create an empty fixture
    pub fn new() -> Result<Self> {
        let docs_dir = TempDir::new()?;
        Ok(Self {
            root: docs_dir.path().to_path_buf(),
            _docs_dir: docs_dir,
        })
    }

    /// Create a fixture populated with `(relative path, content)` pairs
    pub fn with_files(files: &[(&str, &str)]) -> Result<Self> {
        let fixture = Self::new()?;
        for (name, content) in files {
            fixture.write(name, content)?;
        }
        Ok(fixture)
    }

    /// Write a file below the fixture root, creating parent directories
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Absolute path of a file below the fixture root
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Get the path to the fixture root
    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
