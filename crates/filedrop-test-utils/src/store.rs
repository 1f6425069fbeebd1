//! [`TestStore`] builder for resolve-and-import scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory split into a managed root (`managed/`) and an
/// outside area (`outside/`) holding files the operator can "drop".
///
/// # Example
///
/// ```rust,no_run
/// use filedrop_test_utils::TestStore;
///
/// let store = TestStore::new();
/// let source = store.source("report.csv", "a,b\n1,2\n");
/// store.assert_managed_missing("report.csv");
/// ```
pub struct TestStore {
    temp_dir: TempDir,
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStore {
    /// Create an empty store. Neither `managed/` nor `outside/` exists yet.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// The temporary directory holding everything.
    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The managed root to configure the session with.
    pub fn root(&self) -> PathBuf {
        self.base().join("managed")
    }

    /// Where the engine should place `name`.
    pub fn managed(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to a file outside the managed root and return its path.
    pub fn source(&self, name: &str, content: &str) -> PathBuf {
        let path = self.base().join("outside").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Place `content` directly at the managed location of `name`.
    pub fn seed(&self, name: &str, content: &str) -> PathBuf {
        let path = self.managed(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Read the managed copy of `name`.
    pub fn read_managed(&self, name: &str) -> String {
        fs::read_to_string(self.managed(name))
            .unwrap_or_else(|e| panic!("managed file '{}' unreadable: {}", name, e))
    }

    /// Assert that `name` has not been imported.
    pub fn assert_managed_missing(&self, name: &str) {
        assert!(
            !self.managed(name).exists(),
            "expected managed file '{}' to be absent",
            name
        );
    }
}
