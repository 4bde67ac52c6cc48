//! [`TestWorkspace`] builder for mirror scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding sources, destinations and a config file.
///
/// # Example
///
/// ```rust,no_run
/// use bam_test_utils::workspace::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// let docs = ws.mkdir("src/docs");
/// ws.write("src/docs/a.txt", "hello");
/// ws.mkdir("backup");
/// ws.write_config(&format!("source docs {}/\n", docs.display()));
/// ws.assert_file_exists("bamrc");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestWorkspace::new: failed to create temp dir"),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the workspace.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Create a directory (and parents), returning its absolute path.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("TestWorkspace::mkdir: failed to create {rel}: {e}"));
        path
    }

    /// Write a file (creating parents), returning its absolute path.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("TestWorkspace::write: failed to create parent of {rel}: {e}")
            });
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestWorkspace::write: failed to write {rel}: {e}"));
        path
    }

    /// Write `bamrc` at the workspace root.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write("bamrc", content)
    }

    /// Panic unless `rel` exists.
    pub fn assert_file_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(path.exists(), "expected {} to exist", path.display());
    }

    /// Read a file inside the workspace.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("TestWorkspace::read: failed to read {rel}: {e}"))
    }
}
