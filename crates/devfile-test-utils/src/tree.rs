//! [`TestDevfileTree`]: devfiles laid out in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding devfiles that reference each other by
/// relative path.
///
/// # Example
///
/// ```rust,no_run
/// use devfile_test_utils::TestDevfileTree;
///
/// let tree = TestDevfileTree::new();
/// tree.write("base/devfile.yaml", "schemaVersion: 2.2.0\n");
/// let app = tree.write("app/devfile.yaml", "schemaVersion: 2.2.0\nparent:\n  uri: ../base/devfile.yaml\n");
/// assert!(app.exists());
/// ```
pub struct TestDevfileTree {
    temp_dir: TempDir,
}

impl Default for TestDevfileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDevfileTree {
    /// Create an empty temporary directory.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new()
                .unwrap_or_else(|e| panic!("TestDevfileTree::new: failed to create temp dir: {e}")),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("TestDevfileTree::write: failed to create {}: {e}", parent.display())
            });
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestDevfileTree::write: failed to write {}: {e}", path.display()));
        path
    }
}
