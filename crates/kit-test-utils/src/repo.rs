//! [`TempTree`] builder for source and consumer tree scenarios.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A temporary directory tree with helpers for test setup and assertion.
///
/// Serves as either a kit source tree (with a manifest descriptor) or a
/// consumer repository (optionally git-initialised).
pub struct TempTree {
    temp_dir: TempDir,
}

impl Default for TempTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TempTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` at `rel`, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Read the file at `rel` as a string.
    ///
    /// # Panics
    /// Panics with a descriptive message if the file cannot be read.
    pub fn read_to_string(&self, rel: &str) -> String {
        let path = self.root().join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Whether `rel` exists.
    pub fn exists(&self, rel: &str) -> bool {
        self.root().join(rel).exists()
    }

    /// Initialise the directory as a real git repository using `git2`.
    pub fn init_git(&self) {
        git2::Repository::init(self.root())
            .expect("TempTree::init_git: failed to init git repository");
    }

    /// Write a `.kit-manifest.json` descriptor with the given lists.
    pub fn write_manifest(&self, internal: &[&str], init_only: &[&str]) {
        let doc = serde_json::json!({
            "internal": internal,
            "init_only": init_only,
        });
        self.write_file(".kit-manifest.json", &doc.to_string());
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let path = self.root().join(rel);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert that `rel` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let path = self.root().join(rel);
        assert!(
            !path.exists(),
            "Expected file NOT to exist: {}",
            path.display()
        );
    }
}
