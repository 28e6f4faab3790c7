//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to forward slashes.
///
/// Relative paths inside a repository are compared, classified, and stored
/// (in the ledger, in reports) in this form regardless of platform.
/// Conversion to the platform-native format happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a NormalizedPath from any path-like input, converting
    /// backslashes to forward slashes.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        Self {
            inner: raw.replace('\\', "/"),
        }
    }

    /// The normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join a relative segment onto this path.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// The final path component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.trim_end_matches('/').rsplit('/').next()
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslashes_are_normalized() {
        let p = NormalizedPath::new(r"a\b\c.txt");
        assert_eq!(p.as_str(), "a/b/c.txt");
    }

    #[test]
    fn join_inserts_single_separator() {
        let p = NormalizedPath::new("root/dir");
        assert_eq!(p.join("file.txt").as_str(), "root/dir/file.txt");
        assert_eq!(p.join("/file.txt").as_str(), "root/dir/file.txt");
    }

    #[test]
    fn join_normalizes_the_segment() {
        let p = NormalizedPath::new("root");
        assert_eq!(p.join(r"a\b.txt").as_str(), "root/a/b.txt");
    }

    #[test]
    fn file_name_is_last_component() {
        assert_eq!(NormalizedPath::new("a/b/c.txt").file_name(), Some("c.txt"));
        assert_eq!(NormalizedPath::new("a/b/").file_name(), Some("b"));
    }

    #[test]
    fn filesystem_probes_use_the_native_form() {
        let dir = tempfile::tempdir().unwrap();
        let root = NormalizedPath::new(dir.path());
        assert!(root.exists());
        assert!(root.is_dir());

        std::fs::write(dir.path().join("probe.txt"), "x").unwrap();
        assert!(root.join("probe.txt").is_file());
    }
}
