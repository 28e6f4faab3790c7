//! Recursive file enumeration
//!
//! Produces the deterministic, sorted list of relative paths both engines
//! operate on. Directories named in the skip list (`.git`, the state
//! directory) are pruned at any depth.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::path::NormalizedPath;

/// Enumerate all regular files under `root`, returning their paths
/// relative to `root`, normalized to forward slashes, sorted.
///
/// `skip_dirs` prunes whole directory subtrees by component name.
///
/// # Errors
///
/// Fails if `root` cannot be read. Unreadable entries below the root are
/// an enumeration error as well; partial listings are never returned.
pub fn walk_relative(root: &Path, skip_dirs: &[&str]) -> Result<Vec<String>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !skip_dirs.iter().any(|skip| name == *skip)
        });

    for entry in walker {
        let entry = entry.map_err(|e| Error::Enumeration {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| Error::OutsideRoot {
                root: root.to_path_buf(),
                path: entry.path().to_path_buf(),
            })?;
        files.push(NormalizedPath::new(rel).as_str().to_string());
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn lists_files_sorted_and_relative() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.txt");
        touch(temp.path(), "a/nested.txt");
        touch(temp.path(), "a.txt");

        let files = walk_relative(temp.path(), &[]).unwrap();
        assert_eq!(files, vec!["a.txt", "a/nested.txt", "b.txt"]);
    }

    #[test]
    fn skips_named_directories_at_any_depth() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".git/config");
        touch(temp.path(), "sub/.git/config");
        touch(temp.path(), "sub/keep.txt");

        let files = walk_relative(temp.path(), &[".git"]).unwrap();
        assert_eq!(files, vec!["sub/keep.txt"]);
    }

    #[test]
    fn skip_matches_directory_names_not_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".kit/ledger.toml");
        touch(temp.path(), "kit.txt");

        let files = walk_relative(temp.path(), &[".kit"]).unwrap();
        assert_eq!(files, vec!["kit.txt"]);
    }

    #[test]
    fn empty_root_yields_empty_list() {
        let temp = TempDir::new().unwrap();
        assert!(walk_relative(temp.path(), &[]).unwrap().is_empty());
    }
}
