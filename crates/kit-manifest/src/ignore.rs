//! Consumer-side ignore rules
//!
//! A consumer repo opts files out of upstream contribution through its own
//! `.kitignore`, and its `.gitignore` keeps build artifacts and scratch
//! files out as well. Both files use gitignore-style lines: comments,
//! blank lines, `!` negation, trailing `/` for directories.

use std::path::Path;

use crate::error::{Error, Result};
use crate::pattern::PatternList;

/// Name of the consumer-owned ignore file
pub const IGNORE_FILE: &str = ".kitignore";

/// Git's own ignore file, honored for the push ignore-rule stage
const GITIGNORE_FILE: &str = ".gitignore";

/// Ignore rules loaded from a consumer repository root.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: PatternList,
}

impl IgnoreRules {
    /// Load ignore rules from `repo_root`.
    ///
    /// `.kitignore` is read first, then the root `.gitignore`; missing
    /// files contribute nothing. A malformed pattern in either file fails
    /// the load with the offending pattern text.
    pub fn load(repo_root: &Path) -> Result<Self> {
        // The ignore file itself is consumer-owned state and never a
        // contribution candidate.
        let mut raw = vec![IGNORE_FILE.to_string()];

        for file in [IGNORE_FILE, GITIGNORE_FILE] {
            let path = repo_root.join(file);
            if !path.is_file() {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|e| Error::Io {
                path: path.clone(),
                source: e,
            })?;
            raw.extend(parse_ignore_lines(&content));
        }

        Self::from_lines(&raw)
    }

    /// Build ignore rules from already-collected pattern lines.
    pub fn from_lines(lines: &[String]) -> Result<Self> {
        let expanded = expand_ignore_patterns(lines);
        Ok(Self {
            patterns: PatternList::parse("ignore", &expanded)?,
        })
    }

    /// Whether `path` is excluded by the loaded rules.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.patterns.matches(path)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Strip comments and blank lines from ignore file content.
fn parse_ignore_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Expand gitignore-style lines into glob entries.
///
/// A line that names a directory (or any bare path) must also exclude
/// everything beneath it, so each line yields itself plus a `/**` variant.
/// Anchoring slashes are stripped; polarity carries over to both forms.
fn expand_ignore_patterns(lines: &[String]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(lines.len() * 2);

    for line in lines {
        let (negated, body) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line.as_str()),
        };
        let body = body.trim_start_matches('/').trim_end_matches('/');
        if body.is_empty() {
            continue;
        }

        let prefix = if negated { "!" } else { "" };
        expanded.push(format!("{prefix}{body}"));
        if !body.ends_with("**") {
            expanded.push(format!("{prefix}{body}/**"));
        }
    }

    expanded
}
