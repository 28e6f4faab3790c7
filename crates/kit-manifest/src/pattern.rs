//! Ordered glob pattern lists with negation
//!
//! A list is evaluated as a single ordered scan: the polarity of the
//! *last* entry that matches a path decides the outcome. This is what lets
//! a later `!a/b/**` carve an exception out of an earlier `a/**`. Two
//! separately unioned positive/negative lists would lose that ordering.

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// Prefix that inverts an entry's effect within its list
const NEGATION: char = '!';

/// Matching is gitignore-flavored: `*` stays within one path segment,
/// `**` crosses segments.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct PatternEntry {
    raw: String,
    negated: bool,
    matcher: Pattern,
}

/// An ordered sequence of glob patterns evaluated last-match-wins.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    entries: Vec<PatternEntry>,
}

impl PatternList {
    /// Compile a list of raw pattern strings.
    ///
    /// `list_name` is used in error reporting only. A malformed glob fails
    /// the whole list with its position; no partially compiled list is
    /// ever returned.
    pub fn parse(list_name: &str, patterns: &[String]) -> Result<Self> {
        let mut entries = Vec::with_capacity(patterns.len());

        for (index, raw) in patterns.iter().enumerate() {
            let (negated, glob_text) = match raw.strip_prefix(NEGATION) {
                Some(rest) => (true, rest),
                None => (false, raw.as_str()),
            };

            let matcher = Pattern::new(glob_text).map_err(|e| Error::InvalidPattern {
                list: list_name.to_string(),
                index,
                pattern: raw.clone(),
                message: e.to_string(),
            })?;

            entries.push(PatternEntry {
                raw: raw.clone(),
                negated,
                matcher,
            });
        }

        Ok(Self { entries })
    }

    /// Whether the list's final verdict for `path` is a match.
    ///
    /// Scans every entry in order and tracks the polarity of the last one
    /// that matched; a path no entry matches is not a match.
    pub fn matches(&self, path: &str) -> bool {
        let mut matched = false;
        for entry in &self.entries {
            if entry.matcher.matches_with(path, MATCH_OPTIONS) {
                matched = !entry.negated;
            }
        }
        matched
    }

    /// The raw pattern text of every entry, in order.
    pub fn raw_patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.raw.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(patterns: &[&str]) -> PatternList {
        let owned: Vec<String> = patterns.iter().map(|s| s.to_string()).collect();
        PatternList::parse("test", &owned).unwrap()
    }

    #[test]
    fn empty_list_matches_nothing() {
        assert!(!list(&[]).matches("anything"));
    }

    #[test]
    fn positive_match() {
        let l = list(&["src/**"]);
        assert!(l.matches("src/main.rs"));
        assert!(l.matches("src/deep/nested.rs"));
        assert!(!l.matches("docs/readme.md"));
    }

    #[test]
    fn negation_carves_exception_out_of_earlier_entry() {
        let l = list(&["a/**", "!a/b/**"]);
        assert!(l.matches("a/c/file.txt"));
        assert!(!l.matches("a/b/file.txt"));
        assert!(!l.matches("a/b/deep/file.txt"));
    }

    #[test]
    fn later_positive_overrides_earlier_negation() {
        let l = list(&["a/**", "!a/b/**", "a/b/keep.txt"]);
        assert!(l.matches("a/b/keep.txt"));
        assert!(!l.matches("a/b/other.txt"));
    }

    #[test]
    fn negation_without_prior_match_is_not_a_match() {
        let l = list(&["!a/**"]);
        assert!(!l.matches("a/file.txt"));
        assert!(!l.matches("b/file.txt"));
    }

    #[test]
    fn single_star_does_not_cross_separators() {
        let l = list(&["*.md"]);
        assert!(l.matches("README.md"));
        assert!(!l.matches("docs/guide.md"));
    }

    #[test]
    fn double_star_crosses_separators() {
        let l = list(&["**/*.md"]);
        assert!(l.matches("docs/guide.md"));
        assert!(l.matches("docs/deep/guide.md"));
    }

    #[test]
    fn malformed_glob_reports_list_and_position() {
        let patterns = vec!["ok/**".to_string(), "bad[".to_string()];
        let err = PatternList::parse("internal", &patterns).unwrap_err();
        match err {
            Error::InvalidPattern {
                list,
                index,
                pattern,
                ..
            } => {
                assert_eq!(list, "internal");
                assert_eq!(index, 1);
                assert_eq!(pattern, "bad[");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negated_malformed_glob_keeps_raw_text_in_error() {
        let patterns = vec!["!bad[".to_string()];
        let err = PatternList::parse("init_only", &patterns).unwrap_err();
        match err {
            Error::InvalidPattern { pattern, .. } => assert_eq!(pattern, "!bad["),
            other => panic!("unexpected error: {other}"),
        }
    }
}
