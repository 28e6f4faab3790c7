//! The gateway trait and its subprocess-backed implementation

use std::path::Path;
use std::process::Command;

use git2::{ErrorCode, Repository};

use crate::error::{Error, Result};

/// Structured result of a version-control command.
///
/// A non-zero exit is data, not an error: callers that require success use
/// [`VcsOutput::require_success`], callers probing state (branch exists?
/// PR exists?) branch on `success` directly.
#[derive(Debug, Clone)]
pub struct VcsOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl VcsOutput {
    /// Promote a failed command into an error carrying its stderr.
    pub fn require_success(self, context: &str) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::CommandFailed {
                context: context.to_string(),
                stderr: self.stderr.trim().to_string(),
            })
        }
    }

    /// Stdout with surrounding whitespace removed.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Version-control operations the engines consume.
///
/// Mutations go through `run_git`/`run_gh`; the two state queries are
/// separate so test doubles can answer them without a process table. The
/// gateway issues no retries of its own.
pub trait VcsGateway {
    /// Execute `git` with the given arguments in `cwd`.
    fn run_git(&self, args: &[&str], cwd: &Path) -> Result<VcsOutput>;

    /// Execute `gh` with the given arguments in `cwd`.
    fn run_gh(&self, args: &[&str], cwd: &Path) -> Result<VcsOutput>;

    /// The branch HEAD points at, or `None` for a detached or unborn HEAD.
    fn current_branch(&self, path: &Path) -> Result<Option<String>>;

    /// Whether `path` is the root of a git repository.
    fn is_repository(&self, path: &Path) -> bool;
}

/// Gateway backed by real subprocesses and `git2`.
#[derive(Debug, Default)]
pub struct ProcessGateway;

impl ProcessGateway {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<VcsOutput> {
        tracing::debug!(%program, ?args, cwd = %cwd.display(), "Running VCS command");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| Error::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        let result = VcsOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !result.success {
            tracing::debug!(%program, ?args, stderr = %result.stderr.trim(), "VCS command exited non-zero");
        }

        Ok(result)
    }
}

impl VcsGateway for ProcessGateway {
    fn run_git(&self, args: &[&str], cwd: &Path) -> Result<VcsOutput> {
        self.run("git", args, cwd)
    }

    fn run_gh(&self, args: &[&str], cwd: &Path) -> Result<VcsOutput> {
        self.run("gh", args, cwd)
    }

    fn current_branch(&self, path: &Path) -> Result<Option<String>> {
        let repo = Repository::open(path)?;
        let head = match repo.head() {
            Ok(head) => head,
            // An unborn branch (no commits yet) has no resolvable HEAD.
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(Some(head.shorthand().unwrap_or("HEAD").to_string()))
        } else {
            Ok(None)
        }
    }

    fn is_repository(&self, path: &Path) -> bool {
        Repository::open(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn is_repository_false_for_plain_directory() {
        let temp = TempDir::new().unwrap();
        assert!(!ProcessGateway::new().is_repository(temp.path()));
    }

    #[test]
    fn is_repository_true_after_init() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        assert!(ProcessGateway::new().is_repository(temp.path()));
    }

    #[test]
    fn current_branch_none_before_first_commit() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let branch = ProcessGateway::new().current_branch(temp.path()).unwrap();
        assert_eq!(branch, None);
    }

    #[test]
    fn current_branch_after_commit() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let sig = git2::Signature::now("test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();

        let branch = ProcessGateway::new().current_branch(temp.path()).unwrap();
        // Default branch name depends on git config
        assert!(branch == Some("main".to_string()) || branch == Some("master".to_string()));
    }

    #[test]
    fn require_success_carries_stderr() {
        let out = VcsOutput {
            success: false,
            stdout: String::new(),
            stderr: "fatal: not a git repository\n".to_string(),
        };
        let err = out.require_success("git add").unwrap_err();
        match err {
            Error::CommandFailed { context, stderr } => {
                assert_eq!(context, "git add");
                assert_eq!(stderr, "fatal: not a git repository");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
