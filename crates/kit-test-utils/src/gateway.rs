//! [`ScriptedGateway`] test double for the VCS gateway.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use kit_git::{Result, VcsGateway, VcsOutput};

/// A gateway that records every command and answers from a script.
///
/// Commands default to success with empty output. Tests register rules
/// keyed by a command prefix (`"git commit"`, `"gh pr create"`); the
/// first matching rule answers. State queries are configured per path.
pub struct ScriptedGateway {
    /// Every `run_git`/`run_gh` invocation, as `"<program> <args...>"`.
    pub calls: RefCell<Vec<String>>,
    branches: HashMap<PathBuf, Option<String>>,
    non_repos: Vec<PathBuf>,
    rules: Vec<(String, VcsOutput)>,
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedGateway {
    /// A gateway where every path is a repository on branch `main` and
    /// every command succeeds with empty output.
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            branches: HashMap::new(),
            non_repos: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Set the branch reported for `path` (`None` = detached HEAD).
    pub fn with_branch(mut self, path: &Path, branch: Option<&str>) -> Self {
        self.branches
            .insert(path.to_path_buf(), branch.map(str::to_string));
        self
    }

    /// Make `is_repository` answer false for `path`.
    pub fn not_a_repository(mut self, path: &Path) -> Self {
        self.non_repos.push(path.to_path_buf());
        self
    }

    /// Answer any command starting with `prefix` with `output`.
    pub fn respond(mut self, prefix: &str, output: VcsOutput) -> Self {
        self.rules.push((prefix.to_string(), output));
        self
    }

    /// Answer any command starting with `prefix` with a success carrying
    /// `stdout`.
    pub fn succeed_with(self, prefix: &str, stdout: &str) -> Self {
        self.respond(
            prefix,
            VcsOutput {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    /// Answer any command starting with `prefix` with a failure carrying
    /// `stderr`.
    pub fn fail_with(self, prefix: &str, stderr: &str) -> Self {
        self.respond(
            prefix,
            VcsOutput {
                success: false,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    /// All recorded invocations matching `prefix`, in order.
    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn answer(&self, program: &str, args: &[&str]) -> VcsOutput {
        let key = format!("{program} {}", args.join(" "));
        self.calls.borrow_mut().push(key.clone());

        for (prefix, output) in &self.rules {
            if key.starts_with(prefix.as_str()) {
                return output.clone();
            }
        }
        VcsOutput {
            success: true,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

impl VcsGateway for ScriptedGateway {
    fn run_git(&self, args: &[&str], _cwd: &Path) -> Result<VcsOutput> {
        Ok(self.answer("git", args))
    }

    fn run_gh(&self, args: &[&str], _cwd: &Path) -> Result<VcsOutput> {
        Ok(self.answer("gh", args))
    }

    fn current_branch(&self, path: &Path) -> Result<Option<String>> {
        Ok(self
            .branches
            .get(path)
            .cloned()
            .unwrap_or_else(|| Some("main".to_string())))
    }

    fn is_repository(&self, path: &Path) -> bool {
        !self.non_repos.iter().any(|p| p == path)
    }
}
