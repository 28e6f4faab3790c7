//! PushEngine implementation
//!
//! Planning is pure: four filter stages over the enumerated consumer
//! tree, each recording what it drops. Materialization drives the VCS
//! gateway as a strict sequence (fork, branch, copy, commit, push, PR)
//! and never rolls back on failure: a branch that exists when something
//! later fails is reported by name for manual recovery.

use std::fs;

use kit_fs::{NormalizedPath, walk_relative};
use kit_git::{VcsGateway, contribution_branch, repo_name_from_remote};
use kit_manifest::{Classification, IgnoreRules, Manifest, PatternList};

use super::plan::{
    ChangeKind, DropReason, DroppedFile, InclusionReason, PushEntry, PushPlan,
};
use crate::SKIP_DIRS;
use crate::error::{Error, Result};
use crate::sync::FileError;

/// Options for materializing a push
#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    /// Pull request title; also used as the commit message
    pub title: Option<String>,
    /// Pull request body
    pub body: Option<String>,
}

/// What materialization accomplished.
#[derive(Debug, Clone)]
pub struct PushReceipt {
    /// The contribution branch in the upstream working tree
    pub branch: String,
    /// False when the copied files produced an empty diff
    pub committed: bool,
    /// URL of the pull request, when one was created or already open
    pub pr_url: Option<String>,
    /// A pull request for this branch already existed
    pub pr_already_open: bool,
}

/// Computes and contributes the upstream push set.
pub struct PushEngine<'a> {
    manifest: &'a Manifest,
    upstream_root: NormalizedPath,
    repo_root: NormalizedPath,
    gateway: &'a dyn VcsGateway,
}

impl<'a> PushEngine<'a> {
    pub fn new(
        manifest: &'a Manifest,
        upstream_root: impl Into<NormalizedPath>,
        repo_root: impl Into<NormalizedPath>,
        gateway: &'a dyn VcsGateway,
    ) -> Self {
        Self {
            manifest,
            upstream_root: upstream_root.into(),
            repo_root: repo_root.into(),
            gateway,
        }
    }

    /// Compute the contribution set through the four-stage pipeline.
    ///
    /// # Errors
    ///
    /// A malformed `include`/`exclude`/ignore pattern fails before any
    /// enumeration, as does an unreadable consumer tree. Unreadable
    /// individual candidates are recorded in [`PushPlan::errors`].
    pub fn plan(&self, include: &[String], exclude: &[String]) -> Result<PushPlan> {
        let include = PatternList::parse("include", include)?;
        let exclude = PatternList::parse("exclude", exclude)?;
        let ignore = IgnoreRules::load(self.repo_root.as_ref())?;

        let files = walk_relative(self.repo_root.as_ref(), SKIP_DIRS)?;
        tracing::debug!(candidates = files.len(), "Planning push");

        let mut plan = PushPlan::default();

        for path in files {
            // Stage 1: base set. Init-only files never go upstream,
            // not even when an include pattern names them.
            let classification = self.manifest.classify(&path);
            if classification == Classification::InitOnly {
                plan.dropped.push(DroppedFile {
                    path,
                    reason: DropReason::InitOnly,
                });
                continue;
            }
            let reason = match classification {
                Classification::Distributable => InclusionReason::Distributable,
                _ if include.matches(&path) => InclusionReason::IncludePattern,
                _ => {
                    plan.dropped.push(DroppedFile {
                        path,
                        reason: DropReason::Internal,
                    });
                    continue;
                }
            };

            // Stage 2: explicit excludes.
            if exclude.matches(&path) {
                plan.dropped.push(DroppedFile {
                    path,
                    reason: DropReason::Excluded,
                });
                continue;
            }

            // Stage 3: the consumer repo's own ignore rules.
            if ignore.is_ignored(&path) {
                plan.dropped.push(DroppedFile {
                    path,
                    reason: DropReason::Ignored,
                });
                continue;
            }

            // Stage 4: byte-diff against the upstream reference tree.
            let local = match fs::read(self.repo_root.join(&path).as_ref()) {
                Ok(bytes) => bytes,
                Err(e) => {
                    plan.errors.push(FileError {
                        path,
                        message: format!("failed to read: {e}"),
                    });
                    continue;
                }
            };
            let upstream_path = self.upstream_root.join(&path);
            let change = if upstream_path.exists() {
                let upstream = match fs::read(upstream_path.as_ref()) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        plan.errors.push(FileError {
                            path,
                            message: format!("failed to read upstream counterpart: {e}"),
                        });
                        continue;
                    }
                };
                if upstream == local {
                    plan.dropped.push(DroppedFile {
                        path,
                        reason: DropReason::Unchanged,
                    });
                    continue;
                }
                ChangeKind::Modified
            } else {
                ChangeKind::Added
            };

            plan.entries.push(PushEntry {
                path,
                reason,
                change,
            });
        }

        tracing::debug!(
            surviving = plan.entries.len(),
            dropped = plan.dropped.len(),
            "Push plan computed"
        );

        Ok(plan)
    }

    /// Turn a plan into a pull request against the upstream repository.
    ///
    /// # Errors
    ///
    /// Fork and branch-creation failures surface as gateway errors. Any
    /// failure after the contribution branch exists is wrapped in
    /// [`Error::PushFailed`] carrying the branch name; nothing is rolled
    /// back automatically.
    pub fn submit(&self, plan: &PushPlan, options: &PushOptions) -> Result<PushReceipt> {
        if !self.gateway.is_repository(self.repo_root.as_ref()) {
            return Err(Error::NotARepository {
                path: self.repo_root.to_native(),
            });
        }

        let branch = self
            .gateway
            .current_branch(self.repo_root.as_ref())?
            .ok_or_else(|| Error::DetachedHead {
                path: self.repo_root.to_native(),
            })?;

        let origin = self
            .gateway
            .run_git(&["remote", "get-url", "origin"], self.repo_root.as_ref())?;
        let repo_name = if origin.success {
            repo_name_from_remote(origin.stdout_trimmed())
        } else {
            // No origin remote: fall back to the directory name.
            self.repo_root
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "consumer".to_string())
        };

        let base = self
            .gateway
            .current_branch(self.upstream_root.as_ref())?
            .ok_or_else(|| Error::DetachedHead {
                path: self.upstream_root.to_native(),
            })?;

        let pr_branch = contribution_branch(&repo_name, &branch);
        tracing::debug!(branch = %pr_branch, base = %base, files = plan.entries.len(), "Materializing push");

        // Fork before any branch work; idempotent when the fork exists.
        self.gateway
            .run_gh(
                &["repo", "fork", "--remote", "--remote-name", "fork"],
                self.upstream_root.as_ref(),
            )?
            .require_success("gh repo fork")?;

        let verify_ref = format!("refs/heads/{pr_branch}");
        let exists = self
            .gateway
            .run_git(
                &["rev-parse", "--verify", "--quiet", &verify_ref],
                self.upstream_root.as_ref(),
            )?
            .success;
        if exists {
            self.gateway
                .run_git(&["checkout", &pr_branch], self.upstream_root.as_ref())?
                .require_success("git checkout")?;
        } else {
            self.gateway
                .run_git(
                    &["checkout", "-b", &pr_branch, &base],
                    self.upstream_root.as_ref(),
                )?
                .require_success("git checkout -b")?;
        }

        // From here the branch exists: wrap failures with its name so the
        // partial state is recoverable by hand.
        match self.commit_and_open_pr(plan, options, &pr_branch, &base) {
            Ok(receipt) => {
                let restore = self
                    .gateway
                    .run_git(&["checkout", &base], self.upstream_root.as_ref());
                if let Ok(out) = restore
                    && !out.success
                {
                    tracing::warn!(base = %base, stderr = %out.stderr.trim(), "Failed to restore upstream branch");
                }
                Ok(receipt)
            }
            Err(e) => Err(Error::PushFailed {
                branch: pr_branch,
                message: e.to_string(),
            }),
        }
    }

    fn commit_and_open_pr(
        &self,
        plan: &PushPlan,
        options: &PushOptions,
        pr_branch: &str,
        base: &str,
    ) -> Result<PushReceipt> {
        // Copy the plan's files into the upstream working tree.
        for entry in &plan.entries {
            let bytes = fs::read(self.repo_root.join(&entry.path).as_ref())?;
            let dest = self.upstream_root.join(&entry.path);
            if let Some(parent) = dest.as_ref().parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(dest.as_ref(), bytes)?;
        }

        self.gateway
            .run_git(&["add", "-A"], self.upstream_root.as_ref())?
            .require_success("git add")?;

        // Exit 0 means the staged diff is empty: nothing to contribute.
        let diff = self
            .gateway
            .run_git(&["diff", "--cached", "--quiet"], self.upstream_root.as_ref())?;
        if diff.success {
            tracing::debug!(branch = %pr_branch, "Copied files produced an empty diff");
            return Ok(PushReceipt {
                branch: pr_branch.to_string(),
                committed: false,
                pr_url: None,
                pr_already_open: false,
            });
        }

        let message = options
            .title
            .clone()
            .unwrap_or_else(|| format!("sync: {pr_branch}"));
        self.gateway
            .run_git(&["commit", "-m", &message], self.upstream_root.as_ref())?
            .require_success("git commit")?;

        self.gateway
            .run_git(&["push", "-u", "fork", pr_branch], self.upstream_root.as_ref())?
            .require_success("git push")?;

        // An open PR keeps accumulating commits; only create one when
        // none exists for this branch.
        let view = self.gateway.run_gh(
            &["pr", "view", pr_branch, "--json", "url", "--jq", ".url"],
            self.upstream_root.as_ref(),
        )?;
        if view.success {
            return Ok(PushReceipt {
                branch: pr_branch.to_string(),
                committed: true,
                pr_url: Some(view.stdout_trimmed().to_string()),
                pr_already_open: true,
            });
        }

        let title = options
            .title
            .clone()
            .unwrap_or_else(|| format!("Sync from {pr_branch}"));
        let body = options.body.clone().unwrap_or_else(|| {
            format!(
                "Automated sync-back from a consumer repository.\n\nBranch: `{pr_branch}`\nFiles: {}",
                plan.entries.len()
            )
        });
        let created = self
            .gateway
            .run_gh(
                &[
                    "pr", "create", "--title", &title, "--body", &body, "--base", base,
                ],
                self.upstream_root.as_ref(),
            )?
            .require_success("gh pr create")?;

        Ok(PushReceipt {
            branch: pr_branch.to_string(),
            committed: true,
            pr_url: Some(created.stdout_trimmed().to_string()),
            pr_already_open: false,
        })
    }
}
