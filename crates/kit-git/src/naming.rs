//! Repository and contribution branch naming

/// Extract the repository name from a remote URL.
///
/// Handles https, ssh, and scp-like forms:
/// `https://github.com/acme/widgets.git` -> `widgets`,
/// `git@github.com:acme/widgets.git` -> `widgets`.
pub fn repo_name_from_remote(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

/// The upstream branch a consumer repo contributes on.
///
/// One branch per consumer repo and branch pair, so parallel consumers
/// never collide: `widgets` on `main` contributes via `widgets/main`.
pub fn contribution_branch(repo_name: &str, branch: &str) -> String {
    format!("{repo_name}/{branch}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_url() {
        assert_eq!(
            repo_name_from_remote("https://github.com/acme/widgets.git"),
            "widgets"
        );
    }

    #[test]
    fn https_url_without_suffix() {
        assert_eq!(
            repo_name_from_remote("https://github.com/acme/widgets"),
            "widgets"
        );
    }

    #[test]
    fn scp_like_url() {
        assert_eq!(
            repo_name_from_remote("git@github.com:acme/widgets.git"),
            "widgets"
        );
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(
            repo_name_from_remote("https://github.com/acme/widgets/"),
            "widgets"
        );
    }

    #[test]
    fn contribution_branch_pairs_repo_and_branch() {
        assert_eq!(contribution_branch("widgets", "main"), "widgets/main");
        assert_eq!(
            contribution_branch("widgets", "feat/sync"),
            "widgets/feat/sync"
        );
    }
}
