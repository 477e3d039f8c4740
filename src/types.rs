//! Core types for renovator

use serde::{Deserialize, Serialize};
use url::Url;

/// Structured repository identity (owner + name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Create a new repository identity
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Build an identity from an API repository URL
    /// (`https://api.github.com/repos/{owner}/{name}`).
    ///
    /// GitHub Enterprise prefixes the path with `/api/v3`, so the lookup is
    /// anchored on the `repos` segment rather than on a fixed position.
    pub fn from_api_url(url: &Url) -> Option<Self> {
        let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
        let repos_idx = segments.iter().rposition(|s| *s == "repos")?;
        match segments.get(repos_idx + 1..)? {
            [owner, name] => Some(Self::new(*owner, *name)),
            _ => None,
        }
    }

    /// Whether both owner and name are present
    pub fn is_complete(&self) -> bool {
        !self.owner.is_empty() && !self.name.is_empty()
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A PR returned by the review-request search.
///
/// Fixed at search time; later reads use `repo` + `number` to fetch fresh state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePr {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Repository the PR belongs to
    pub repo: RepoId,
    /// Web URL for the PR
    pub html_url: String,
}

impl CandidatePr {
    /// Identity of this candidate for reporting
    pub fn pr_ref(&self) -> PrRef {
        PrRef {
            repo: self.repo.clone(),
            number: self.number,
            title: self.title.clone(),
        }
    }
}

/// Identity of a PR carried by verdicts and outcomes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrRef {
    /// Repository the PR belongs to
    pub repo: RepoId,
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
}

impl std::fmt::Display for PrRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{} {}", self.repo, self.number, self.title)
    }
}

/// Live PR state, fetched fresh on every pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDetails {
    /// Repository the PR belongs to
    pub repo: RepoId,
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Whether the PR has been merged
    pub merged: bool,
    /// Whether the PR can be merged
    /// - `Some(true)` = mergeable
    /// - `Some(false)` = conflicts or otherwise blocked
    /// - `None` = unknown (GitHub still computing)
    pub mergeable: Option<bool>,
    /// SHA of the head commit (CI checks are looked up by this)
    pub head_sha: String,
    /// Web URL for the PR
    pub html_url: String,
}

impl PullRequestDetails {
    /// Identity of this PR for reporting
    pub fn pr_ref(&self) -> PrRef {
        PrRef {
            repo: self.repo.clone(),
            number: self.number,
            title: self.title.clone(),
        }
    }
}

/// Repository state relevant to gating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    /// Repository identity
    pub repo: RepoId,
    /// Whether the repository is archived (read-only)
    pub archived: bool,
}

/// A single CI check run result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    /// Check name (e.g. "build")
    pub name: String,
    /// Run status ("queued", "in_progress", "completed")
    pub status: String,
    /// Conclusion once completed ("success", "failure", "skipped", ...)
    pub conclusion: Option<String>,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    /// Squash all commits into one
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}
