//! Platform services for GitHub
//!
//! Provides the capability set the triage pipeline needs from the PR host.

mod github;
mod retry;

pub use github::GitHubService;
pub use retry::{RetryPolicy, RetryingPlatform, with_retry};

use crate::error::Result;
use crate::types::{
    CandidatePr, CheckRun, MergeMethod, MergeResult, PullRequestDetails, RepoId, RepositoryState,
};
use async_trait::async_trait;

/// Platform service trait for PR operations
///
/// This trait abstracts the hosting platform, allowing the triage pipeline to
/// run against GitHub or a test double.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Search open PRs with a platform query string
    ///
    /// Hits without a usable repository identity are dropped by the
    /// implementation.
    async fn search_pull_requests(&self, query: &str) -> Result<Vec<CandidatePr>>;

    /// Get fresh PR details (merged/mergeable/head SHA)
    async fn get_pr_details(&self, repo: &RepoId, pr_number: u64) -> Result<PullRequestDetails>;

    /// Get repository details (archived flag)
    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryState>;

    /// List CI check runs for a commit
    async fn list_check_runs(&self, repo: &RepoId, sha: &str) -> Result<Vec<CheckRun>>;

    /// Submit an approving review with the given body
    async fn create_review(&self, repo: &RepoId, pr_number: u64, body: &str) -> Result<()>;

    /// Merge a PR with the specified method
    async fn merge_pr(
        &self,
        repo: &RepoId,
        pr_number: u64,
        method: MergeMethod,
    ) -> Result<MergeResult>;
}
