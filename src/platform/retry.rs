//! Bounded retry with exponential backoff for transient platform errors
//!
//! `RetryingPlatform` wraps another `PlatformService` and retries the read
//! operations when they fail with a transient error. Mutations (review, merge)
//! pass straight through: a repeated review would post a second approval.

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{
    CandidatePr, CheckRun, MergeMethod, MergeResult, PullRequestDetails, RepoId, RepositoryState,
};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry policy for transient errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Backoff before the second attempt
    pub initial_backoff: Duration,
    /// Upper bound on a single backoff
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes a single attempt
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Backoff to wait after the given failed attempt (1-based)
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Run `op` until it succeeds, fails permanently, or attempts run out
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                let backoff = policy.backoff_for(attempt);
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    ?backoff,
                    error = %e,
                    "Transient error, retrying"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Decorator adding retries to a platform service
pub struct RetryingPlatform<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P: PlatformService> RetryingPlatform<P> {
    /// Wrap `inner` with the given policy
    pub const fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped service
    pub const fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: PlatformService> PlatformService for RetryingPlatform<P> {
    async fn search_pull_requests(&self, query: &str) -> Result<Vec<CandidatePr>> {
        with_retry(&self.policy, "search_pull_requests", || {
            self.inner.search_pull_requests(query)
        })
        .await
    }

    async fn get_pr_details(&self, repo: &RepoId, pr_number: u64) -> Result<PullRequestDetails> {
        with_retry(&self.policy, "get_pr_details", || {
            self.inner.get_pr_details(repo, pr_number)
        })
        .await
    }

    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryState> {
        with_retry(&self.policy, "get_repository", || self.inner.get_repository(repo)).await
    }

    async fn list_check_runs(&self, repo: &RepoId, sha: &str) -> Result<Vec<CheckRun>> {
        with_retry(&self.policy, "list_check_runs", || {
            self.inner.list_check_runs(repo, sha)
        })
        .await
    }

    async fn create_review(&self, repo: &RepoId, pr_number: u64, body: &str) -> Result<()> {
        self.inner.create_review(repo, pr_number, body).await
    }

    async fn merge_pr(
        &self,
        repo: &RepoId,
        pr_number: u64,
        method: MergeMethod,
    ) -> Result<MergeResult> {
        self.inner.merge_pr(repo, pr_number, method).await
    }
}
