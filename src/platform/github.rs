//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CandidatePr, CheckRun, MergeMethod, MergeResult, PullRequestDetails, RepoId, RepositoryState,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

/// Check runs are fetched in pages of this size
const CHECK_RUNS_PER_PAGE: u32 = 100;

/// Public GitHub API
const GITHUB_API: &str = "https://api.github.com";

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    /// Token for raw HTTP requests (check runs)
    token: String,
    /// HTTP client for raw requests (check runs)
    http_client: Client,
    /// API base URL without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance; `None` means github.com.
    pub fn new(token: &str, host: Option<&str>) -> Result<Self> {
        let api_base = host.map_or_else(
            || GITHUB_API.to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(token, &api_base)
    }

    /// Create a service talking to an explicit API base URL
    pub fn with_api_base(token: &str, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(&api_base)
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("renovator")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// Fetch one page of check runs via the REST API
    async fn fetch_check_run_page(
        &self,
        repo: &RepoId,
        sha: &str,
        page: u32,
    ) -> Result<CheckRunsResponse> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/check-runs?per_page={CHECK_RUNS_PER_PAGE}&page={page}",
            self.api_base, repo.owner, repo.name, sha
        );

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_status(
                status.as_u16(),
                format!("Failed to fetch check runs for {repo}@{sha}: {body}"),
            ));
        }

        Ok(response.json().await?)
    }
}

#[derive(Deserialize)]
struct CheckRunsResponse {
    total_count: u32,
    check_runs: Vec<RawCheckRun>,
}

#[derive(Deserialize)]
struct RawCheckRun {
    name: String,
    status: String,
    conclusion: Option<String>,
}

impl From<RawCheckRun> for CheckRun {
    fn from(run: RawCheckRun) -> Self {
        Self {
            name: run.name,
            status: run.status,
            conclusion: run.conclusion,
        }
    }
}

/// Helper to convert a search hit to a candidate
fn candidate_from_issue(issue: &octocrab::models::issues::Issue) -> Option<CandidatePr> {
    let repo = RepoId::from_api_url(&issue.repository_url)?;
    Some(CandidatePr {
        number: issue.number,
        title: issue.title.clone(),
        repo,
        html_url: issue.html_url.to_string(),
    })
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn search_pull_requests(&self, query: &str) -> Result<Vec<CandidatePr>> {
        debug!(query, "searching PRs");

        let first_page = self
            .client
            .search()
            .issues_and_pull_requests(query)
            .per_page(100)
            .send()
            .await?;
        let issues = self.client.all_pages(first_page).await?;

        let mut candidates = Vec::with_capacity(issues.len());
        for issue in &issues {
            if let Some(candidate) = candidate_from_issue(issue) {
                candidates.push(candidate);
            } else {
                warn!(
                    title = %issue.title,
                    repository_url = %issue.repository_url,
                    "Cannot determine repository for PR, dropping it"
                );
            }
        }

        debug!(count = candidates.len(), "searched PRs");
        Ok(candidates)
    }

    async fn get_pr_details(&self, repo: &RepoId, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(%repo, pr_number, "getting PR details");

        let pr = self
            .client
            .pulls(&repo.owner, &repo.name)
            .get(pr_number)
            .await?;

        let details = PullRequestDetails {
            repo: repo.clone(),
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            merged: pr.merged.unwrap_or(false) || pr.merged_at.is_some(),
            mergeable: pr.mergeable,
            head_sha: pr.head.sha.clone(),
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        };

        debug!(
            %repo,
            pr_number,
            merged = details.merged,
            mergeable = ?details.mergeable,
            "got PR details"
        );
        Ok(details)
    }

    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryState> {
        debug!(%repo, "getting repository");

        let info = self.client.repos(&repo.owner, &repo.name).get().await?;
        let state = RepositoryState {
            repo: repo.clone(),
            archived: info.archived.unwrap_or(false),
        };

        debug!(%repo, archived = state.archived, "got repository");
        Ok(state)
    }

    async fn list_check_runs(&self, repo: &RepoId, sha: &str) -> Result<Vec<CheckRun>> {
        debug!(%repo, sha, "listing check runs");

        let mut runs = Vec::new();
        let mut page = 1;
        loop {
            let response = self.fetch_check_run_page(repo, sha, page).await?;
            let page_len = response.check_runs.len();
            runs.extend(response.check_runs.into_iter().map(CheckRun::from));

            if page_len == 0 || runs.len() >= response.total_count as usize {
                break;
            }
            page += 1;
        }

        debug!(%repo, sha, count = runs.len(), "listed check runs");
        Ok(runs)
    }

    async fn create_review(&self, repo: &RepoId, pr_number: u64, body: &str) -> Result<()> {
        debug!(%repo, pr_number, "creating approving review");

        let route = format!(
            "/repos/{}/{}/pulls/{pr_number}/reviews",
            repo.owner, repo.name
        );
        let _: serde_json::Value = self
            .client
            .post(
                route,
                Some(&serde_json::json!({
                    "body": body,
                    "event": "APPROVE",
                })),
            )
            .await?;

        debug!(%repo, pr_number, "created approving review");
        Ok(())
    }

    async fn merge_pr(
        &self,
        repo: &RepoId,
        pr_number: u64,
        method: MergeMethod,
    ) -> Result<MergeResult> {
        debug!(%repo, pr_number, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&repo.owner, &repo.name)
            .merge(pr_number)
            .method(octocrab_method)
            .send()
            .await?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            %repo,
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
