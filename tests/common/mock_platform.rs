//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use renovator::error::{Error, Result};
use renovator::platform::PlatformService;
use renovator::types::{
    CandidatePr, CheckRun, MergeMethod, MergeResult, PullRequestDetails, RepoId, RepositoryState,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// Call record for `create_review`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReviewCall {
    pub repo: RepoId,
    pub pr_number: u64,
    pub body: String,
}

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub repo: RepoId,
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall,
/// so responses can change between rounds.
///
/// Features:
/// - Per-PR detail responses, optionally a sequence consumed one read at a time
/// - Successful merges flip the PR to merged for later reads
/// - Call tracking for verification
/// - Error injection, including a number of transient failures before success
pub struct MockPlatformService {
    search_response: Mutex<Vec<CandidatePr>>,
    pr_details_responses: Mutex<HashMap<u64, VecDeque<PullRequestDetails>>>,
    repository_responses: Mutex<HashMap<String, RepositoryState>>,
    check_run_responses: Mutex<HashMap<String, Vec<CheckRun>>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    merged_prs: Mutex<HashSet<u64>>,
    // Call tracking
    search_calls: Mutex<Vec<String>>,
    get_pr_details_calls: Mutex<Vec<u64>>,
    get_repository_calls: Mutex<Vec<RepoId>>,
    list_check_runs_calls: Mutex<Vec<String>>,
    create_review_calls: Mutex<Vec<CreateReviewCall>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_search: Mutex<Option<Error>>,
    error_on_pr_details: Mutex<HashMap<u64, (Error, Option<usize>)>>,
    error_on_repository: Mutex<Option<Error>>,
    error_on_check_runs: Mutex<Option<Error>>,
    error_on_review: Mutex<Option<Error>>,
    error_on_merge: Mutex<Option<Error>>,
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatformService {
    /// Create an empty mock
    pub fn new() -> Self {
        Self {
            search_response: Mutex::new(Vec::new()),
            pr_details_responses: Mutex::new(HashMap::new()),
            repository_responses: Mutex::new(HashMap::new()),
            check_run_responses: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            merged_prs: Mutex::new(HashSet::new()),
            search_calls: Mutex::new(Vec::new()),
            get_pr_details_calls: Mutex::new(Vec::new()),
            get_repository_calls: Mutex::new(Vec::new()),
            list_check_runs_calls: Mutex::new(Vec::new()),
            create_review_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_search: Mutex::new(None),
            error_on_pr_details: Mutex::new(HashMap::new()),
            error_on_repository: Mutex::new(None),
            error_on_check_runs: Mutex::new(None),
            error_on_review: Mutex::new(None),
            error_on_merge: Mutex::new(None),
        }
    }

    // === Response setup ===

    /// Set the search result
    pub fn set_search_response(&self, candidates: Vec<CandidatePr>) {
        *self.search_response.lock().unwrap() = candidates;
    }

    /// Set a fixed details response for a PR
    pub fn set_pr_details_response(&self, details: PullRequestDetails) {
        self.set_pr_details_sequence(vec![details]);
    }

    /// Set a sequence of details responses; each read consumes one and the
    /// last one repeats
    pub fn set_pr_details_sequence(&self, sequence: Vec<PullRequestDetails>) {
        let number = sequence.first().map(|d| d.number).expect("non-empty sequence");
        self.pr_details_responses
            .lock()
            .unwrap()
            .insert(number, sequence.into());
    }

    /// Set the repository response
    pub fn set_repository_response(&self, state: RepositoryState) {
        self.repository_responses
            .lock()
            .unwrap()
            .insert(state.repo.to_string(), state);
    }

    /// Set the check runs for a commit
    pub fn set_check_runs_response(&self, sha: &str, runs: Vec<CheckRun>) {
        self.check_run_responses
            .lock()
            .unwrap()
            .insert(sha.to_string(), runs);
    }

    /// Override the merge response for a PR (default: merged)
    pub fn set_merge_response(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    /// Mark a PR as merged outside of the tool (e.g. by someone else)
    pub fn mark_merged(&self, pr_number: u64) {
        self.merged_prs.lock().unwrap().insert(pr_number);
    }

    // === Error injection methods ===

    /// Make `search_pull_requests` return an error
    pub fn fail_search(&self, err: Error) {
        *self.error_on_search.lock().unwrap() = Some(err);
    }

    /// Make `get_pr_details` fail for a PR on every read
    pub fn fail_pr_details(&self, pr_number: u64, err: Error) {
        self.error_on_pr_details
            .lock()
            .unwrap()
            .insert(pr_number, (err, None));
    }

    /// Make `get_pr_details` fail for a PR on the next `times` reads
    pub fn fail_pr_details_times(&self, pr_number: u64, err: Error, times: usize) {
        self.error_on_pr_details
            .lock()
            .unwrap()
            .insert(pr_number, (err, Some(times)));
    }

    /// Make `get_repository` return an error
    pub fn fail_repository(&self, err: Error) {
        *self.error_on_repository.lock().unwrap() = Some(err);
    }

    /// Make `list_check_runs` return an error
    pub fn fail_check_runs(&self, err: Error) {
        *self.error_on_check_runs.lock().unwrap() = Some(err);
    }

    /// Make `create_review` return an error
    pub fn fail_review(&self, err: Error) {
        *self.error_on_review.lock().unwrap() = Some(err);
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge(&self, err: Error) {
        *self.error_on_merge.lock().unwrap() = Some(err);
    }

    // === Call verification methods ===

    pub fn get_search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn get_pr_details_calls(&self) -> Vec<u64> {
        self.get_pr_details_calls.lock().unwrap().clone()
    }

    pub fn get_repository_calls(&self) -> Vec<RepoId> {
        self.get_repository_calls.lock().unwrap().clone()
    }

    pub fn get_check_runs_calls(&self) -> Vec<String> {
        self.list_check_runs_calls.lock().unwrap().clone()
    }

    pub fn get_review_calls(&self) -> Vec<CreateReviewCall> {
        self.create_review_calls.lock().unwrap().clone()
    }

    pub fn get_merge_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Assert that `merge_pr` was called for a specific PR with a method
    pub fn assert_merge_called_with_method(&self, pr_number: u64, method: MergeMethod) {
        let calls = self.get_merge_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.pr_number == pr_number && c.method == method),
            "Expected merge_pr({pr_number}, {method:?}) but got: {calls:?}"
        );
    }

    /// Assert that no review or merge happened for a PR
    pub fn assert_untouched(&self, pr_number: u64) {
        let reviews = self.get_review_calls();
        let merges = self.get_merge_calls();
        assert!(
            !reviews.iter().any(|c| c.pr_number == pr_number),
            "Expected no review for PR #{pr_number} but got: {reviews:?}"
        );
        assert!(
            !merges.iter().any(|c| c.pr_number == pr_number),
            "Expected no merge for PR #{pr_number} but got: {merges:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn search_pull_requests(&self, query: &str) -> Result<Vec<CandidatePr>> {
        self.search_calls.lock().unwrap().push(query.to_string());
        if let Some(err) = self.error_on_search.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.search_response.lock().unwrap().clone())
    }

    async fn get_pr_details(&self, _repo: &RepoId, pr_number: u64) -> Result<PullRequestDetails> {
        self.get_pr_details_calls.lock().unwrap().push(pr_number);

        {
            let mut errors = self.error_on_pr_details.lock().unwrap();
            if let Some((err, remaining)) = errors.get_mut(&pr_number) {
                match remaining {
                    None => return Err(err.clone()),
                    Some(0) => {}
                    Some(n) => {
                        *n -= 1;
                        return Err(err.clone());
                    }
                }
            }
        }

        let mut responses = self.pr_details_responses.lock().unwrap();
        let queue = responses.get_mut(&pr_number).ok_or_else(|| {
            Error::NotFound(format!(
                "get_pr_details: no response configured for PR #{pr_number}"
            ))
        })?;
        let mut details = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        };

        if self.merged_prs.lock().unwrap().contains(&pr_number) {
            details.merged = true;
        }
        Ok(details)
    }

    async fn get_repository(&self, repo: &RepoId) -> Result<RepositoryState> {
        self.get_repository_calls.lock().unwrap().push(repo.clone());
        if let Some(err) = self.error_on_repository.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .repository_responses
            .lock()
            .unwrap()
            .get(&repo.to_string())
            .cloned()
            .unwrap_or_else(|| RepositoryState {
                repo: repo.clone(),
                archived: false,
            }))
    }

    async fn list_check_runs(&self, _repo: &RepoId, sha: &str) -> Result<Vec<CheckRun>> {
        self.list_check_runs_calls
            .lock()
            .unwrap()
            .push(sha.to_string());
        if let Some(err) = self.error_on_check_runs.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .check_run_responses
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_review(&self, repo: &RepoId, pr_number: u64, body: &str) -> Result<()> {
        self.create_review_calls
            .lock()
            .unwrap()
            .push(CreateReviewCall {
                repo: repo.clone(),
                pr_number,
                body: body.to_string(),
            });
        if let Some(err) = self.error_on_review.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(())
    }

    async fn merge_pr(
        &self,
        repo: &RepoId,
        pr_number: u64,
        method: MergeMethod,
    ) -> Result<MergeResult> {
        self.merge_pr_calls.lock().unwrap().push(MergePrCall {
            repo: repo.clone(),
            pr_number,
            method,
        });
        if let Some(err) = self.error_on_merge.lock().unwrap().clone() {
            return Err(err);
        }

        let result = self
            .merge_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_else(|| MergeResult {
                merged: true,
                sha: Some(format!("merged_sha_{pr_number}")),
                message: None,
            });
        if result.merged {
            self.merged_prs.lock().unwrap().insert(pr_number);
        }
        Ok(result)
    }
}
