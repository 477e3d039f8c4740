//! Common test utilities
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_platform;

pub use mock_platform::{CreateReviewCall, MergePrCall, MockPlatformService};

use async_trait::async_trait;
use renovator::error::{Error, Result};
use renovator::prompt::PromptIo;
use renovator::triage::ProgressCallback;
use renovator::types::{CandidatePr, CheckRun, PullRequestDetails, RepoId, RepositoryState};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// =============================================================================
// Fixtures
// =============================================================================

/// Candidate PR in `owner/name`
pub fn make_candidate(owner: &str, name: &str, number: u64, title: &str) -> CandidatePr {
    CandidatePr {
        number,
        title: title.to_string(),
        repo: RepoId::new(owner, name),
        html_url: format!("https://github.com/{owner}/{name}/pull/{number}"),
    }
}

/// Open, mergeable PR details for a candidate, with head SHA `sha_{number}`
pub fn open_details(candidate: &CandidatePr) -> PullRequestDetails {
    PullRequestDetails {
        repo: candidate.repo.clone(),
        number: candidate.number,
        title: candidate.title.clone(),
        merged: false,
        mergeable: Some(true),
        head_sha: head_sha(candidate.number),
        html_url: candidate.html_url.clone(),
    }
}

/// Head SHA used by `open_details`
pub fn head_sha(number: u64) -> String {
    format!("sha_{number}")
}

/// Repository state
pub fn repo_state(owner: &str, name: &str, archived: bool) -> RepositoryState {
    RepositoryState {
        repo: RepoId::new(owner, name),
        archived,
    }
}

/// Completed check run
pub fn check_run(name: &str, conclusion: Option<&str>) -> CheckRun {
    CheckRun {
        name: name.to_string(),
        status: if conclusion.is_some() {
            "completed".to_string()
        } else {
            "in_progress".to_string()
        },
        conclusion: conclusion.map(str::to_string),
    }
}

/// Mock with one open, mergeable, green candidate registered
pub fn mock_with_ready(candidates: &[CandidatePr]) -> MockPlatformService {
    let mock = MockPlatformService::new();
    mock.set_search_response(candidates.to_vec());
    for candidate in candidates {
        mock.set_pr_details_response(open_details(candidate));
        mock.set_check_runs_response(
            &head_sha(candidate.number),
            vec![check_run("build", Some("success"))],
        );
    }
    mock
}

// =============================================================================
// Scripted prompt
// =============================================================================

/// `PromptIo` that replays canned answers and records what was shown
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Result<String>>,
    /// Prompts passed to `read_answer` / `read_comment`, in order
    pub prompts: Vec<String>,
    /// Lines passed to `show`
    pub shown: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| Ok((*a).to_string())).collect(),
            ..Self::default()
        }
    }

    /// Queue a read failure
    pub fn then_fail(mut self) -> Self {
        self.answers
            .push_back(Err(Error::Input("stdin closed".to_string())));
        self
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| Err(Error::Input("no scripted answer left".to_string())))
    }
}

impl PromptIo for ScriptedPrompt {
    fn read_answer(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn read_comment(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn show(&mut self, line: &str) {
        self.shown.push(line.to_string());
    }
}

// =============================================================================
// Recording progress
// =============================================================================

/// `ProgressCallback` that records every event
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub candidates: Mutex<Vec<u64>>,
    pub messages: Mutex<Vec<String>>,
    pub retry_waits: Mutex<Vec<(u32, usize)>>,
}

impl RecordingProgress {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn retry_waits(&self) -> Vec<(u32, usize)> {
        self.retry_waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_candidate(&self, candidate: &CandidatePr) {
        self.candidates.lock().unwrap().push(candidate.number);
    }

    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    async fn on_retry_wait(&self, round: u32, pending: usize, _delay: Duration) {
        self.retry_waits.lock().unwrap().push((round, pending));
    }
}
