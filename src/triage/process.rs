//! Per-PR processing - effectful operations
//!
//! Fetches fresh state for one candidate, evaluates it, asks for approval and
//! performs the review + merge. Every failure is logged and ends processing of
//! this candidate for the current round; the batch keeps going.

use crate::error::Error;
use crate::platform::PlatformService;
use crate::prompt::{ApprovalDecision, Approver};
use crate::triage::eligibility::{Verdict, evaluate, evaluate_gates};
use crate::triage::progress::ProgressCallback;
use crate::types::{CandidatePr, MergeMethod};
use tracing::{debug, error};

/// Merge method used for approved PRs
pub const MERGE_METHOD: MergeMethod = MergeMethod::Rebase;

/// Where processing of a candidate stopped on error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Candidate had no usable repository identity
    RepositoryName,
    /// Fetching PR details
    PrDetails,
    /// Fetching repository details
    Repository,
    /// Listing check runs
    CheckRuns,
    /// Submitting the approving review
    Review,
    /// Merging
    Merge,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RepositoryName => write!(f, "resolving repository"),
            Self::PrDetails => write!(f, "fetching PR details"),
            Self::Repository => write!(f, "fetching repository details"),
            Self::CheckRuns => write!(f, "fetching check runs"),
            Self::Review => write!(f, "approving PR"),
            Self::Merge => write!(f, "merging PR"),
        }
    }
}

/// What happened to a candidate in one round
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// Approved and merged
    Merged,
    /// A gate failed; no action taken
    Ineligible(Verdict),
    /// Eligible, but the approver said no
    Skipped,
    /// Aborted on an error
    Failed {
        /// Step that failed
        stage: Stage,
        /// The error
        error: Error,
    },
}

impl ProcessOutcome {
    /// Whether the PR was merged this round
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged)
    }

    /// Whether processing aborted on an error
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

fn failed(candidate: &CandidatePr, stage: Stage, err: Error) -> ProcessOutcome {
    error!(
        repo = %candidate.repo,
        pr_number = candidate.number,
        title = %candidate.title,
        %stage,
        error = %err,
        "Error {stage}"
    );
    ProcessOutcome::Failed { stage, error: err }
}

/// Process one candidate PR (EFFECTFUL)
///
/// Issues at most one review call and one merge call, and only when the
/// verdict is `Eligible` and the approver returns `Approve`.
pub async fn process_candidate(
    candidate: &CandidatePr,
    platform: &dyn PlatformService,
    approver: &mut dyn Approver,
    progress: &dyn ProgressCallback,
) -> ProcessOutcome {
    progress.on_candidate(candidate).await;

    if !candidate.repo.is_complete() {
        return failed(
            candidate,
            Stage::RepositoryName,
            Error::Platform(format!(
                "Cannot get repository name for PR: {}",
                candidate.title
            )),
        );
    }
    let repo = &candidate.repo;

    let details = match platform.get_pr_details(repo, candidate.number).await {
        Ok(details) => details,
        Err(e) => return failed(candidate, Stage::PrDetails, e),
    };

    let repo_state = match platform.get_repository(repo).await {
        Ok(state) => state,
        Err(e) => return failed(candidate, Stage::Repository, e),
    };

    // Check runs can't change a verdict decided by the earlier gates
    let verdict = if let Some(verdict) = evaluate_gates(&details, &repo_state) {
        verdict
    } else {
        let checks = match platform.list_check_runs(repo, &details.head_sha).await {
            Ok(checks) => checks,
            Err(e) => return failed(candidate, Stage::CheckRuns, e),
        };
        evaluate(&details, &repo_state, &checks)
    };

    if !verdict.is_eligible() {
        debug!(repo = %repo, pr_number = candidate.number, ?verdict, "PR not eligible");
        progress.on_message(&verdict.to_string()).await;
        return ProcessOutcome::Ineligible(verdict);
    }

    let comment = match approver.decide(verdict.pr()) {
        ApprovalDecision::Approve { comment } => comment,
        ApprovalDecision::Skip => {
            progress
                .on_message(&format!("Skipping PR: {}", candidate.title))
                .await;
            return ProcessOutcome::Skipped;
        }
    };

    if let Err(e) = platform.create_review(repo, candidate.number, &comment).await {
        return failed(candidate, Stage::Review, e);
    }

    match platform.merge_pr(repo, candidate.number, MERGE_METHOD).await {
        Ok(result) if result.merged => {
            debug!(repo = %repo, pr_number = candidate.number, sha = ?result.sha, "merged");
            progress
                .on_message(&format!("Successfully merged PR: {}", candidate.title))
                .await;
            ProcessOutcome::Merged
        }
        Ok(result) => failed(
            candidate,
            Stage::Merge,
            Error::Platform(
                result
                    .message
                    .unwrap_or_else(|| "merge was not performed".to_string()),
            ),
        ),
        Err(e) => failed(candidate, Stage::Merge, e),
    }
}
