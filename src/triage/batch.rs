//! Batch driver - run the processor over all candidates in rounds

use crate::config::RetrySettings;
use crate::platform::PlatformService;
use crate::prompt::Approver;
use crate::triage::eligibility::Verdict;
use crate::triage::process::{ProcessOutcome, process_candidate};
use crate::triage::progress::ProgressCallback;
use crate::types::CandidatePr;
use tracing::{debug, info, warn};

/// Result of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Rounds executed
    pub rounds: u32,
    /// Whether every candidate was confirmed merged at the end (retry mode only)
    pub converged: bool,
    /// Outcome per candidate in the final round, in candidate order
    pub outcomes: Vec<(CandidatePr, ProcessOutcome)>,
    /// PRs merged by this run across all rounds
    pub merged_total: usize,
}

impl BatchSummary {
    fn count(&self, pred: impl Fn(&ProcessOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }

    /// PRs merged in the final round
    pub fn merged(&self) -> usize {
        self.count(ProcessOutcome::is_merged)
    }

    /// PRs the approver declined in the final round
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ProcessOutcome::Skipped))
    }

    /// PRs that were already merged at the start of the final round
    pub fn already_merged(&self) -> usize {
        self.count(|o| matches!(o, ProcessOutcome::Ineligible(Verdict::AlreadyMerged { .. })))
    }

    /// PRs that failed a gate (other than being merged) in the final round
    pub fn ineligible(&self) -> usize {
        self.count(|o| {
            matches!(o, ProcessOutcome::Ineligible(v) if !matches!(v, Verdict::AlreadyMerged { .. }))
        })
    }

    /// PRs abandoned on an error in the final round
    pub fn failed(&self) -> usize {
        self.count(ProcessOutcome::is_failed)
    }
}

/// Count candidates that are not confirmed merged.
///
/// Fetch errors count as not merged.
pub async fn unmerged_count(candidates: &[CandidatePr], platform: &dyn PlatformService) -> usize {
    let mut pending = 0;
    for candidate in candidates {
        match platform.get_pr_details(&candidate.repo, candidate.number).await {
            Ok(details) if details.merged => {}
            Ok(_) => pending += 1,
            Err(e) => {
                warn!(
                    repo = %candidate.repo,
                    pr_number = candidate.number,
                    error = %e,
                    "Could not confirm merge status, treating as not merged"
                );
                pending += 1;
            }
        }
    }
    pending
}

/// Whether every candidate is merged (re-fetched fresh)
pub async fn all_merged(candidates: &[CandidatePr], platform: &dyn PlatformService) -> bool {
    unmerged_count(candidates, platform).await == 0
}

/// Run the processor over `candidates`, repeating until all are merged when
/// `settings.until_all_merged` is set (EFFECTFUL)
///
/// The candidate list is fixed; PRs opened after the search are not picked up.
pub async fn run_batch(
    candidates: &[CandidatePr],
    platform: &dyn PlatformService,
    approver: &mut dyn Approver,
    progress: &dyn ProgressCallback,
    settings: &RetrySettings,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    loop {
        summary.rounds += 1;
        debug!(round = summary.rounds, count = candidates.len(), "starting round");

        let mut outcomes = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let outcome = process_candidate(candidate, platform, approver, progress).await;
            if outcome.is_merged() {
                summary.merged_total += 1;
            }
            outcomes.push((candidate.clone(), outcome));
        }
        summary.outcomes = outcomes;

        if !settings.until_all_merged {
            break;
        }

        let pending = unmerged_count(candidates, platform).await;
        if pending == 0 {
            summary.converged = true;
            break;
        }

        if settings
            .max_rounds
            .is_some_and(|max| summary.rounds >= max)
        {
            warn!(
                rounds = summary.rounds,
                pending, "Giving up: round limit reached with unmerged PRs"
            );
            break;
        }

        info!(round = summary.rounds, pending, "Some PRs are not merged, retrying");
        progress
            .on_retry_wait(summary.rounds, pending, settings.delay)
            .await;
        tokio::time::sleep(settings.delay).await;
    }

    summary
}
