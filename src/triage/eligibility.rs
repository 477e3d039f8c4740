//! Eligibility evaluation - pure functions
//!
//! No I/O happens here - all data is passed in, making it easy to unit test.

use crate::types::{CheckRun, PrRef, PullRequestDetails, RepositoryState};

/// Conclusions that count as passing
const PASSING_CONCLUSIONS: [&str; 2] = ["success", "skipped"];

/// Eligibility decision for a single PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Repository is archived - never merge
    Archived {
        /// PR identity
        pr: PrRef,
    },
    /// PR is already merged (counts as done)
    AlreadyMerged {
        /// PR identity
        pr: PrRef,
    },
    /// PR cannot be merged (conflicts, blocked, or status unknown)
    NotMergeable {
        /// PR identity
        pr: PrRef,
    },
    /// At least one check run did not pass
    ChecksFailed {
        /// PR identity
        pr: PrRef,
        /// Names of the check runs that did not pass
        failing: Vec<String>,
    },
    /// All gates passed
    Eligible {
        /// PR identity
        pr: PrRef,
    },
}

impl Verdict {
    /// Get the PR identity for this verdict
    pub const fn pr(&self) -> &PrRef {
        match self {
            Self::Archived { pr }
            | Self::AlreadyMerged { pr }
            | Self::NotMergeable { pr }
            | Self::ChecksFailed { pr, .. }
            | Self::Eligible { pr } => pr,
        }
    }

    /// Whether the PR may be approved and merged
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Archived { pr } => {
                write!(f, "PR {} is in an archived repository, skipping", pr.title)
            }
            Self::AlreadyMerged { pr } => write!(f, "PR {} is already merged", pr.title),
            Self::NotMergeable { pr } => write!(f, "PR {} cannot be merged", pr.title),
            Self::ChecksFailed { pr, failing } => {
                write!(f, "PR {} has non-succeeded checks", pr.title)?;
                if !failing.is_empty() {
                    write!(f, ": {}", failing.join(", "))?;
                }
                Ok(())
            }
            Self::Eligible { pr } => write!(f, "PR {} is ready to merge", pr.title),
        }
    }
}

/// Whether a check conclusion counts as passing
pub fn is_passing_conclusion(conclusion: Option<&str>) -> bool {
    conclusion.is_some_and(|c| PASSING_CONCLUSIONS.contains(&c))
}

/// Evaluate the gates that don't need CI data (PURE)
///
/// Returns the first failing gate in order archived → merged → mergeable,
/// or `None` if CI is the only thing left to check.
pub fn evaluate_gates(details: &PullRequestDetails, repo: &RepositoryState) -> Option<Verdict> {
    let pr = details.pr_ref();
    if repo.archived {
        return Some(Verdict::Archived { pr });
    }
    if details.merged {
        return Some(Verdict::AlreadyMerged { pr });
    }
    // Unknown mergeability is treated as not mergeable; the next round re-reads it
    if details.mergeable != Some(true) {
        return Some(Verdict::NotMergeable { pr });
    }
    None
}

/// Evaluate a PR's eligibility (PURE)
///
/// Checks short-circuit in order; the first failing one wins.
#[must_use]
pub fn evaluate(
    details: &PullRequestDetails,
    repo: &RepositoryState,
    checks: &[CheckRun],
) -> Verdict {
    if let Some(verdict) = evaluate_gates(details, repo) {
        return verdict;
    }

    let failing: Vec<String> = checks
        .iter()
        .filter(|run| !is_passing_conclusion(run.conclusion.as_deref()))
        .map(|run| run.name.clone())
        .collect();

    let pr = details.pr_ref();
    if failing.is_empty() {
        Verdict::Eligible { pr }
    } else {
        Verdict::ChecksFailed { pr, failing }
    }
}
