//! Candidate search and dependency filtering

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::CandidatePr;
use tracing::debug;

/// Build the search query for open PRs by `author` awaiting `reviewer` in `org`
pub fn build_search_query(org: &str, author: &str, reviewer: &str) -> String {
    format!("org:{org} author:{author} is:open is:pr review-requested:{reviewer}")
}

/// Search candidate PRs
pub async fn search_candidates(
    platform: &dyn PlatformService,
    org: &str,
    author: &str,
    reviewer: &str,
) -> Result<Vec<CandidatePr>> {
    let query = build_search_query(org, author, reviewer);
    let candidates = platform.search_pull_requests(&query).await?;
    debug!(count = candidates.len(), "found candidate PRs");
    Ok(candidates)
}

/// Keep candidates whose title is exactly `dependency`.
///
/// `bump lodash` does not match `bump lodash-es`.
pub fn filter_by_title(candidates: Vec<CandidatePr>, dependency: Option<&str>) -> Vec<CandidatePr> {
    let Some(dependency) = dependency else {
        return candidates;
    };
    candidates
        .into_iter()
        .filter(|c| c.title == dependency)
        .collect()
}
