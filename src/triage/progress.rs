//! Progress reporting for triage runs

use crate::types::CandidatePr;
use async_trait::async_trait;
use std::time::Duration;

/// Receives user-facing progress from the processor and batch driver.
///
/// Errors are logged through `tracing`; this only carries the normal flow.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A candidate is about to be processed
    async fn on_candidate(&self, candidate: &CandidatePr);

    /// A status line (verdict, skip, merge result)
    async fn on_message(&self, message: &str);

    /// Round `round` left `pending` PRs unmerged; the next one starts after `delay`
    async fn on_retry_wait(&self, round: u32, pending: usize, delay: Duration);
}

/// Progress sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_candidate(&self, _candidate: &CandidatePr) {}

    async fn on_message(&self, _message: &str) {}

    async fn on_retry_wait(&self, _round: u32, _pending: usize, _delay: Duration) {}
}
