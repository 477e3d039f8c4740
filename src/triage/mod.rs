//! Triage engine for dependency-update PRs
//!
//! Same split as a plan/execute pipeline:
//! 1. Evaluate - decide eligibility from fetched state (pure)
//! 2. Process - fetch, evaluate, confirm, approve and merge one PR (effectful)
//! 3. Batch - run rounds over all candidates until merged (effectful)

mod batch;
mod eligibility;
mod process;
mod progress;

pub use batch::{BatchSummary, all_merged, run_batch, unmerged_count};
pub use eligibility::{Verdict, evaluate, evaluate_gates, is_passing_conclusion};
pub use process::{MERGE_METHOD, ProcessOutcome, Stage, process_candidate};
pub use progress::{NoopProgress, ProgressCallback};
