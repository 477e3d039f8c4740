//! renovator - triage dependency-update pull requests
//!
//! Finds open PRs awaiting a reviewer's approval, checks each one against the
//! repository, mergeability and CI gates, asks for confirmation, then approves
//! and rebase-merges it. Optionally keeps retrying until every matching PR is
//! merged.

pub mod auth;
pub mod config;
pub mod error;
pub mod platform;
pub mod prompt;
pub mod search;
pub mod triage;
pub mod types;
