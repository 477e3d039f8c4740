//! Authentication for GitHub
//!
//! Supports an explicit token flag or a named environment variable.

mod github;

pub use github::{GitHubAuthConfig, resolve_github_token, resolve_github_token_with};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed on the command line
    Flag,
    /// Token from environment variable
    EnvVar,
}
