//! GitHub token resolution

use super::AuthSource;
use crate::error::{Error, Result};
use tracing::debug;

/// Resolved GitHub credential
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Access token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve the GitHub token from `--token` or the variable named by
/// `--token-variable`, reading the process environment.
pub fn resolve_github_token(
    token: Option<&str>,
    token_variable: Option<&str>,
) -> Result<GitHubAuthConfig> {
    resolve_github_token_with(token, token_variable, |name| std::env::var(name).ok())
}

/// Resolve the GitHub token with a custom environment lookup.
///
/// An explicit token always wins. Empty strings count as missing.
pub fn resolve_github_token_with<F>(
    token: Option<&str>,
    token_variable: Option<&str>,
    lookup: F,
) -> Result<GitHubAuthConfig>
where
    F: FnOnce(&str) -> Option<String>,
{
    let token = token.filter(|t| !t.is_empty());
    let token_variable = token_variable.filter(|v| !v.is_empty());

    if let Some(token) = token {
        debug!("using token from command line");
        return Ok(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Flag,
        });
    }

    let Some(variable) = token_variable else {
        return Err(Error::Auth(
            "Either token or token-variable must be provided".to_string(),
        ));
    };

    match lookup(variable).filter(|t| !t.is_empty()) {
        Some(token) => {
            debug!(variable, "using token from environment");
            Ok(GitHubAuthConfig {
                token,
                source: AuthSource::EnvVar,
            })
        }
        None => Err(Error::Auth(format!(
            "GitHub token is required (environment variable {variable} is empty or unset)"
        ))),
    }
}
