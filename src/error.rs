//! Error types for renovator

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or talking to the hosting platform
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Missing or invalid configuration (fatal, reported before any remote call)
    #[error("configuration error: {0}")]
    Config(String),

    /// Credential missing or rejected
    #[error("authentication error: {0}")]
    Auth(String),

    /// GitHub answered with an error we don't classify further
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// The requested PR, repository or commit does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The API rate limit was hit
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Transport-level failure (connect, timeout, 5xx)
    #[error("network error: {0}")]
    Network(String),

    /// Generic platform failure
    #[error("platform error: {0}")]
    Platform(String),

    /// Reading interactive input failed
    #[error("input error: {0}")]
    Input(String),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether retrying the same request later may succeed.
    ///
    /// Policy decisions (ineligible PRs) are never errors, so this only has to
    /// separate flaky transport from permanent failures.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited(_))
    }

    /// Map an HTTP status and message to an error variant
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Auth(message),
            403 if message.to_lowercase().contains("rate limit") => Self::RateLimited(message),
            403 => Self::Auth(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            500..=599 => Self::Network(format!("HTTP {status}: {message}")),
            _ => Self::GitHubApi(format!("HTTP {status}: {message}")),
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                Self::from_status(source.status_code.as_u16(), source.message)
            }
            octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => {
                Self::GitHubApi(err.to_string())
            }
            other => Self::Network(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16(), err.to_string());
        }
        if err.is_decode() {
            return Self::GitHubApi(err.to_string());
        }
        Self::Network(err.to_string())
    }
}
