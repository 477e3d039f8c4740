//! Run configuration

use crate::error::{Error, Result};
use std::time::Duration;

/// Default PR author filter
pub const DEFAULT_AUTHOR: &str = "app/renovate";

/// Default approval comment
pub const DEFAULT_COMMENT: &str = "LGTM";

/// Default delay between retry rounds
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Settings for the retry-until-merged loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    /// Keep running rounds until every candidate is merged
    pub until_all_merged: bool,
    /// Pause between rounds
    pub delay: Duration,
    /// Stop after this many rounds even if not converged (`None` = unbounded)
    pub max_rounds: Option<u32>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            until_all_merged: false,
            delay: DEFAULT_RETRY_DELAY,
            max_rounds: None,
        }
    }
}

/// Everything a triage run needs besides the credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageConfig {
    /// Organization to search in
    pub org: String,
    /// User whose review is requested
    pub reviewer: String,
    /// PR author filter
    pub author: String,
    /// Exact PR title to keep (`None` keeps all)
    pub dependency: Option<String>,
    /// Comment used for approvals unless a custom one is entered
    pub default_comment: String,
    /// Approve every eligible PR without prompting
    pub auto_approve: bool,
    /// Retry loop settings
    pub retry: RetrySettings,
}

impl TriageConfig {
    /// Create a config with defaults for everything but org and reviewer
    pub fn new(org: impl Into<String>, reviewer: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            reviewer: reviewer.into(),
            author: DEFAULT_AUTHOR.to_string(),
            dependency: None,
            default_comment: DEFAULT_COMMENT.to_string(),
            auto_approve: false,
            retry: RetrySettings::default(),
        }
    }

    /// Check required fields before any remote call is made
    pub fn validate(&self) -> Result<()> {
        if self.org.trim().is_empty() || self.reviewer.trim().is_empty() {
            return Err(Error::Config("org and user flags are required".to_string()));
        }
        if self.author.trim().is_empty() {
            return Err(Error::Config("author must not be empty".to_string()));
        }
        if self.retry.max_rounds == Some(0) {
            return Err(Error::Config("max-rounds must be at least 1".to_string()));
        }
        Ok(())
    }
}
