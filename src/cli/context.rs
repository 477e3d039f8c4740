//! Shared command context
//!
//! Resolves the credential, validates the configuration and builds the
//! platform service before any remote call is made.

use renovator::auth::{AuthSource, resolve_github_token};
use renovator::config::TriageConfig;
use renovator::error::Result;
use renovator::platform::{GitHubService, PlatformService, RetryPolicy, RetryingPlatform};
use tracing::debug;

/// Raw options collected from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// `--token`
    pub token: Option<String>,
    /// `--token-variable`
    pub token_variable: Option<String>,
    /// `--github-host`
    pub github_host: Option<String>,
    /// Triage settings
    pub config: TriageConfig,
}

/// Everything a run needs once setup succeeded
pub struct CommandContext {
    /// Platform service (GitHub with retries on reads)
    pub platform: Box<dyn PlatformService>,
    /// Validated configuration
    pub config: TriageConfig,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// Order of checks: credential, then required identifiers. Both are fatal.
    pub fn new(options: RunOptions) -> Result<Self> {
        let auth = resolve_github_token(
            options.token.as_deref(),
            options.token_variable.as_deref(),
        )?;
        options.config.validate()?;

        debug!(
            source = match auth.source {
                AuthSource::Flag => "flag",
                AuthSource::EnvVar => "env",
            },
            host = options.github_host.as_deref().unwrap_or("github.com"),
            "creating GitHub client"
        );
        let github = GitHubService::new(&auth.token, options.github_host.as_deref())?;
        let platform = RetryingPlatform::new(github, RetryPolicy::default());

        Ok(Self {
            platform: Box::new(platform),
            config: options.config,
        })
    }
}
