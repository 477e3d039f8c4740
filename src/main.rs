//! renovator - approve and merge dependency-update PRs awaiting your review

mod cli;

use clap::Parser;
use cli::RunOptions;
use cli::style::Stylize;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Approve and merge dependency-update PRs awaiting your review
#[derive(Parser, Debug)]
#[command(name = "renovator", version, about, long_about = None)]
struct Args {
    /// GitHub token to use
    #[arg(long)]
    token: Option<String>,

    /// Name of an environment variable to read the GitHub token from
    #[arg(long)]
    token_variable: Option<String>,

    /// GitHub organization to renovate
    #[arg(short = 'o', long = "org")]
    org: Option<String>,

    /// GitHub user who we are renovating for (review requested from)
    #[arg(short = 'u', long = "user")]
    user: Option<String>,

    /// The creator of the dependency-update PRs
    #[arg(short = 'a', long = "author", default_value = renovator::config::DEFAULT_AUTHOR)]
    author: String,

    /// Only process PRs with exactly this title
    #[arg(short = 'd', long = "dependency")]
    dependency: Option<String>,

    /// The default comment for PR approvals
    #[arg(short = 'm', long = "message", default_value = renovator::config::DEFAULT_COMMENT)]
    message: String,

    /// Approve all eligible PRs without prompting
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Enables additional output
    #[arg(long)]
    debug: bool,

    /// Retry until all PRs are merged
    #[arg(long)]
    retry_until_all_merged: bool,

    /// Seconds to wait between retry rounds
    #[arg(long, default_value_t = 5, value_name = "SECS")]
    retry_delay: u64,

    /// Give up retrying after this many rounds
    #[arg(long, value_name = "N")]
    max_rounds: Option<u32>,

    /// GitHub Enterprise host (e.g. github.example.com)
    #[arg(long, value_name = "HOST")]
    github_host: Option<String>,
}

impl Args {
    fn into_options(self) -> RunOptions {
        let mut config = renovator::config::TriageConfig::new(
            self.org.unwrap_or_default(),
            self.user.unwrap_or_default(),
        );
        config.author = self.author;
        config.dependency = self.dependency.filter(|d| !d.is_empty());
        config.default_comment = self.message;
        config.auto_approve = self.yes;
        config.retry.until_all_merged = self.retry_until_all_merged;
        config.retry.delay = Duration::from_secs(self.retry_delay);
        config.retry.max_rounds = self.max_rounds;

        RunOptions {
            token: self.token,
            token_variable: self.token_variable,
            github_host: self.github_host,
            config,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);

    match cli::run(args.into_options()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("{} {e:#}", "error:".error());
            ExitCode::from(1)
        }
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so they don't interleave with prompts on stdout.
/// `RUST_LOG` wins over `--debug`.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}
