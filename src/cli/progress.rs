//! Terminal progress output

use crate::cli::style::Stylize;
use anstream::println;
use async_trait::async_trait;
use renovator::triage::ProgressCallback;
use renovator::types::CandidatePr;
use std::time::Duration;
use supports_hyperlinks::Stream;
use terminal_link::Link;

/// Prints triage progress to stdout
pub struct CliProgress {
    hyperlinks: bool,
}

impl CliProgress {
    /// Detect hyperlink support on stdout
    pub fn new() -> Self {
        Self {
            hyperlinks: supports_hyperlinks::on(Stream::Stdout),
        }
    }

    /// PR label, clickable when the terminal supports OSC 8 links
    fn pr_label(&self, candidate: &CandidatePr) -> String {
        let text = format!("{}#{}", candidate.repo, candidate.number);
        if self.hyperlinks && !candidate.html_url.is_empty() {
            Link::new(&text, &candidate.html_url).to_string()
        } else {
            text
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_candidate(&self, candidate: &CandidatePr) {
        println!(
            "{} {} {}",
            "Processing PR:".emphasis(),
            self.pr_label(candidate).accent(),
            candidate.title
        );
    }

    async fn on_message(&self, message: &str) {
        println!("  {message}");
    }

    async fn on_retry_wait(&self, round: u32, pending: usize, delay: Duration) {
        println!();
        println!(
            "{}",
            format!(
                "Round {round}: {pending} PR(s) not merged yet, retrying in {} seconds",
                delay.as_secs()
            )
            .warn()
        );
    }
}
