//! Triage command - search, evaluate, approve and merge

use crate::cli::context::{CommandContext, RunOptions};
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, arrow, check, spinner_style};
use anstream::println;
use anyhow::Context;
use indicatif::ProgressBar;
use renovator::config::TriageConfig;
use renovator::prompt::{
    Approver, AutoApprover, ConfirmationPrompt, InteractiveApprover, TerminalPrompt,
};
use renovator::search::{filter_by_title, search_candidates};
use renovator::triage::{BatchSummary, ProcessOutcome, run_batch};
use renovator::types::CandidatePr;
use std::time::Duration;

/// Run the triage command
pub async fn run_triage(options: RunOptions) -> anyhow::Result<()> {
    // =========================================================================
    // Phase 1: SETUP - fatal configuration errors stop here
    // =========================================================================

    let ctx = CommandContext::new(options)?;
    let config = &ctx.config;

    // =========================================================================
    // Phase 2: SEARCH - fixed candidate list for the whole run
    // =========================================================================

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!(
        "Searching PRs in {} awaiting {}...",
        config.org.emphasis(),
        config.reviewer.emphasis()
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let found = search_candidates(
        ctx.platform.as_ref(),
        &config.org,
        &config.author,
        &config.reviewer,
    )
    .await;
    spinner.finish_and_clear();
    let found = found.context("Error searching PRs")?;

    println!(
        "Found {} {} PRs for user {}",
        found.len().accent(),
        config.author,
        config.reviewer.emphasis()
    );

    let candidates = filter_by_title(found, config.dependency.as_deref());
    if let Some(ref dependency) = config.dependency {
        println!(
            "Found {} {} PRs for dependency {}",
            candidates.len().accent(),
            config.author,
            dependency.emphasis()
        );
    }
    print_candidates(&candidates);

    if candidates.is_empty() {
        println!("{}", "Nothing to do.".muted());
        return Ok(());
    }

    // =========================================================================
    // Phase 3: EXECUTE - rounds until done
    // =========================================================================

    let mut approver = build_approver(config);
    let progress = CliProgress::new();
    let summary = run_batch(
        &candidates,
        ctx.platform.as_ref(),
        approver.as_mut(),
        &progress,
        &config.retry,
    )
    .await;

    print_summary(&summary, config);
    Ok(())
}

fn build_approver(config: &TriageConfig) -> Box<dyn Approver> {
    if config.auto_approve {
        return Box::new(AutoApprover::new(config.default_comment.clone()));
    }
    let io = if std::env::var_os("NO_COLOR").is_some() {
        TerminalPrompt::plain()
    } else {
        TerminalPrompt::colorful()
    };
    Box::new(InteractiveApprover::new(
        ConfirmationPrompt::new(config.default_comment.clone()),
        io,
    ))
}

fn print_candidates(candidates: &[CandidatePr]) {
    for candidate in candidates {
        println!(
            "  {} {}#{} {}",
            arrow(),
            candidate.repo.to_string().accent(),
            candidate.number,
            candidate.title
        );
    }
    println!();
}

/// Print the closing summary
fn print_summary(summary: &BatchSummary, config: &TriageConfig) {
    println!();
    if config.retry.until_all_merged && summary.converged {
        println!(
            "{} All PRs merged after {} round(s)",
            check(),
            summary.rounds.accent()
        );
    } else if config.retry.until_all_merged {
        println!(
            "{} Stopped after {} round(s) with unmerged PRs",
            "⚠".warn(),
            summary.rounds.accent()
        );
    } else {
        println!("{}", "Done".emphasis());
    }

    println!(
        "   Merged: {}  Already merged: {}  Skipped: {}  Ineligible: {}  Failed: {}",
        summary.merged_total.success(),
        summary.already_merged(),
        summary.skipped(),
        summary.ineligible(),
        summary.failed().warn()
    );

    for (candidate, outcome) in &summary.outcomes {
        if let ProcessOutcome::Failed { stage, error } = outcome {
            println!(
                "   {} {}#{} ({stage}): {}",
                "Failed:".warn(),
                candidate.repo,
                candidate.number,
                error.to_string().muted()
            );
        }
    }
}
